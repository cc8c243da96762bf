#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived table types and parameters for the GDP analytics engine.
//!
//! Every record here is flat so that it can be written as a CSV row as-is.
//! Arithmetic that has no defined result (division by zero, a missing
//! prior observation, a sample too small for a standard deviation) is
//! represented as `None` rather than `NaN`.

use gdp_trends_panel_models::{Continent, DatasetOverview, IncomeCategory, Year, YearCount};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Key used by the grouped summary calculator.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GroupBy {
    /// One group per year (world trends).
    Year,
    /// One group per (year, continent) pair.
    YearContinent,
}

/// A panel row with its year-over-year growth rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRow {
    /// Entity name.
    pub entity: String,
    /// Observation year.
    pub year: Year,
    /// Indicator value.
    pub value: f64,
    /// Percent change from the entity's previous observation.
    pub growth_rate: Option<f64>,
}

/// A panel row with its trailing moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageRow {
    /// Entity name.
    pub entity: String,
    /// Observation year.
    pub year: Year,
    /// Indicator value.
    pub value: f64,
    /// Mean of up to `window` most recent observations, this one included.
    pub moving_average: f64,
}

/// A panel row augmented with every per-row derived column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRow {
    /// Entity name.
    pub entity: String,
    /// ISO code, when known.
    pub code: Option<String>,
    /// Observation year.
    pub year: Year,
    /// Continent of the entity.
    pub continent: Continent,
    /// Indicator value.
    pub value: f64,
    /// Percent change from the entity's previous observation.
    pub yoy_growth: Option<f64>,
    /// Trailing moving average.
    pub moving_average: f64,
    /// Natural logarithm of the value; undefined for zero.
    pub log_value: Option<f64>,
    /// Income bracket of the value.
    pub income_category: Option<IncomeCategory>,
}

/// Descriptive statistics for one group of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// Year of the group.
    pub year: Year,
    /// Continent of the group, for [`GroupBy::YearContinent`].
    pub continent: Option<Continent>,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Sample standard deviation; undefined for a single row.
    pub std_dev: Option<f64>,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Number of contributing entities.
    pub count: usize,
}

/// Named pair of disjoint year sets bracketing a macroeconomic shock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisWindow {
    /// Identifier used in output file names (e.g. `"covid_crisis"`).
    pub name: String,
    /// Years before the shock.
    pub pre_years: Vec<Year>,
    /// Years during the shock.
    pub during_years: Vec<Year>,
}

/// Impact of a crisis on a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisImpact {
    /// Entity name.
    pub entity: String,
    /// Mean value over the pre-crisis years.
    pub pre_crisis: f64,
    /// Mean value over the crisis years.
    pub during_crisis: f64,
    /// Percent change from `pre_crisis` to `during_crisis`.
    pub impact: Option<f64>,
}

/// Impacts of one crisis window across all entities with data in both
/// halves of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisReport {
    /// The window the impacts were computed for.
    pub window: CrisisWindow,
    /// One record per entity, sorted by entity name.
    pub impacts: Vec<CrisisImpact>,
}

/// Cross-sectional inequality for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InequalityRecord {
    /// The year.
    pub year: Year,
    /// Number of entities observed.
    pub count: usize,
    /// Largest value.
    pub max: f64,
    /// Smallest value.
    pub min: f64,
    /// `max / min`; undefined when `min <= 0`.
    pub ratio: Option<f64>,
    /// Rank-weighted Gini approximation.
    pub gini_approx: Option<f64>,
    /// Sample standard deviation.
    pub std_dev: Option<f64>,
}

/// Long-run growth of a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    /// Entity name.
    pub entity: String,
    /// Year of the earliest observation.
    pub start_year: Year,
    /// Year of the latest observation.
    pub end_year: Year,
    /// Value at `start_year`.
    pub start_value: f64,
    /// Value at `end_year`.
    pub end_value: f64,
    /// Percent change from `start_value` to `end_value`.
    pub total_growth: f64,
    /// Compound annual growth rate, in percent.
    pub cagr: f64,
    /// `end_year - start_year`.
    pub years: i32,
}

/// Growth table with its champions and laggards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRankings {
    /// Every qualifying entity, in order of first appearance.
    pub table: Vec<GrowthRecord>,
    /// Highest CAGR first.
    pub top: Vec<GrowthRecord>,
    /// Lowest CAGR first.
    pub bottom: Vec<GrowthRecord>,
}

/// A single entity's value in a leaders table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderRow {
    /// Entity name.
    pub entity: String,
    /// Continent of the entity.
    pub continent: Continent,
    /// Indicator value.
    pub value: f64,
}

/// Richest and poorest entities in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaders {
    /// The year that was asked for, if any.
    pub requested_year: Option<Year>,
    /// The year the table was built from.
    pub year: Year,
    /// Highest values first.
    pub top: Vec<LeaderRow>,
    /// Lowest values first.
    pub bottom: Vec<LeaderRow>,
}

/// Growth volatility of a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityRecord {
    /// Entity name.
    pub entity: String,
    /// Number of observations of the entity.
    pub observations: usize,
    /// Sample standard deviation of the growth rates.
    pub volatility: Option<f64>,
    /// Mean growth rate.
    pub average_growth: Option<f64>,
}

/// Spelling of an unset [`LeadersConfig::year`] in config files, which have
/// no null.
pub const LATEST_YEAR: &str = "latest";

/// Parameters for the leaders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadersConfig {
    /// Year to rank. The latest available year is used when unset or
    /// absent from the data. Written as a number or as [`LATEST_YEAR`].
    #[serde(default, with = "leaders_year")]
    pub year: Option<Year>,
    /// Number of entities at each end.
    pub count: usize,
}

mod leaders_year {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{LATEST_YEAR, Year};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Year(Year),
        Label(String),
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(year: &Option<Year>, serializer: S) -> Result<S::Ok, S::Error> {
        match year {
            Some(year) => serializer.serialize_i32(*year),
            None => serializer.serialize_str(LATEST_YEAR),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Year>, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Year(year) => Ok(Some(year)),
            Repr::Label(label) if label == LATEST_YEAR => Ok(None),
            Repr::Label(label) => Err(serde::de::Error::custom(format!(
                "expected a year or \"{LATEST_YEAR}\", found \"{label}\""
            ))),
        }
    }
}

/// Parameters for the volatility analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Entities to analyze, in output order.
    pub entities: Vec<String>,
    /// Entities need strictly more observations than this.
    pub min_observations: usize,
}

/// All parameters of a full analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Window of the trailing moving average.
    pub moving_average_window: usize,
    /// Minimum observations for an entity to enter the growth rankings.
    pub ranking_min_years: usize,
    /// Size of the top and bottom growth rankings.
    pub ranking_size: usize,
    /// Minimum entities for a year to get an inequality record.
    pub inequality_min_entities: usize,
    /// Crisis windows to evaluate.
    pub crisis_windows: Vec<CrisisWindow>,
    /// Leaders table parameters.
    pub leaders: LeadersConfig,
    /// Volatility analysis parameters.
    pub volatility: VolatilityConfig,
}

/// Everything produced by a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Size and coverage of the input.
    pub overview: DatasetOverview,
    /// Observations per year.
    pub availability: Vec<YearCount>,
    /// Per-row derived columns.
    pub analysis: Vec<AnalysisRow>,
    /// Summary per year.
    pub world_trends: Vec<GroupSummary>,
    /// Summary per (year, continent).
    pub continent_trends: Vec<GroupSummary>,
    /// Inequality per year.
    pub inequality: Vec<InequalityRecord>,
    /// One report per configured crisis window.
    pub crises: Vec<CrisisReport>,
    /// Growth champions and laggards.
    pub rankings: GrowthRankings,
    /// Leaders table, absent for an empty panel.
    pub leaders: Option<Leaders>,
    /// Volatility of the configured entities.
    pub volatility: Vec<VolatilityRecord>,
}
