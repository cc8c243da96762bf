#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Panel dataset types for GDP per capita analysis.
//!
//! A panel is indexed by (entity, year) pairs. Every row carries a single
//! non-negative indicator value (GDP per capita) and the continent the
//! entity belongs to, resolved once at load time from the static table in
//! [`continent`].

pub mod continent;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use continent::{Continent, ContinentLookup, continent_for};

/// Calendar year of an observation.
pub type Year = i32;

/// A single (entity, year) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRow {
    /// Country or aggregate name (e.g. "Germany", "World").
    pub entity: String,
    /// ISO 3166-1 alpha-3 code, when the source provides one.
    pub code: Option<String>,
    /// Observation year.
    pub year: Year,
    /// Indicator value. Always finite and non-negative.
    pub value: f64,
    /// Continent resolved from the entity name.
    pub continent: Continent,
}

impl PanelRow {
    /// Creates a row, resolving the continent from the entity name.
    #[must_use]
    pub fn new(entity: impl Into<String>, year: Year, value: f64) -> Self {
        let entity = entity.into();
        let continent = continent_for(&entity).resolve();
        Self {
            entity,
            code: None,
            year,
            value,
            continent,
        }
    }

    /// Sets the ISO code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// World Bank style income bracket for a GDP per capita value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IncomeCategory {
    /// Up to 5,000
    #[serde(rename = "Low Income")]
    #[strum(serialize = "Low Income")]
    Low,
    /// Above 5,000 up to 15,000
    #[serde(rename = "Lower Middle")]
    #[strum(serialize = "Lower Middle")]
    LowerMiddle,
    /// Above 15,000 up to 50,000
    #[serde(rename = "Upper Middle")]
    #[strum(serialize = "Upper Middle")]
    UpperMiddle,
    /// Above 50,000
    #[serde(rename = "High Income")]
    #[strum(serialize = "High Income")]
    High,
}

impl IncomeCategory {
    /// Upper bound (inclusive) of the low income bracket.
    pub const LOW_MAX: f64 = 5_000.0;
    /// Upper bound (inclusive) of the lower middle bracket.
    pub const LOWER_MIDDLE_MAX: f64 = 15_000.0;
    /// Upper bound (inclusive) of the upper middle bracket.
    pub const UPPER_MIDDLE_MAX: f64 = 50_000.0;

    /// Classifies a value into a bracket.
    ///
    /// Brackets are right-inclusive and the lowest one is open at zero, so
    /// a value of exactly `0.0` (or anything non-positive or non-finite)
    /// has no category.
    #[must_use]
    pub fn classify(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Some(if value <= Self::LOW_MAX {
            Self::Low
        } else if value <= Self::LOWER_MIDDLE_MAX {
            Self::LowerMiddle
        } else if value <= Self::UPPER_MIDDLE_MAX {
            Self::UpperMiddle
        } else {
            Self::High
        })
    }
}

/// Number of observations recorded for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCount {
    /// The year.
    pub year: Year,
    /// Number of entities observed in that year.
    pub count: usize,
}

/// High-level description of a loaded panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOverview {
    /// Name of the indicator column.
    pub indicator: String,
    /// Total number of rows.
    pub records: usize,
    /// Number of distinct entities.
    pub entities: usize,
    /// Earliest observed year, if any rows exist.
    pub first_year: Option<Year>,
    /// Latest observed year, if any rows exist.
    pub last_year: Option<Year>,
    /// Entities that were not found in the continent table.
    pub unmapped_entities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_resolves_continent() {
        let row = PanelRow::new("France", 2000, 30_000.0);
        assert_eq!(row.continent, Continent::Europe);
        assert!(row.code.is_none());

        let row = PanelRow::new("World", 2000, 10_000.0).with_code("OWID_WRL");
        assert_eq!(row.continent, Continent::Other);
        assert_eq!(row.code.as_deref(), Some("OWID_WRL"));
    }

    #[test]
    fn income_brackets_are_right_inclusive() {
        assert_eq!(IncomeCategory::classify(0.0), None);
        assert_eq!(IncomeCategory::classify(1.0), Some(IncomeCategory::Low));
        assert_eq!(IncomeCategory::classify(5_000.0), Some(IncomeCategory::Low));
        assert_eq!(
            IncomeCategory::classify(5_000.01),
            Some(IncomeCategory::LowerMiddle)
        );
        assert_eq!(
            IncomeCategory::classify(15_000.0),
            Some(IncomeCategory::LowerMiddle)
        );
        assert_eq!(
            IncomeCategory::classify(50_000.0),
            Some(IncomeCategory::UpperMiddle)
        );
        assert_eq!(
            IncomeCategory::classify(50_000.5),
            Some(IncomeCategory::High)
        );
    }

    #[test]
    fn income_category_rejects_invalid_values() {
        assert_eq!(IncomeCategory::classify(-1.0), None);
        assert_eq!(IncomeCategory::classify(f64::NAN), None);
        assert_eq!(IncomeCategory::classify(f64::INFINITY), None);
    }

    #[test]
    fn income_category_labels() {
        assert_eq!(IncomeCategory::Low.to_string(), "Low Income");
        assert_eq!(IncomeCategory::High.as_ref(), "High Income");
    }
}
