#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Panel dataset container for GDP per capita analysis.
//!
//! A [`Panel`] owns the cleaned rows of one indicator and guarantees that
//! every (entity, year) pair appears at most once and that every value is
//! finite and non-negative. Analytics borrow the panel immutably and
//! derive new tables from it.

pub mod loader;
pub mod series;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use gdp_trends_panel_models::{Continent, DatasetOverview, PanelRow, Year, YearCount};

pub use series::EntitySeries;

/// Errors that can occur while building or loading a panel.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// A data row could not be parsed.
    #[error("Malformed row at line {line}: {message}")]
    MalformedRow {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The same (entity, year) pair appears more than once.
    #[error("Duplicate observation for {entity} in {year}")]
    DuplicateObservation {
        /// Entity name.
        entity: String,
        /// Observation year.
        year: Year,
    },

    /// An indicator value is negative or not finite.
    #[error("Invalid value {value} for {entity} in {year}: expected a finite non-negative number")]
    InvalidValue {
        /// Entity name.
        entity: String,
        /// Observation year.
        year: Year,
        /// The rejected value.
        value: f64,
    },
}

/// An immutable panel of (entity, year, value) observations for a single
/// indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    indicator: String,
    rows: Vec<PanelRow>,
}

impl Panel {
    /// Builds a panel, validating its invariants.
    ///
    /// Row order is preserved; it defines the "natural input order" used to
    /// break ties in rankings.
    ///
    /// # Errors
    ///
    /// * [`PanelError::InvalidValue`] if any value is negative or not finite
    /// * [`PanelError::DuplicateObservation`] if an (entity, year) pair
    ///   occurs twice
    pub fn new(indicator: impl Into<String>, rows: Vec<PanelRow>) -> Result<Self, PanelError> {
        let mut seen: HashSet<(&str, Year)> = HashSet::with_capacity(rows.len());

        for row in &rows {
            if !row.value.is_finite() || row.value < 0.0 {
                return Err(PanelError::InvalidValue {
                    entity: row.entity.clone(),
                    year: row.year,
                    value: row.value,
                });
            }
            if !seen.insert((row.entity.as_str(), row.year)) {
                return Err(PanelError::DuplicateObservation {
                    entity: row.entity.clone(),
                    year: row.year,
                });
            }
        }

        Ok(Self {
            indicator: indicator.into(),
            rows,
        })
    }

    /// Name of the indicator column the values were read from.
    #[must_use]
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// All rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the panel has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct entity names in order of first appearance.
    #[must_use]
    pub fn entities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.entity.as_str())
            .filter(|entity| seen.insert(*entity))
            .collect()
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<Year> {
        self.rows
            .iter()
            .map(|row| row.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The most recent year with at least one observation.
    #[must_use]
    pub fn latest_year(&self) -> Option<Year> {
        self.rows.iter().map(|row| row.year).max()
    }

    /// Rows observed in `year`, in input order.
    pub fn rows_for_year(&self, year: Year) -> impl Iterator<Item = &PanelRow> {
        self.rows.iter().filter(move |row| row.year == year)
    }

    /// Per-entity time series in order of first appearance. Each series is
    /// sorted by year.
    #[must_use]
    pub fn series(&self) -> Vec<EntitySeries<'_>> {
        series::group_by_entity(&self.rows)
    }

    /// Per-entity time series sorted by entity name, each sorted by year.
    #[must_use]
    pub fn series_by_name(&self) -> Vec<EntitySeries<'_>> {
        let mut series = self.series();
        series.sort_by(|a, b| a.entity().cmp(b.entity()));
        series
    }

    /// Returns a new panel restricted to entities with at least
    /// `min_observations` observed years.
    #[must_use]
    pub fn with_min_observations(&self, min_observations: usize) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.entity.as_str()).or_insert(0) += 1;
        }

        let rows: Vec<PanelRow> = self
            .rows
            .iter()
            .filter(|row| counts.get(row.entity.as_str()).copied().unwrap_or(0) >= min_observations)
            .cloned()
            .collect();

        log::debug!(
            "Kept {} of {} rows for entities with at least {min_observations} observations",
            rows.len(),
            self.rows.len()
        );

        Self {
            indicator: self.indicator.clone(),
            rows,
        }
    }

    /// Number of observed entities per year, ascending by year.
    #[must_use]
    pub fn year_counts(&self) -> Vec<YearCount> {
        let mut counts: BTreeMap<Year, usize> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.year).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    }

    /// Entities whose rows carry [`Continent::Other`], sorted by name.
    #[must_use]
    pub fn unmapped_entities(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.continent == Continent::Other)
            .map(|row| row.entity.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Summarizes the size and coverage of the panel.
    #[must_use]
    pub fn overview(&self) -> DatasetOverview {
        let years = self.years();
        DatasetOverview {
            indicator: self.indicator.clone(),
            records: self.rows.len(),
            entities: self.entities().len(),
            first_year: years.first().copied(),
            last_year: years.last().copied(),
            unmapped_entities: self
                .unmapped_entities()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
