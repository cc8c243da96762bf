#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for GDP per capita panels.
//!
//! Each public function is a pure transform from a borrowed [`Panel`] to an
//! owned derived table. Per-entity computations are folds over the
//! entity's year-ordered series; cross-sectional computations group rows
//! by year (and optionally continent).
//!
//! [`Panel`]: gdp_trends_panel::Panel

pub mod crisis;
pub mod growth;
pub mod inequality;
pub mod leaders;
pub mod moving_average;
pub mod prepare;
pub mod ranking;
pub mod report;
pub mod stats;
pub mod summary;
pub mod volatility;

pub use crisis::{crisis_impact, default_crisis_windows};
pub use growth::growth_rates;
pub use inequality::inequality;
pub use leaders::leaders;
pub use moving_average::moving_average;
pub use prepare::prepare_analysis;
pub use ranking::growth_rankings;
pub use report::analyze;
pub use summary::{continent_trends, summarize, world_trends};
pub use volatility::growth_volatility;

use thiserror::Error;

/// Default window of the trailing moving average.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
/// Default minimum number of entities for a year to get an inequality
/// record.
pub const DEFAULT_INEQUALITY_MIN_ENTITIES: usize = 10;
/// Default minimum number of observations to enter the growth rankings.
pub const DEFAULT_RANKING_MIN_YEARS: usize = 15;
/// Default size of the top and bottom growth rankings.
pub const DEFAULT_RANKING_SIZE: usize = 10;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A numeric parameter is outside its valid range.
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// A crisis window is empty or its year sets overlap.
    #[error("Invalid crisis window '{name}': {message}")]
    InvalidCrisisWindow {
        /// Name of the window.
        name: String,
        /// Description of what went wrong.
        message: String,
    },
}
