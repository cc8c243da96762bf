#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Configuration for GDP trend analysis.
//!
//! The default configuration lives in `config/default.toml` and is baked
//! into the binary at compile time via [`include_str!`]. A user file only
//! needs the keys it changes: it is merged over the defaults table by
//! table, so overriding `analysis.ranking_size` leaves every other key at
//! its default. Arrays (such as `analysis.crisis_windows`) are replaced as
//! a whole.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use gdp_trends_analytics_models::AnalysisConfig;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default configuration embedded at compile time.
const DEFAULT_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML is malformed or has fields of the wrong type.
    #[error("TOML error: {message}")]
    Toml {
        /// Description of what went wrong.
        message: String,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// File format of exported tables.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Where and how derived tables are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory, created on demand.
    pub dir: PathBuf,
    /// Formats each table is written in.
    pub formats: Vec<ExportFormat>,
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Parameters of the analysis run.
    pub analysis: AnalysisConfig,
    /// Export settings.
    pub output: OutputConfig,
}

impl Config {
    /// Returns the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded TOML is malformed or invalid.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_overlay("")
    }

    /// Loads the defaults, overlaid with the file at `path` when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is malformed, or
    /// the merged configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::defaults();
        };
        log::info!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_overlay(&text)
    }

    /// Parses `overlay` as TOML and merges it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either document is malformed or the merged
    /// configuration is invalid.
    pub fn from_overlay(overlay: &str) -> Result<Self, ConfigError> {
        let mut merged = parse_table(DEFAULT_TOML)?;
        merge_tables(&mut merged, parse_table(overlay)?);

        let config: Self = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Toml {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value the analysis and export steps rely on.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Invalid`] naming the first offending key
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::Invalid {
            message: message.to_string(),
        };
        let analysis = &self.analysis;

        if analysis.moving_average_window == 0 {
            return Err(invalid("analysis.moving_average_window must be at least 1"));
        }
        if analysis.ranking_size == 0 {
            return Err(invalid("analysis.ranking_size must be at least 1"));
        }
        if analysis.leaders.count == 0 {
            return Err(invalid("analysis.leaders.count must be at least 1"));
        }
        if self.output.formats.is_empty() {
            return Err(invalid("output.formats must not be empty"));
        }

        let mut names = HashSet::new();
        for window in &analysis.crisis_windows {
            gdp_trends_analytics::crisis::validate_window(window).map_err(|e| {
                ConfigError::Invalid {
                    message: e.to_string(),
                }
            })?;
            if !names.insert(window.name.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!("duplicate crisis window '{}'", window.name),
                });
            }
        }

        Ok(())
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Toml {
            message: e.to_string(),
        })
    }
}

fn parse_table(text: &str) -> Result<toml::Table, ConfigError> {
    toml::from_str(text).map_err(|e: toml::de::Error| ConfigError::Toml {
        message: e.to_string(),
    })
}

/// Recursively merges `overlay` into `base`. Nested tables merge key by
/// key; any other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
