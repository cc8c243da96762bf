//! CSV loader for GDP per capita panels.
//!
//! Expects a header row with `Entity` and `Year` columns, an optional
//! `Code` column and at least one numeric indicator column. Unless a name
//! is given, the indicator is the first column that is not one of the key
//! columns (the layout of the Our World in Data exports, whose indicator
//! header reads e.g. `GDP per capita, PPP (constant 2021 international $)`).
//!
//! Rows with an empty, `NaN` or negative indicator are dropped. An infinite
//! indicator, or anything else that does not parse, fails the whole load
//! with the offending line number.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gdp_trends_panel_models::{PanelRow, Year};

use crate::{Panel, PanelError};

/// Header of the entity column.
pub const ENTITY_COLUMN: &str = "Entity";
/// Header of the optional ISO code column.
pub const CODE_COLUMN: &str = "Code";
/// Header of the year column.
pub const YEAR_COLUMN: &str = "Year";

const KEY_COLUMNS: &[&str] = &[ENTITY_COLUMN, CODE_COLUMN, YEAR_COLUMN];

/// Options controlling how a panel CSV is read.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Name of the indicator column. When `None`, the first non-key column
    /// is used.
    pub indicator_column: Option<String>,
}

/// Counters describing what the loader kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LoadStats {
    read: usize,
    /// Empty or `NaN` indicator.
    missing: usize,
    negative: usize,
}

/// Loads a panel from a CSV file.
///
/// # Errors
///
/// Returns [`PanelError`] if the file cannot be read, a required column is
/// missing, a row is malformed, or the cleaned rows violate the panel
/// invariants.
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<Panel, PanelError> {
    log::info!("Loading panel from {}", path.display());
    let file = File::open(path)?;
    load_csv_from_reader(BufReader::new(file), options)
}

/// Loads a panel from any CSV reader.
///
/// # Errors
///
/// See [`load_csv`].
pub fn load_csv_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Panel, PanelError> {
    let (panel, stats) = read_panel(reader, options)?;

    log::info!(
        "Read {} rows for '{}': kept {}, dropped {} missing and {} negative",
        stats.read,
        panel.indicator(),
        panel.len(),
        stats.missing,
        stats.negative
    );

    let unmapped = panel.unmapped_entities();
    if !unmapped.is_empty() {
        log::warn!(
            "{} entities have no continent mapping and were assigned to Other: {}",
            unmapped.len(),
            unmapped.join(", ")
        );
    }

    let overview = panel.overview();
    if let (Some(first), Some(last)) = (overview.first_year, overview.last_year) {
        log::info!(
            "Panel covers {} entities from {first} to {last}",
            overview.entities
        );
    }

    Ok(panel)
}

fn read_panel<R: Read>(reader: R, options: &LoadOptions) -> Result<(Panel, LoadStats), PanelError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let entity_idx = find_column(&headers, ENTITY_COLUMN)?;
    let year_idx = find_column(&headers, YEAR_COLUMN)?;
    let code_idx = headers.iter().position(|h| h == CODE_COLUMN);
    let (indicator, indicator_idx) = match options.indicator_column.as_deref() {
        Some(name) => (name.to_string(), find_column(&headers, name)?),
        None => headers
            .iter()
            .enumerate()
            .find(|(_, h)| !KEY_COLUMNS.contains(h))
            .map(|(i, h)| (h.to_string(), i))
            .ok_or_else(|| PanelError::MissingColumn {
                column: "indicator".to_string(),
            })?,
    };

    log::debug!("Using '{indicator}' (column {indicator_idx}) as the indicator");

    let mut stats = LoadStats::default();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        stats.read += 1;
        let line = record.position().map_or(0, csv::Position::line);
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let entity = field(entity_idx);
        if entity.is_empty() {
            return Err(PanelError::MalformedRow {
                line,
                message: "empty entity".to_string(),
            });
        }

        let raw_year = field(year_idx);
        let year: Year = raw_year.parse().map_err(|e| PanelError::MalformedRow {
            line,
            message: format!("invalid year '{raw_year}': {e}"),
        })?;

        let raw_value = field(indicator_idx);
        if raw_value.is_empty() {
            stats.missing += 1;
            continue;
        }
        let value: f64 = raw_value.parse().map_err(|e| PanelError::MalformedRow {
            line,
            message: format!("invalid value '{raw_value}': {e}"),
        })?;
        if value.is_nan() {
            stats.missing += 1;
            continue;
        }
        if value.is_infinite() {
            return Err(PanelError::MalformedRow {
                line,
                message: format!("non-finite value '{raw_value}'"),
            });
        }
        if value < 0.0 {
            stats.negative += 1;
            continue;
        }

        let mut row = PanelRow::new(entity, year, value);
        if let Some(code) = code_idx.map(field)
            && !code.is_empty()
        {
            row = row.with_code(code);
        }
        rows.push(row);
    }

    Ok((Panel::new(indicator, rows)?, stats))
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, PanelError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PanelError::MissingColumn {
            column: name.to_string(),
        })
}
