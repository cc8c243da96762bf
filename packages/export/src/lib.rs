#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Flat-file export of derived GDP trend tables.
//!
//! Each table of an [`AnalysisReport`] is written to the output directory
//! under a fixed name (`world_trends.csv`, `crisis_covid_crisis.json`, ...)
//! in every configured format, followed by `report.json` holding the whole
//! report. Undefined values become empty CSV cells and JSON `null`s.

pub mod progress;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gdp_trends_analytics_models::AnalysisReport;
use gdp_trends_config::{ExportFormat, OutputConfig};
use serde::Serialize;

use crate::progress::ProgressCallback;

/// Name of the file holding the complete report.
pub const REPORT_FILE: &str = "report.json";

/// Tables written for every report, in addition to one per crisis window.
const FIXED_TABLES: u64 = 12;

/// Errors that can occur while exporting tables.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error (directory creation, file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table name that is not a plain file stem.
    #[error("Invalid table name '{name}'")]
    InvalidTableName {
        /// The rejected name.
        name: String,
    },
}

/// Flat form of the dataset overview for CSV output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverviewRow<'a> {
    indicator: &'a str,
    records: usize,
    entities: usize,
    first_year: Option<i32>,
    last_year: Option<i32>,
    unmapped_entities: String,
}

/// Writes `rows` as CSV with a header row derived from the field names.
///
/// The header comes from the first serialized row, so an empty slice
/// produces an empty (0-byte) document with no header.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the write fails.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `value` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the write fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes one table to `dir/<name>.<ext>` in the given format.
///
/// `name` may only hold ASCII letters, digits, `_` and `-`, so the file
/// always lands directly inside `dir`.
///
/// # Errors
///
/// * [`ExportError::InvalidTableName`] if `name` is not a plain file stem
/// * [`ExportError`] if the file cannot be created or written
pub fn write_table<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ExportError::InvalidTableName {
            name: name.to_string(),
        });
    }

    let path = dir.join(format!("{name}.{}", format.extension()));
    let writer = BufWriter::new(File::create(&path)?);
    match format {
        ExportFormat::Csv => write_csv(writer, rows)?,
        ExportFormat::Json => write_json(writer, rows)?,
    }
    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Writes every table of `report` plus [`REPORT_FILE`] into the output
/// directory, creating it if needed. Returns the written paths in order.
///
/// Every table is written even when it has no rows. An empty CSV table is
/// a 0-byte file without a header row and an empty JSON table is `[]`.
/// Readers should treat a 0-byte CSV as a table with no rows.
///
/// # Errors
///
/// Returns [`ExportError`] on the first table that fails to write.
pub fn export_report(
    report: &AnalysisReport,
    output: &OutputConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(&output.dir)?;

    let crisis_count = u64::try_from(report.crises.len()).unwrap_or(u64::MAX);
    progress.set_total(FIXED_TABLES.saturating_add(crisis_count).saturating_add(1));

    let mut exporter = Exporter {
        output,
        progress,
        written: Vec::new(),
    };

    let overview = &report.overview;
    exporter.table(
        "overview",
        &[OverviewRow {
            indicator: &overview.indicator,
            records: overview.records,
            entities: overview.entities,
            first_year: overview.first_year,
            last_year: overview.last_year,
            unmapped_entities: overview.unmapped_entities.join("; "),
        }],
    )?;
    exporter.table("availability", &report.availability)?;
    exporter.table("analysis", &report.analysis)?;
    exporter.table("world_trends", &report.world_trends)?;
    exporter.table("continent_trends", &report.continent_trends)?;
    exporter.table("inequality", &report.inequality)?;
    for crisis in &report.crises {
        exporter.table(&format!("crisis_{}", crisis.window.name), &crisis.impacts)?;
    }
    exporter.table("growth_rankings", &report.rankings.table)?;
    exporter.table("growth_top", &report.rankings.top)?;
    exporter.table("growth_bottom", &report.rankings.bottom)?;

    let (leaders_top, leaders_bottom) = report
        .leaders
        .as_ref()
        .map_or((&[][..], &[][..]), |l| (l.top.as_slice(), l.bottom.as_slice()));
    exporter.table("leaders_top", leaders_top)?;
    exporter.table("leaders_bottom", leaders_bottom)?;
    exporter.table("volatility", &report.volatility)?;

    let report_path = output.dir.join(REPORT_FILE);
    progress.set_message(REPORT_FILE.to_string());
    write_json(BufWriter::new(File::create(&report_path)?), report)?;
    progress.inc(1);
    exporter.written.push(report_path);

    let written = exporter.written;
    progress.finish(format!(
        "Exported {} files to {}",
        written.len(),
        output.dir.display()
    ));
    log::info!("Exported {} files to {}", written.len(), output.dir.display());

    Ok(written)
}

struct Exporter<'a> {
    output: &'a OutputConfig,
    progress: &'a Arc<dyn ProgressCallback>,
    written: Vec<PathBuf>,
}

impl Exporter<'_> {
    fn table<T: Serialize>(&mut self, name: &str, rows: &[T]) -> Result<(), ExportError> {
        self.progress.set_message(name.to_string());
        for &format in &self.output.formats {
            self.written
                .push(write_table(&self.output.dir, name, rows, format)?);
        }
        self.progress.inc(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gdp_trends_analytics_models::{
        CrisisImpact, CrisisReport, CrisisWindow, GrowthRankings, GrowthRow,
    };
    use gdp_trends_panel_models::{DatasetOverview, YearCount};

    use super::*;
    use crate::progress::null_progress;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn csv_leaves_undefined_cells_empty() {
        let rows = vec![
            GrowthRow {
                entity: "Chad".to_string(),
                year: 2000,
                value: 100.0,
                growth_rate: None,
            },
            GrowthRow {
                entity: "Chad".to_string(),
                year: 2001,
                value: 110.0,
                growth_rate: Some(10.0),
            },
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        assert_eq!(
            text(out),
            "entity,year,value,growthRate\nChad,2000,100.0,\nChad,2001,110.0,10.0\n"
        );
    }

    #[test]
    fn empty_tables_have_no_csv_header_and_an_empty_json_array() {
        let rows: Vec<GrowthRow> = Vec::new();
        let mut csv_out = Vec::new();
        write_csv(&mut csv_out, &rows).unwrap();
        assert!(csv_out.is_empty());

        let mut json_out = Vec::new();
        write_json(&mut json_out, &rows).unwrap();
        assert_eq!(text(json_out), "[]\n");
    }

    #[test]
    fn table_names_cannot_leave_the_output_directory() {
        let dir = std::env::temp_dir().join("gdp_trends_export_names");
        std::fs::create_dir_all(&dir).unwrap();
        let rows: Vec<GrowthRow> = Vec::new();

        for name in ["../escaped", "nested/table", "", ".."] {
            let err = write_table(&dir, name, &rows, ExportFormat::Csv).unwrap_err();
            assert!(matches!(err, ExportError::InvalidTableName { .. }), "{name}");
        }

        let path = write_table(&dir, "crisis_dot-com", &rows, ExportFormat::Csv).unwrap();
        assert_eq!(path, dir.join("crisis_dot-com.csv"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn json_writes_null_for_undefined() {
        let impact = CrisisImpact {
            entity: "Chad".to_string(),
            pre_crisis: 0.0,
            during_crisis: 5.0,
            impact: None,
        };
        let mut out = Vec::new();
        write_json(&mut out, &[impact]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text(out)).unwrap();
        assert_eq!(value[0]["impact"], serde_json::Value::Null);
        assert_eq!(value[0]["preCrisis"], 0.0);
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            overview: DatasetOverview {
                indicator: "gdp".to_string(),
                records: 2,
                entities: 1,
                first_year: Some(2000),
                last_year: Some(2001),
                unmapped_entities: vec!["World".to_string()],
            },
            availability: vec![YearCount { year: 2000, count: 1 }],
            analysis: Vec::new(),
            world_trends: Vec::new(),
            continent_trends: Vec::new(),
            inequality: Vec::new(),
            crises: vec![CrisisReport {
                window: CrisisWindow {
                    name: "covid_crisis".to_string(),
                    pre_years: vec![2019],
                    during_years: vec![2020],
                },
                impacts: Vec::new(),
            }],
            rankings: GrowthRankings::default(),
            leaders: None,
            volatility: Vec::new(),
        }
    }

    #[test]
    fn exports_every_table_and_the_report() {
        let dir = std::env::temp_dir().join("gdp_trends_export_test");
        let _ = std::fs::remove_dir_all(&dir);
        let output = OutputConfig {
            dir: dir.clone(),
            formats: vec![ExportFormat::Csv, ExportFormat::Json],
        };

        let written = export_report(&report(), &output, &null_progress()).unwrap();
        assert_eq!(written.len(), 13 * 2 + 1);
        assert!(dir.join("crisis_covid_crisis.csv").exists());
        assert!(dir.join("leaders_top.json").exists());
        assert_eq!(written.last(), Some(&dir.join(REPORT_FILE)));

        let overview = std::fs::read_to_string(dir.join("overview.csv")).unwrap();
        assert_eq!(
            overview,
            "indicator,records,entities,firstYear,lastYear,unmappedEntities\ngdp,2,1,2000,2001,World\n"
        );

        let report_json = std::fs::read_to_string(dir.join(REPORT_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report_json).unwrap();
        assert_eq!(value["crises"][0]["window"]["name"], "covid_crisis");
        assert_eq!(value["leaders"], serde_json::Value::Null);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
