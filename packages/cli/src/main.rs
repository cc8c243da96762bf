#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for GDP per capita trend analysis.
//!
//! Loads the panel CSV once, then either prints one derived table to the
//! terminal or (`analyze`) runs every calculator and exports the results
//! as flat files for the plotting layer.
//!
//! Uses `indicatif-log-bridge` (via [`gdp_trends_cli_utils::init_logger`])
//! so that log lines and the export progress bar never fight for the
//! terminal. Set `RUST_LOG=info` to see loader statistics.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gdp_trends_analytics_models::GroupBy;
use gdp_trends_config::Config;
use gdp_trends_panel::loader::{LoadOptions, load_csv};
use gdp_trends_panel_models::Year;

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// Analyze GDP per capita trends across countries and continents.
#[derive(Parser)]
#[command(name = "gdp_trends")]
#[command(about = "Analyze GDP per capita trends across countries and continents")]
struct Cli {
    /// Path to the panel CSV (`Entity`, `Code`, `Year` and an indicator).
    #[arg(long, default_value = "data/gdp-per-capita-worldbank.csv")]
    input: PathBuf,

    /// Indicator column to analyze (default: first non-key column).
    #[arg(long)]
    indicator: Option<String>,

    /// TOML file overriding the default configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run every analysis and export the derived tables.
    Analyze {
        /// Output directory (default: `output.dir` from the config).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show dataset size, year coverage and unmapped entities.
    Overview,

    /// Show mean, median and spread per year or per continent.
    Summary {
        /// Grouping of the summary.
        #[arg(long, value_enum, default_value_t = SummaryBy::Year)]
        by: SummaryBy,
    },

    /// Show growth rates and moving averages.
    Growth {
        /// Restrict the output to one entity.
        #[arg(long)]
        entity: Option<String>,
    },

    /// Show crisis impacts (default: every configured window).
    Crisis {
        /// Name of the crisis window (e.g. `covid_crisis`).
        name: Option<String>,
    },

    /// Show inequality measures per year.
    Inequality,

    /// Show long-run growth champions and laggards.
    Rankings,

    /// Show the richest and poorest entities in a year.
    Leaders {
        /// Year to rank (default: from the config, else the latest year).
        #[arg(long)]
        year: Option<Year>,

        /// Number of entities at each end.
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show growth volatility of the configured entities.
    Volatility,

    /// Print the effective configuration as TOML.
    Config,
}

/// Grouping for the `summary` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SummaryBy {
    /// One row per year.
    Year,
    /// One row per year and continent.
    Continent,
}

impl From<SummaryBy> for GroupBy {
    fn from(value: SummaryBy) -> Self {
        match value {
            SummaryBy::Year => Self::Year,
            SummaryBy::Continent => Self::YearContinent,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = gdp_trends_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;

    if matches!(cli.command, Commands::Config) {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let options = LoadOptions {
        indicator_column: cli.indicator,
    };
    let panel = load_csv(&cli.input, &options)?;
    log::debug!(
        "Loaded {} rows from {}",
        panel.len(),
        cli.input.display()
    );
    let analysis = &config.analysis;

    match cli.command {
        Commands::Analyze { output } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            commands::analyze(&panel, &config, &multi)?;
        }
        Commands::Overview => commands::overview(&panel),
        Commands::Summary { by } => commands::summary(&panel, by.into()),
        Commands::Growth { entity } => {
            commands::growth(&panel, analysis.moving_average_window, entity.as_deref())?;
        }
        Commands::Crisis { name } => {
            commands::crisis(&panel, &analysis.crisis_windows, name.as_deref())?;
        }
        Commands::Inequality => commands::inequality(&panel, analysis.inequality_min_entities),
        Commands::Rankings => {
            commands::rankings(&panel, analysis.ranking_min_years, analysis.ranking_size);
        }
        Commands::Leaders { year, count } => commands::leaders(
            &panel,
            year.or(analysis.leaders.year),
            count.unwrap_or(analysis.leaders.count),
        ),
        Commands::Volatility => commands::volatility(&panel, &analysis.volatility),
        Commands::Config => {}
    }

    Ok(())
}
