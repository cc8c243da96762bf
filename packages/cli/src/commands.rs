//! Subcommand implementations: each prints one derived table.

use std::time::Instant;

use gdp_trends_analytics_models::{CrisisWindow, GroupBy, LeaderRow, VolatilityConfig};
use gdp_trends_cli_utils::{IndicatifProgress, MultiProgress};
use gdp_trends_config::Config;
use gdp_trends_panel::Panel;
use gdp_trends_panel_models::Year;

/// Formats an optional number, printing undefined values as `n/a`.
fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

// ---------------------------------------------------------------------------
// Analyze
// ---------------------------------------------------------------------------

/// Runs the full analysis and exports every table.
pub fn analyze(
    panel: &Panel,
    config: &Config,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let report = gdp_trends_analytics::analyze(panel, &config.analysis)?;
    log::info!(
        "Analysis: {} rows, {} inequality years, {} crisis windows, {} ranked entities",
        report.analysis.len(),
        report.inequality.len(),
        report.crises.len(),
        report.rankings.table.len()
    );

    let progress = IndicatifProgress::files_bar(multi, "Exporting");
    let written = gdp_trends_export::export_report(&report, &config.output, &progress)?;

    println!(
        "Analyzed {} rows of '{}' in {:.1}s",
        panel.len(),
        panel.indicator(),
        start.elapsed().as_secs_f64()
    );
    println!(
        "Wrote {} files to {}",
        written.len(),
        config.output.dir.display()
    );

    if let Some(leaders) = &report.leaders
        && let Some(richest) = leaders.top.first()
    {
        println!("Highest value in {}: {} ({:.0})", leaders.year, richest.entity, richest.value);
    }
    if let Some(champion) = report.rankings.top.first() {
        println!(
            "Fastest long-run growth: {} ({:.2}% per year, {}-{})",
            champion.entity, champion.cagr, champion.start_year, champion.end_year
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Prints dataset size, year coverage and unmapped entities.
pub fn overview(panel: &Panel) {
    let overview = panel.overview();

    println!("=== Dataset Overview ===");
    println!();
    println!("Indicator:  {}", overview.indicator);
    println!("Records:    {}", overview.records);
    println!("Entities:   {}", overview.entities);
    match (overview.first_year, overview.last_year) {
        (Some(first), Some(last)) => println!("Years:      {first}-{last}"),
        _ => println!("Years:      none"),
    }
    println!();

    println!("Observations per year:");
    for count in panel.year_counts() {
        println!("  {}  {:>5}", count.year, count.count);
    }

    if !overview.unmapped_entities.is_empty() {
        println!();
        println!(
            "Entities without a continent ({}):",
            overview.unmapped_entities.len()
        );
        for entity in &overview.unmapped_entities {
            println!("  {entity}");
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Prints grouped descriptive statistics.
pub fn summary(panel: &Panel, group_by: GroupBy) {
    let summaries = gdp_trends_analytics::summarize(panel, group_by);

    println!(
        "{:<6} {:<15} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Year", "Continent", "Count", "Mean", "Median", "Std Dev", "Min", "Max"
    );
    for s in &summaries {
        let continent = s.continent.map_or_else(|| "World".to_string(), |c| c.to_string());
        println!(
            "{:<6} {:<15} {:>6} {:>12.2} {:>12.2} {:>12} {:>12.2} {:>12.2}",
            s.year,
            continent,
            s.count,
            s.mean,
            s.median,
            opt(s.std_dev, 2),
            s.min,
            s.max
        );
    }
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Prints growth rates and moving averages, optionally for one entity.
pub fn growth(
    panel: &Panel,
    window: usize,
    entity: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = gdp_trends_analytics::prepare_analysis(panel, window)?;
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|row| entity.is_none_or(|e| row.entity == e))
        .collect();

    if rows.is_empty() {
        if let Some(entity) = entity {
            return Err(format!("No observations for '{entity}'").into());
        }
        println!("No observations.");
        return Ok(());
    }

    println!(
        "{:<30} {:>6} {:>12} {:>9} {:>12} {:<14}",
        "Entity",
        "Year",
        "Value",
        "Growth %",
        format!("MA({window})"),
        "Income"
    );
    for row in &rows {
        println!(
            "{:<30} {:>6} {:>12.2} {:>9} {:>12.2} {:<14}",
            row.entity,
            row.year,
            row.value,
            opt(row.yoy_growth, 2),
            row.moving_average,
            row.income_category
                .map_or_else(|| "n/a".to_string(), |c| c.to_string())
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Crisis
// ---------------------------------------------------------------------------

/// Prints crisis impacts for one named window, or for all of them.
pub fn crisis(
    panel: &Panel,
    windows: &[CrisisWindow],
    name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selected: Vec<&CrisisWindow> = windows
        .iter()
        .filter(|w| name.is_none_or(|n| w.name == n))
        .collect();

    if selected.is_empty() {
        let known: Vec<&str> = windows.iter().map(|w| w.name.as_str()).collect();
        return Err(format!(
            "Unknown crisis window '{}' (configured: {})",
            name.unwrap_or_default(),
            known.join(", ")
        )
        .into());
    }

    for window in selected {
        let report = gdp_trends_analytics::crisis_impact(panel, window)?;

        println!(
            "=== {} (pre {:?}, during {:?}) ===",
            window.name, window.pre_years, window.during_years
        );
        println!(
            "{:<30} {:>12} {:>12} {:>9}",
            "Entity", "Pre", "During", "Impact %"
        );
        for impact in &report.impacts {
            println!(
                "{:<30} {:>12.2} {:>12.2} {:>9}",
                impact.entity,
                impact.pre_crisis,
                impact.during_crisis,
                opt(impact.impact, 2)
            );
        }
        println!();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Inequality
// ---------------------------------------------------------------------------

/// Prints inequality measures per year.
pub fn inequality(panel: &Panel, min_entities: usize) {
    let records = gdp_trends_analytics::inequality(panel, min_entities);

    println!(
        "{:<6} {:>6} {:>12} {:>12} {:>9} {:>7} {:>12}",
        "Year", "Count", "Max", "Min", "Ratio", "Gini", "Std Dev"
    );
    for r in &records {
        println!(
            "{:<6} {:>6} {:>12.2} {:>12.2} {:>9} {:>7} {:>12}",
            r.year,
            r.count,
            r.max,
            r.min,
            opt(r.ratio, 1),
            opt(r.gini_approx, 3),
            opt(r.std_dev, 2)
        );
    }
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Prints the growth champions and laggards.
pub fn rankings(panel: &Panel, min_years: usize, size: usize) {
    let rankings = gdp_trends_analytics::growth_rankings(panel, min_years, size);

    println!(
        "{} entities with at least {min_years} observations",
        rankings.table.len()
    );

    for (title, records) in [
        ("Growth champions", &rankings.top),
        ("Growth laggards", &rankings.bottom),
    ] {
        println!();
        println!("=== {title} ===");
        println!(
            "{:<30} {:>11} {:>12} {:>12} {:>9} {:>8}",
            "Entity", "Years", "Start", "End", "Total %", "CAGR %"
        );
        for r in records {
            println!(
                "{:<30} {:>11} {:>12.2} {:>12.2} {:>9.1} {:>8.2}",
                r.entity,
                format!("{}-{}", r.start_year, r.end_year),
                r.start_value,
                r.end_value,
                r.total_growth,
                r.cagr
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Leaders
// ---------------------------------------------------------------------------

/// Prints the richest and poorest entities in a year.
pub fn leaders(panel: &Panel, year: Option<Year>, count: usize) {
    let Some(leaders) = gdp_trends_analytics::leaders(panel, year, count) else {
        println!("No observations.");
        return;
    };

    let print_rows = |title: &str, rows: &[LeaderRow]| {
        println!("=== {title} ({}) ===", leaders.year);
        for (rank, row) in rows.iter().enumerate() {
            println!(
                "{:>3}. {:<30} {:<15} {:>12.2}",
                rank + 1,
                row.entity,
                row.continent.to_string(),
                row.value
            );
        }
    };

    print_rows("Highest", &leaders.top);
    println!();
    print_rows("Lowest", &leaders.bottom);
}

// ---------------------------------------------------------------------------
// Volatility
// ---------------------------------------------------------------------------

/// Prints growth volatility of the configured entities.
pub fn volatility(panel: &Panel, config: &VolatilityConfig) {
    let records =
        gdp_trends_analytics::growth_volatility(panel, &config.entities, config.min_observations);

    println!(
        "{:<30} {:>6} {:>12} {:>14}",
        "Entity", "Obs", "Volatility", "Avg Growth %"
    );
    for r in &records {
        println!(
            "{:<30} {:>6} {:>12} {:>14}",
            r.entity,
            r.observations,
            opt(r.volatility, 2),
            opt(r.average_growth, 2)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_values_print_as_not_available() {
        assert_eq!(opt(None, 2), "n/a");
        assert_eq!(opt(Some(7.177_346), 2), "7.18");
        assert_eq!(opt(Some(-20.0), 1), "-20.0");
    }
}
