//! Per-row derived columns for the analysis table.

use gdp_trends_analytics_models::AnalysisRow;
use gdp_trends_panel::Panel;
use gdp_trends_panel_models::IncomeCategory;

use crate::AnalyticsError;
use crate::growth::series_growth;
use crate::moving_average::{series_moving_average, validate_window};

/// Augments every row with its growth rate, `window`-observation moving
/// average, natural log and income category. Sorted by entity then year.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidParameter`] if `window` is zero
pub fn prepare_analysis(panel: &Panel, window: usize) -> Result<Vec<AnalysisRow>, AnalyticsError> {
    validate_window(window)?;

    let mut out = Vec::with_capacity(panel.len());
    for series in panel.series_by_name() {
        let growth = series_growth(&series);
        let averages = series_moving_average(&series, window);

        for ((row, yoy_growth), moving_average) in series.rows().iter().zip(growth).zip(averages) {
            out.push(AnalysisRow {
                entity: row.entity.clone(),
                code: row.code.clone(),
                year: row.year,
                continent: row.continent,
                value: row.value,
                yoy_growth,
                moving_average,
                log_value: natural_log(row.value),
                income_category: IncomeCategory::classify(row.value),
            });
        }
    }

    log::debug!("Prepared {} analysis rows", out.len());

    Ok(out)
}

fn natural_log(value: f64) -> Option<f64> {
    (value > 0.0).then(|| value.ln())
}
