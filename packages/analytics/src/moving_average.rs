//! Trailing moving averages.

use gdp_trends_analytics_models::MovingAverageRow;
use gdp_trends_panel::{EntitySeries, Panel};

use crate::AnalyticsError;

/// Computes the trailing mean of up to `window` most recent observations
/// for every row, sorted by entity then year.
///
/// Windows are partial at the start of each series. Missing calendar years
/// are not backfilled; the window spans observations, not years.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidParameter`] if `window` is zero
pub fn moving_average(panel: &Panel, window: usize) -> Result<Vec<MovingAverageRow>, AnalyticsError> {
    validate_window(window)?;

    Ok(panel
        .series_by_name()
        .iter()
        .flat_map(|series| {
            series_moving_average(series, window)
                .into_iter()
                .zip(series.rows())
                .map(|(moving_average, row)| MovingAverageRow {
                    entity: row.entity.clone(),
                    year: row.year,
                    value: row.value,
                    moving_average,
                })
        })
        .collect())
}

pub(crate) fn validate_window(window: usize) -> Result<(), AnalyticsError> {
    if window == 0 {
        return Err(AnalyticsError::InvalidParameter {
            name: "moving_average_window",
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Moving averages of a single series, aligned with its rows.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn series_moving_average(series: &EntitySeries<'_>, window: usize) -> Vec<f64> {
    let values: Vec<f64> = series.values().collect();
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use gdp_trends_panel_models::PanelRow;

    use super::*;

    fn chad(values: &[f64]) -> Panel {
        let rows = values
            .iter()
            .zip(2000..)
            .map(|(&v, year)| PanelRow::new("Chad", year, v))
            .collect();
        Panel::new("gdp", rows).unwrap()
    }

    #[test]
    fn partial_windows_at_series_start() {
        let rows = moving_average(&chad(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 3).unwrap();
        let averages: Vec<f64> = rows.iter().map(|r| r.moving_average).collect();
        assert_eq!(averages, vec![1.0, 1.5, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn window_of_one_is_identity() {
        let rows = moving_average(&chad(&[7.0, 3.0]), 1).unwrap();
        assert!(rows.iter().all(|r| (r.moving_average - r.value).abs() < f64::EPSILON));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            moving_average(&chad(&[1.0]), 0),
            Err(AnalyticsError::InvalidParameter { name: "moving_average_window", .. })
        ));
    }

    #[test]
    fn series_do_not_leak_into_each_other() {
        let panel = Panel::new(
            "gdp",
            vec![
                PanelRow::new("Peru", 2000, 100.0),
                PanelRow::new("Chad", 2000, 1.0),
                PanelRow::new("Chad", 2001, 3.0),
            ],
        )
        .unwrap();
        let rows = moving_average(&panel, 5).unwrap();
        assert_eq!(rows[1].moving_average, 2.0);
        assert_eq!(rows[2].entity, "Peru");
        assert_eq!(rows[2].moving_average, 100.0);
    }
}
