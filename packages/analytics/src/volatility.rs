//! Growth volatility of selected entities.

use std::collections::HashMap;

use gdp_trends_analytics_models::VolatilityRecord;
use gdp_trends_panel::{EntitySeries, Panel};

use crate::growth::series_growth;
use crate::stats::{mean, sample_std_dev};

/// Default number of observations an entity must exceed to be analyzed.
pub const DEFAULT_MIN_OBSERVATIONS: usize = 5;

/// Computes the volatility (sample standard deviation) and mean of the
/// growth rates of each listed entity, in list order.
///
/// Entities absent from the panel or with `min_observations` observations
/// or fewer are skipped.
#[must_use]
pub fn growth_volatility<S: AsRef<str>>(
    panel: &Panel,
    entities: &[S],
    min_observations: usize,
) -> Vec<VolatilityRecord> {
    let all_series = panel.series();
    let by_entity: HashMap<&str, &EntitySeries<'_>> =
        all_series.iter().map(|s| (s.entity(), s)).collect();

    entities
        .iter()
        .filter_map(|entity| {
            let entity = entity.as_ref();
            let Some(series) = by_entity.get(entity) else {
                log::debug!("Skipping volatility for {entity}: not in panel");
                return None;
            };
            if series.len() <= min_observations {
                log::debug!(
                    "Skipping volatility for {entity}: {} observations (need more than {min_observations})",
                    series.len()
                );
                return None;
            }

            let rates: Vec<f64> = series_growth(series).into_iter().flatten().collect();
            Some(VolatilityRecord {
                entity: entity.to_string(),
                observations: series.len(),
                volatility: sample_std_dev(&rates),
                average_growth: mean(&rates),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use gdp_trends_panel_models::PanelRow;

    use super::*;

    fn series(entity: &str, values: &[f64]) -> Vec<PanelRow> {
        values
            .iter()
            .zip(2000..)
            .map(|(&v, year)| PanelRow::new(entity, year, v))
            .collect()
    }

    #[test]
    fn volatility_of_growth_rates() {
        let mut rows = series("Chad", &[100.0, 110.0, 121.0, 108.9]);
        rows.extend(series("Peru", &[1.0, 2.0]));
        let panel = Panel::new("gdp", rows).unwrap();

        let records = growth_volatility(&panel, &["Peru", "Chad", "Fiji"], 2);
        assert_eq!(records.len(), 1);
        let chad = &records[0];
        assert_eq!(chad.entity, "Chad");
        assert_eq!(chad.observations, 4);

        let rates = [10.0, 10.0, -10.0];
        let expected_mean = 10.0 / 3.0;
        assert!((chad.average_growth.unwrap() - expected_mean).abs() < 1e-9);
        let expected_std = (rates
            .iter()
            .map(|r| (r - expected_mean).powi(2))
            .sum::<f64>()
            / 2.0)
            .sqrt();
        assert!((chad.volatility.unwrap() - expected_std).abs() < 1e-9);
    }

    #[test]
    fn keeps_list_order() {
        let mut rows = series("Chad", &[1.0, 2.0, 3.0]);
        rows.extend(series("Peru", &[1.0, 2.0, 3.0]));
        let panel = Panel::new("gdp", rows).unwrap();
        let entities = vec!["Peru".to_string(), "Chad".to_string()];
        let records = growth_volatility(&panel, &entities, 0);
        let names: Vec<&str> = records.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(names, vec!["Peru", "Chad"]);
    }
}
