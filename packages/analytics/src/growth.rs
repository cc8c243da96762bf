//! Year-over-year growth rates.

use gdp_trends_analytics_models::GrowthRow;
use gdp_trends_panel::{EntitySeries, Panel};

use crate::stats::percent_change;

/// Computes the growth rate of every row, sorted by entity then year.
///
/// The rate compares each observation with the entity's previous
/// observation, however many calendar years apart they are. The first
/// observation of each entity, and any observation following a zero, has
/// no rate.
#[must_use]
pub fn growth_rates(panel: &Panel) -> Vec<GrowthRow> {
    panel
        .series_by_name()
        .iter()
        .flat_map(|series| {
            series_growth(series)
                .into_iter()
                .zip(series.rows())
                .map(|(growth_rate, row)| GrowthRow {
                    entity: row.entity.clone(),
                    year: row.year,
                    value: row.value,
                    growth_rate,
                })
        })
        .collect()
}

/// Growth rates of a single series, aligned with its rows.
pub(crate) fn series_growth(series: &EntitySeries<'_>) -> Vec<Option<f64>> {
    let mut previous: Option<f64> = None;
    series
        .values()
        .map(|value| {
            let rate = previous.and_then(|prev| percent_change(prev, value));
            previous = Some(value);
            rate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use gdp_trends_panel_models::PanelRow;

    use super::*;

    fn panel(rows: Vec<PanelRow>) -> Panel {
        Panel::new("gdp", rows).unwrap()
    }

    #[test]
    fn first_observation_has_no_rate() {
        let rows = growth_rates(&panel(vec![
            PanelRow::new("Chad", 2001, 110.0),
            PanelRow::new("Chad", 2000, 100.0),
            PanelRow::new("Chad", 2002, 99.0),
        ]));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 2000);
        assert_eq!(rows[0].growth_rate, None);
        assert!((rows[1].growth_rate.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(rows[2].growth_rate, Some((99.0 - 110.0) / 110.0 * 100.0));
    }

    #[test]
    fn rows_are_sorted_by_entity_then_year() {
        let rows = growth_rates(&panel(vec![
            PanelRow::new("Peru", 2000, 1.0),
            PanelRow::new("Chad", 2001, 2.0),
            PanelRow::new("Chad", 2000, 1.0),
        ]));
        let keys: Vec<(&str, i32)> = rows.iter().map(|r| (r.entity.as_str(), r.year)).collect();
        assert_eq!(keys, vec![("Chad", 2000), ("Chad", 2001), ("Peru", 2000)]);
    }

    #[test]
    fn gaps_compare_with_previous_observation() {
        let rows = growth_rates(&panel(vec![
            PanelRow::new("Chad", 2000, 100.0),
            PanelRow::new("Chad", 2005, 150.0),
        ]));
        assert_eq!(rows[1].growth_rate, Some(50.0));
    }

    #[test]
    fn previous_zero_is_undefined() {
        let rows = growth_rates(&panel(vec![
            PanelRow::new("Chad", 2000, 0.0),
            PanelRow::new("Chad", 2001, 10.0),
            PanelRow::new("Chad", 2002, 0.0),
        ]));
        assert_eq!(rows[1].growth_rate, None);
        assert_eq!(rows[2].growth_rate, Some(-100.0));
    }

    #[test]
    fn empty_panel_yields_no_rows() {
        assert!(growth_rates(&panel(Vec::new())).is_empty());
    }
}
