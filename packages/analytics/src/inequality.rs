//! Cross-sectional inequality per year.

use std::collections::BTreeMap;

use gdp_trends_analytics_models::InequalityRecord;
use gdp_trends_panel::Panel;
use gdp_trends_panel_models::Year;

use crate::stats::{min_max, sample_std_dev};

/// Computes inequality measures for every year observed for at least
/// `min_entities` entities, ascending by year.
#[must_use]
pub fn inequality(panel: &Panel, min_entities: usize) -> Vec<InequalityRecord> {
    let mut by_year: BTreeMap<Year, Vec<f64>> = BTreeMap::new();
    for row in panel.rows() {
        by_year.entry(row.year).or_default().push(row.value);
    }

    by_year
        .into_iter()
        .filter_map(|(year, mut values)| {
            if values.len() < min_entities {
                log::debug!(
                    "Skipping inequality for {year}: {} entities (need {min_entities})",
                    values.len()
                );
                return None;
            }
            values.sort_by(f64::total_cmp);
            let (min, max) = min_max(&values)?;
            Some(InequalityRecord {
                year,
                count: values.len(),
                max,
                min,
                ratio: (min > 0.0).then(|| max / min),
                gini_approx: gini_approx(&values),
                std_dev: sample_std_dev(&values),
            })
        })
        .collect()
}

/// Rank-weighted Gini approximation over values sorted ascending:
/// `(2 * sum(i * v_i) - (n + 1) * sum(v_i)) / (n * sum(v_i))` with 1-based
/// ranks `i`. Undefined for an empty slice or a zero sum.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gini_approx(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len() as f64;
    let sum: f64 = sorted.iter().sum();
    if sorted.is_empty() || sum == 0.0 {
        return None;
    }
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum();
    Some((2.0 * weighted - (n + 1.0) * sum) / (n * sum))
}

#[cfg(test)]
mod tests {
    use gdp_trends_panel_models::PanelRow;

    use super::*;

    fn year_of(year: Year, values: &[f64]) -> Vec<PanelRow> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| PanelRow::new(format!("E{i}"), year, v))
            .collect()
    }

    #[test]
    fn years_below_threshold_are_omitted() {
        let mut rows = year_of(2000, &[1.0; 9]);
        rows.extend(year_of(2001, &(1..=10).map(f64::from).collect::<Vec<_>>()));
        let panel = Panel::new("gdp", rows).unwrap();

        let records = inequality(&panel, 10);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.year, 2001);
        assert_eq!(record.count, 10);
        assert_eq!(record.max, 10.0);
        assert_eq!(record.min, 1.0);
        assert_eq!(record.ratio, Some(10.0));
    }

    #[test]
    fn equal_values_have_zero_gini() {
        let gini = gini_approx(&[5.0; 12]).unwrap();
        assert!(gini.abs() < 1e-12);
    }

    #[test]
    fn gini_matches_rank_weighted_formula() {
        // (2 * (1*1 + 2*2 + 3*3) - 4 * 6) / (3 * 6) = 4 / 18
        let gini = gini_approx(&[1.0, 2.0, 3.0]).unwrap();
        assert!((gini - 4.0 / 18.0).abs() < 1e-12);
    }

    #[test]
    fn gini_of_zero_sum_is_undefined() {
        assert_eq!(gini_approx(&[0.0, 0.0]), None);
        assert_eq!(gini_approx(&[]), None);
    }

    #[test]
    fn zero_minimum_has_no_ratio() {
        let panel = Panel::new("gdp", year_of(2000, &[0.0, 5.0])).unwrap();
        let records = inequality(&panel, 2);
        assert_eq!(records[0].ratio, None);
        assert!(records[0].gini_approx.is_some());
        assert!(records[0].std_dev.is_some());
    }

    #[test]
    fn output_is_sorted_by_year() {
        let mut rows = year_of(2005, &[1.0, 2.0]);
        rows.extend(year_of(1990, &[3.0, 4.0]));
        let panel = Panel::new("gdp", rows).unwrap();
        let years: Vec<Year> = inequality(&panel, 2).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1990, 2005]);
    }
}
