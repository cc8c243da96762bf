//! Long-run growth champions and laggards.

use gdp_trends_analytics_models::{GrowthRankings, GrowthRecord};
use gdp_trends_panel::{EntitySeries, Panel};

/// Ranks entities with at least `min_years` observations by compound
/// annual growth rate.
///
/// The table keeps the order in which entities first appear in the panel.
/// `top` holds the `size` highest CAGRs (descending) and `bottom` the
/// `size` lowest (ascending); ties keep table order. Entities whose first
/// value is not positive, or whose observations span less than a year (or
/// more years than an `i32` holds), are left out.
#[must_use]
pub fn growth_rankings(panel: &Panel, min_years: usize, size: usize) -> GrowthRankings {
    let table: Vec<GrowthRecord> = panel
        .series()
        .iter()
        .filter(|series| series.len() >= min_years)
        .filter_map(growth_record)
        .collect();

    let mut descending: Vec<&GrowthRecord> = table.iter().collect();
    descending.sort_by(|a, b| b.cagr.total_cmp(&a.cagr));
    let top = descending.into_iter().take(size).cloned().collect();

    let mut ascending: Vec<&GrowthRecord> = table.iter().collect();
    ascending.sort_by(|a, b| a.cagr.total_cmp(&b.cagr));
    let bottom = ascending.into_iter().take(size).cloned().collect();

    log::debug!(
        "Ranked {} entities with at least {min_years} observations",
        table.len()
    );

    GrowthRankings { table, top, bottom }
}

fn growth_record(series: &EntitySeries<'_>) -> Option<GrowthRecord> {
    let first = series.first()?;
    let last = series.last()?;
    let years = last.year.checked_sub(first.year)?;
    if first.value <= 0.0 || years <= 0 {
        return None;
    }

    let ratio = last.value / first.value;
    Some(GrowthRecord {
        entity: series.entity().to_string(),
        start_year: first.year,
        end_year: last.year,
        start_value: first.value,
        end_value: last.value,
        total_growth: (last.value - first.value) / first.value * 100.0,
        cagr: (ratio.powf(1.0 / f64::from(years)) - 1.0) * 100.0,
        years,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use gdp_trends_panel_models::PanelRow;

    use super::*;

    fn two_point(entity: &str, start: f64, end: f64) -> Vec<PanelRow> {
        vec![
            PanelRow::new(entity, 2000, start),
            PanelRow::new(entity, 2010, end),
        ]
    }

    #[test]
    fn cagr_of_doubling_over_ten_years() {
        let panel = Panel::new("gdp", two_point("Chad", 100.0, 200.0)).unwrap();
        let rankings = growth_rankings(&panel, 2, 10);
        let record = &rankings.table[0];
        assert_eq!(record.years, 10);
        assert!((record.total_growth - 100.0).abs() < 1e-9);
        assert!((record.cagr - (2.0_f64.powf(0.1) - 1.0) * 100.0).abs() < 1e-9);
        assert!((record.cagr - 7.177).abs() < 1e-3);
    }

    #[test]
    fn entities_below_min_years_are_excluded() {
        let mut rows = two_point("Chad", 100.0, 200.0);
        rows.push(PanelRow::new("Chad", 2005, 150.0));
        rows.extend(two_point("Peru", 100.0, 300.0));
        let panel = Panel::new("gdp", rows).unwrap();
        let rankings = growth_rankings(&panel, 3, 10);
        assert_eq!(rankings.table.len(), 1);
        assert_eq!(rankings.table[0].entity, "Chad");
    }

    #[test]
    fn non_positive_start_or_single_year_is_excluded() {
        let mut rows = two_point("Chad", 0.0, 200.0);
        rows.push(PanelRow::new("Peru", 2000, 5.0));
        let panel = Panel::new("gdp", rows).unwrap();
        assert!(growth_rankings(&panel, 1, 10).table.is_empty());
    }

    #[test]
    fn year_span_beyond_i32_is_excluded() {
        let rows = vec![
            PanelRow::new("Chad", i32::MIN, 100.0),
            PanelRow::new("Chad", i32::MAX, 200.0),
        ];
        let panel = Panel::new("gdp", rows).unwrap();
        assert!(growth_rankings(&panel, 2, 10).table.is_empty());
    }

    #[test]
    fn top_and_bottom_are_ordered_and_stable() {
        let mut rows = Vec::new();
        for (entity, end) in [("A", 150.0), ("B", 300.0), ("C", 150.0), ("D", 50.0)] {
            rows.extend(two_point(entity, 100.0, end));
        }
        let panel = Panel::new("gdp", rows).unwrap();
        let rankings = growth_rankings(&panel, 2, 2);

        let names = |records: &[GrowthRecord]| -> Vec<String> {
            records.iter().map(|r| r.entity.clone()).collect()
        };
        assert_eq!(names(&rankings.table), vec!["A", "B", "C", "D"]);
        assert_eq!(names(&rankings.top), vec!["B", "A"]);
        assert_eq!(names(&rankings.bottom), vec!["D", "A"]);
    }

    #[test]
    fn top_and_bottom_are_disjoint_with_many_entities() {
        let mut rows = Vec::new();
        for i in 0..25_u32 {
            rows.extend(two_point(&format!("E{i}"), 100.0, 100.0 + f64::from(i) * 10.0));
        }
        let panel = Panel::new("gdp", rows).unwrap();
        let rankings = growth_rankings(&panel, 2, 10);

        let top: HashSet<&str> = rankings.top.iter().map(|r| r.entity.as_str()).collect();
        let bottom: HashSet<&str> = rankings.bottom.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(top.len(), 10);
        assert_eq!(bottom.len(), 10);
        assert!(top.is_disjoint(&bottom));
        assert_eq!(rankings.top[0].entity, "E24");
        assert_eq!(rankings.bottom[0].entity, "E0");
    }
}
