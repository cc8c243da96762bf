//! Grouped descriptive statistics by year or by (year, continent).

use std::collections::BTreeMap;

use gdp_trends_analytics_models::{GroupBy, GroupSummary};
use gdp_trends_panel::Panel;
use gdp_trends_panel_models::{Continent, Year};

use crate::stats::{mean, median, min_max, sample_std_dev};

/// Summarizes the panel per group, ordered by key.
///
/// Only non-empty groups produce a record. For [`GroupBy::Year`] the
/// `continent` of each record is `None`.
#[must_use]
pub fn summarize(panel: &Panel, group_by: GroupBy) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<(Year, Option<Continent>), Vec<f64>> = BTreeMap::new();
    for row in panel.rows() {
        let continent = match group_by {
            GroupBy::Year => None,
            GroupBy::YearContinent => Some(row.continent),
        };
        groups.entry((row.year, continent)).or_default().push(row.value);
    }

    groups
        .into_iter()
        .filter_map(|((year, continent), values)| {
            let (min, max) = min_max(&values)?;
            Some(GroupSummary {
                year,
                continent,
                mean: mean(&values)?,
                median: median(&values)?,
                std_dev: sample_std_dev(&values),
                min,
                max,
                count: values.len(),
            })
        })
        .collect()
}

/// Summary per year.
#[must_use]
pub fn world_trends(panel: &Panel) -> Vec<GroupSummary> {
    summarize(panel, GroupBy::Year)
}

/// Summary per (year, continent).
#[must_use]
pub fn continent_trends(panel: &Panel) -> Vec<GroupSummary> {
    summarize(panel, GroupBy::YearContinent)
}
