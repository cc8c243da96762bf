//! Per-entity time series views over a panel.

use std::collections::HashMap;

use gdp_trends_panel_models::PanelRow;

/// The observations of a single entity, sorted by year.
#[derive(Debug, Clone)]
pub struct EntitySeries<'a> {
    entity: &'a str,
    rows: Vec<&'a PanelRow>,
}

impl<'a> EntitySeries<'a> {
    /// Entity name.
    #[must_use]
    pub const fn entity(&self) -> &'a str {
        self.entity
    }

    /// Observations, ascending by year.
    #[must_use]
    pub fn rows(&self) -> &[&'a PanelRow] {
        &self.rows
    }

    /// Indicator values, ascending by year.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.value)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest observation.
    #[must_use]
    pub fn first(&self) -> Option<&'a PanelRow> {
        self.rows.first().copied()
    }

    /// Latest observation.
    #[must_use]
    pub fn last(&self) -> Option<&'a PanelRow> {
        self.rows.last().copied()
    }
}

/// Groups rows by entity, preserving the order in which entities first
/// appear. Rows inside each group are sorted by year.
pub(crate) fn group_by_entity(rows: &[PanelRow]) -> Vec<EntitySeries<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<EntitySeries<'_>> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.entity.as_str()).or_insert_with(|| {
            groups.push(EntitySeries {
                entity: row.entity.as_str(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row);
    }

    for group in &mut groups {
        group.rows.sort_by_key(|row| row.year);
    }

    groups
}
