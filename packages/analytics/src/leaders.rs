//! Richest and poorest entities in a single year.

use gdp_trends_analytics_models::{LeaderRow, Leaders};
use gdp_trends_panel::Panel;
use gdp_trends_panel_models::{PanelRow, Year};

/// Builds the top-`count` and bottom-`count` entities by value for `year`.
///
/// When `year` is `None` or has no observations, the latest year in the
/// panel is used instead. Equal values keep panel order at both ends.
/// Returns `None` for an empty panel.
#[must_use]
pub fn leaders(panel: &Panel, year: Option<Year>, count: usize) -> Option<Leaders> {
    let latest = panel.latest_year()?;
    let resolved = match year {
        Some(requested) if panel.rows_for_year(requested).next().is_some() => requested,
        Some(requested) => {
            log::warn!("No data for {requested}, using latest year {latest}");
            latest
        }
        None => latest,
    };

    let mut rows: Vec<&PanelRow> = panel.rows_for_year(resolved).collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    let top = rows.iter().take(count).map(|row| leader_row(row)).collect();

    rows.sort_by(|a, b| a.value.total_cmp(&b.value));
    let bottom = rows.iter().take(count).map(|row| leader_row(row)).collect();

    Some(Leaders {
        requested_year: year,
        year: resolved,
        top,
        bottom,
    })
}

fn leader_row(row: &PanelRow) -> LeaderRow {
    LeaderRow {
        entity: row.entity.clone(),
        continent: row.continent,
        value: row.value,
    }
}
