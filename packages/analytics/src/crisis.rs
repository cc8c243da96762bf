//! Before/during comparisons around macroeconomic shocks.

use std::collections::BTreeSet;

use gdp_trends_analytics_models::{CrisisImpact, CrisisReport, CrisisWindow};
use gdp_trends_panel::Panel;
use gdp_trends_panel_models::Year;

use crate::AnalyticsError;
use crate::stats::{mean, percent_change};

/// The crisis windows analyzed when none are configured: the 2008
/// financial crisis and the COVID-19 pandemic.
#[must_use]
pub fn default_crisis_windows() -> Vec<CrisisWindow> {
    vec![
        CrisisWindow {
            name: "2008_crisis".to_string(),
            pre_years: vec![2006, 2007],
            during_years: vec![2008, 2009],
        },
        CrisisWindow {
            name: "covid_crisis".to_string(),
            pre_years: vec![2018, 2019],
            during_years: vec![2020, 2021],
        },
    ]
}

/// Checks that both year sets of a window are non-empty and disjoint, and
/// that the name is usable as part of a file name.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidCrisisWindow`] if the name is empty or holds
///   anything but ASCII letters, digits, `_` and `-`
/// * [`AnalyticsError::InvalidCrisisWindow`] if either set is empty or the
///   sets share a year
pub fn validate_window(window: &CrisisWindow) -> Result<(), AnalyticsError> {
    let invalid = |message: String| AnalyticsError::InvalidCrisisWindow {
        name: window.name.clone(),
        message,
    };

    if window.name.is_empty() {
        return Err(invalid("name must not be empty".to_string()));
    }
    if !window
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(
            "name may only contain ASCII letters, digits, '_' and '-'".to_string(),
        ));
    }
    if window.pre_years.is_empty() {
        return Err(invalid("pre_years must not be empty".to_string()));
    }
    if window.during_years.is_empty() {
        return Err(invalid("during_years must not be empty".to_string()));
    }

    let pre: BTreeSet<Year> = window.pre_years.iter().copied().collect();
    let overlap: Vec<String> = window
        .during_years
        .iter()
        .filter(|year| pre.contains(year))
        .map(ToString::to_string)
        .collect();
    if !overlap.is_empty() {
        return Err(invalid(format!(
            "years {} appear in both pre_years and during_years",
            overlap.join(", ")
        )));
    }

    Ok(())
}

/// Computes the impact of a crisis on every entity observed in both halves
/// of the window, sorted by entity name.
///
/// The impact is the percent change from the mean over `pre_years` to the
/// mean over `during_years`, undefined when the pre-crisis mean is zero.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidCrisisWindow`] if the window is invalid
pub fn crisis_impact(panel: &Panel, window: &CrisisWindow) -> Result<CrisisReport, AnalyticsError> {
    validate_window(window)?;

    let pre_years: BTreeSet<Year> = window.pre_years.iter().copied().collect();
    let during_years: BTreeSet<Year> = window.during_years.iter().copied().collect();

    let mut impacts = Vec::new();
    let mut skipped = 0_usize;

    for series in panel.series_by_name() {
        let values_in = |years: &BTreeSet<Year>| -> Vec<f64> {
            series
                .rows()
                .iter()
                .filter(|row| years.contains(&row.year))
                .map(|row| row.value)
                .collect()
        };

        let (Some(pre_crisis), Some(during_crisis)) =
            (mean(&values_in(&pre_years)), mean(&values_in(&during_years)))
        else {
            skipped += 1;
            continue;
        };

        impacts.push(CrisisImpact {
            entity: series.entity().to_string(),
            pre_crisis,
            during_crisis,
            impact: percent_change(pre_crisis, during_crisis),
        });
    }

    log::debug!(
        "Crisis '{}': {} entities, {skipped} skipped without data in both periods",
        window.name,
        impacts.len()
    );

    Ok(CrisisReport {
        window: window.clone(),
        impacts,
    })
}

#[cfg(test)]
mod tests {
    use gdp_trends_panel_models::PanelRow;

    use super::*;

    fn window() -> CrisisWindow {
        CrisisWindow {
            name: "test".to_string(),
            pre_years: vec![2006, 2007],
            during_years: vec![2008, 2009],
        }
    }

    #[test]
    fn impact_is_percent_change_of_means() {
        let panel = Panel::new(
            "gdp",
            vec![
                PanelRow::new("Chad", 2006, 90.0),
                PanelRow::new("Chad", 2007, 110.0),
                PanelRow::new("Chad", 2008, 70.0),
                PanelRow::new("Chad", 2009, 90.0),
            ],
        )
        .unwrap();
        let report = crisis_impact(&panel, &window()).unwrap();
        assert_eq!(report.impacts.len(), 1);
        let chad = &report.impacts[0];
        assert_eq!(chad.pre_crisis, 100.0);
        assert_eq!(chad.during_crisis, 80.0);
        assert_eq!(chad.impact, Some(-20.0));
    }

    #[test]
    fn entities_missing_a_period_are_excluded() {
        let panel = Panel::new(
            "gdp",
            vec![
                PanelRow::new("Peru", 2006, 10.0),
                PanelRow::new("Peru", 2008, 12.0),
                PanelRow::new("Chad", 2007, 10.0),
                PanelRow::new("Fiji", 2009, 10.0),
                PanelRow::new("Chile", 2007, 5.0),
                PanelRow::new("Chile", 2009, 5.0),
            ],
        )
        .unwrap();
        let report = crisis_impact(&panel, &window()).unwrap();
        let entities: Vec<&str> = report.impacts.iter().map(|i| i.entity.as_str()).collect();
        assert_eq!(entities, vec!["Chile", "Peru"]);
        assert_eq!(report.impacts[0].impact, Some(0.0));
    }

    #[test]
    fn zero_pre_crisis_mean_is_undefined() {
        let panel = Panel::new(
            "gdp",
            vec![PanelRow::new("Chad", 2006, 0.0), PanelRow::new("Chad", 2008, 5.0)],
        )
        .unwrap();
        let report = crisis_impact(&panel, &window()).unwrap();
        assert_eq!(report.impacts[0].impact, None);
    }

    #[test]
    fn overlapping_windows_are_rejected() {
        let panel = Panel::new("gdp", Vec::new()).unwrap();
        let overlapping = CrisisWindow {
            during_years: vec![2007, 2008],
            ..window()
        };
        let err = crisis_impact(&panel, &overlapping).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidCrisisWindow { ref message, .. } if message.contains("2007")));
    }

    #[test]
    fn empty_year_sets_are_rejected() {
        let empty = CrisisWindow {
            pre_years: Vec::new(),
            ..window()
        };
        assert!(validate_window(&empty).is_err());
    }

    #[test]
    fn names_that_leave_the_output_directory_are_rejected() {
        for name in ["../escaped", "a/b", "..", "c:\\x", "with space"] {
            let bad = CrisisWindow {
                name: name.to_string(),
                ..window()
            };
            assert!(
                matches!(
                    validate_window(&bad),
                    Err(AnalyticsError::InvalidCrisisWindow { ref message, .. })
                        if message.contains("ASCII")
                ),
                "{name} accepted"
            );
        }

        let ok = CrisisWindow {
            name: "Dot-com_2001".to_string(),
            ..window()
        };
        assert!(validate_window(&ok).is_ok());
    }

    #[test]
    fn default_windows_are_valid() {
        let windows = default_crisis_windows();
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| validate_window(w).is_ok()));
        assert_eq!(windows[1].name, "covid_crisis");
    }
}
