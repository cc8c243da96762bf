//! Full analysis run over a panel.

use gdp_trends_analytics_models::{AnalysisConfig, AnalysisReport};
use gdp_trends_panel::Panel;

use crate::{
    AnalyticsError, continent_trends, crisis_impact, growth_rankings, growth_volatility,
    inequality, leaders, prepare_analysis, world_trends,
};

/// Runs every calculator with the parameters in `config`.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidParameter`] if the moving average window is
///   zero
/// * [`AnalyticsError::InvalidCrisisWindow`] if any crisis window is
///   invalid
pub fn analyze(panel: &Panel, config: &AnalysisConfig) -> Result<AnalysisReport, AnalyticsError> {
    log::info!(
        "Analyzing {} rows of '{}'",
        panel.len(),
        panel.indicator()
    );

    let analysis = prepare_analysis(panel, config.moving_average_window)?;

    let crises = config
        .crisis_windows
        .iter()
        .map(|window| crisis_impact(panel, window))
        .collect::<Result<Vec<_>, _>>()?;

    let report = AnalysisReport {
        overview: panel.overview(),
        availability: panel.year_counts(),
        analysis,
        world_trends: world_trends(panel),
        continent_trends: continent_trends(panel),
        inequality: inequality(panel, config.inequality_min_entities),
        crises,
        rankings: growth_rankings(panel, config.ranking_min_years, config.ranking_size),
        leaders: leaders(panel, config.leaders.year, config.leaders.count),
        volatility: growth_volatility(
            panel,
            &config.volatility.entities,
            config.volatility.min_observations,
        ),
    };

    log::info!(
        "Analysis complete: {} years, {} inequality records, {} ranked entities, {} crisis windows",
        report.world_trends.len(),
        report.inequality.len(),
        report.rankings.table.len(),
        report.crises.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use gdp_trends_analytics_models::{LeadersConfig, VolatilityConfig};
    use gdp_trends_panel_models::PanelRow;

    use super::*;
    use crate::default_crisis_windows;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            moving_average_window: 3,
            ranking_min_years: 2,
            ranking_size: 1,
            inequality_min_entities: 2,
            crisis_windows: default_crisis_windows(),
            leaders: LeadersConfig {
                year: None,
                count: 1,
            },
            volatility: VolatilityConfig {
                entities: vec!["Chad".to_string()],
                min_observations: 2,
            },
        }
    }

    fn panel() -> Panel {
        let mut rows = Vec::new();
        for (i, year) in (2005..=2010).enumerate() {
            let step = f64::from(u32::try_from(i).unwrap());
            rows.push(PanelRow::new("Chad", year, 100.0 + step * 10.0));
            rows.push(PanelRow::new("Peru", year, 200.0 - step * 10.0));
        }
        Panel::new("gdp", rows).unwrap()
    }

    #[test]
    fn runs_every_calculator() {
        let report = analyze(&panel(), &config()).unwrap();
        assert_eq!(report.overview.records, 12);
        assert_eq!(report.availability.len(), 6);
        assert_eq!(report.analysis.len(), 12);
        assert_eq!(report.world_trends.len(), 6);
        assert_eq!(report.inequality.len(), 6);
        assert_eq!(report.crises.len(), 2);
        assert_eq!(report.crises[0].impacts.len(), 2);
        assert!(report.crises[1].impacts.is_empty());
        assert_eq!(report.rankings.top[0].entity, "Chad");
        assert_eq!(report.rankings.bottom[0].entity, "Peru");
        assert_eq!(report.leaders.as_ref().map(|l| l.year), Some(2010));
        assert_eq!(report.volatility.len(), 1);
    }

    #[test]
    fn invalid_window_fails_the_run() {
        let mut config = config();
        config.moving_average_window = 0;
        assert!(analyze(&panel(), &config).is_err());
    }
}
