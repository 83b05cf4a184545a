//! Dashboard session
//!
//! One request in, one freshly computed view out. The request carries every
//! input (seed, end month, scenario, window, department selection and
//! thresholds), so nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::anomaly::AnomalyThresholds;
use super::generator::{generate, GeneratorConfig};
use super::metrics::{derive_metrics, DerivedMetrics};
use crate::models::{Dataset, DepartmentFilter, Scenario, TimeWindow};
use crate::reports::{
    AnomalyReport, CashFlowReport, CorrelationReport, DepartmentReport, MarginCalendar,
    RatioReport, SummaryReport,
};

/// Everything needed to build one dashboard view
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest {
    pub config: GeneratorConfig,
    pub scenario: Option<Scenario>,
    pub window: TimeWindow,
    pub departments: DepartmentFilter,
    pub thresholds: AnomalyThresholds,
}

/// A fully computed dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    /// Dataset as generated
    pub baseline: Dataset,
    /// Baseline with the scenario applied; equal to `baseline` without one
    pub adjusted: Dataset,
    /// Trailing periods of `adjusted` selected by the window
    pub windowed: Dataset,
    pub metrics: DerivedMetrics,
    pub summary: SummaryReport,
    pub departments: DepartmentReport,
    pub ratios: RatioReport,
    pub cash_flow: CashFlowReport,
    pub anomalies: AnomalyReport,
    pub correlation: CorrelationReport,
    pub margin_calendar: MarginCalendar,
}

pub struct Dashboard;

impl Dashboard {
    /// Generate, adjust, window and analyze in one pass
    pub fn build(request: &DashboardRequest) -> DashboardView {
        let baseline = generate(&request.config, None);
        let adjusted = match &request.scenario {
            Some(scenario) => baseline.with_scenario(scenario),
            None => baseline.clone(),
        };
        let windowed = adjusted.window(request.window);

        debug!(
            seed = baseline.seed(),
            window = %request.window,
            periods = windowed.len(),
            "building dashboard"
        );

        DashboardView {
            metrics: derive_metrics(windowed.periods(), Some(windowed.budget())),
            summary: SummaryReport::generate(&adjusted, &baseline, request.window),
            departments: DepartmentReport::generate(&windowed, &request.departments),
            ratios: RatioReport::generate(&windowed),
            cash_flow: CashFlowReport::generate(&windowed),
            anomalies: AnomalyReport::generate(&windowed, &request.thresholds),
            correlation: CorrelationReport::generate(&windowed),
            margin_calendar: MarginCalendar::generate(&windowed),
            baseline,
            adjusted,
            windowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, Month};

    fn request() -> DashboardRequest {
        DashboardRequest {
            config: GeneratorConfig::ending_at(Month::new(2025, 12).unwrap()).with_seed(42),
            ..DashboardRequest::default()
        }
    }

    #[test]
    fn test_same_request_same_view() {
        let a = Dashboard::build(&request());
        let b = Dashboard::build(&request());
        assert_eq!(a.adjusted, b.adjusted);
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.baseline, a.adjusted);
    }

    #[test]
    fn test_scenario_and_window() {
        let mut req = request();
        req.scenario = Some(Scenario::new(1.1, 1.0));
        req.window = TimeWindow::LastThreeMonths;
        req.departments = DepartmentFilter::only([Department::Sales]);

        let view = Dashboard::build(&req);
        assert_eq!(view.baseline.len(), 12);
        assert_eq!(view.windowed.len(), 3);
        assert_eq!(view.metrics.periods.len(), 3);
        assert_eq!(view.departments.departments.len(), 1);
        assert_ne!(view.baseline, view.adjusted);
        assert_eq!(view.adjusted.budget(), view.baseline.budget());

        let base = view.baseline.latest().unwrap().revenue;
        assert_eq!(view.adjusted.latest().unwrap().revenue, base.scale(1.1));
    }

    #[test]
    fn test_identity_scenario_matches_baseline() {
        let mut req = request();
        req.scenario = Some(Scenario::baseline());
        let view = Dashboard::build(&req);
        assert_eq!(view.baseline, view.adjusted);
        assert!(view.adjusted.scenario().is_none());
    }

    #[test]
    fn test_margin_calendar_follows_window() {
        let mut req = request();
        req.window = TimeWindow::LastSixMonths;
        let view = Dashboard::build(&req);

        let row = &view.margin_calendar.years[0];
        assert_eq!(view.margin_calendar.years.len(), 1);
        assert_eq!(row.months.iter().filter(|m| m.is_some()).count(), 6);
        assert_eq!(row.margin(1), 0.0);
        assert_eq!(row.margin(12), view.windowed.latest().unwrap().margin());
    }
}
