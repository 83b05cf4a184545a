//! Performance Summary Report
//!
//! Headline KPIs for the selected window, each compared against the
//! unadjusted periods that precede the window, followed by the
//! month-by-month trend.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tabled::Tabled;

use crate::display::{format_change, format_compact, format_fraction, format_title, render_table};
use crate::error::FinResult;
use crate::models::{Dataset, Money, Month, TimeWindow};
use crate::services::metrics::{derive_metrics, mean, PeriodMetrics};

/// An amount with its change versus the prior periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneyKpi {
    pub value: Money,
    /// Percent change versus the prior total; 0.0 when the prior total is not positive
    pub change_percent: f64,
}

impl MoneyKpi {
    fn new(value: Money, prior: Money) -> Self {
        let change_percent = if prior.is_positive() {
            (value - prior).ratio_to(prior) * 100.0
        } else {
            0.0
        };
        Self {
            value,
            change_percent,
        }
    }
}

/// Average margin with its change in percentage points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginKpi {
    /// Mean margin over the window, in percent
    pub average_percent: f64,
    /// Difference to the prior mean margin in percentage points
    pub change_points: f64,
}

/// Performance Summary Report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub window: TimeWindow,
    pub first_month: Option<Month>,
    pub last_month: Option<Month>,
    pub total_revenue: MoneyKpi,
    pub total_expenses: MoneyKpi,
    pub total_profit: MoneyKpi,
    pub average_margin: MarginKpi,
    /// Per-period metrics for the window
    pub trend: Vec<PeriodMetrics>,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "MoM Growth")]
    growth: String,
}

impl SummaryReport {
    /// Summarize `window` of `adjusted`, comparing against the periods of
    /// `baseline` that precede the window
    ///
    /// Comparing against the baseline keeps a what-if change visible in the
    /// KPI deltas even when the scenario covers the whole year.
    pub fn generate(adjusted: &Dataset, baseline: &Dataset, window: TimeWindow) -> Self {
        let current = adjusted.window(window);
        let prior = baseline.before_window(window);

        let metrics = derive_metrics(current.periods(), Some(current.budget()));
        let prior_metrics = derive_metrics(prior.periods(), None);

        let average_percent = metrics.average_margin * 100.0;
        let change_points = if prior.is_empty() {
            0.0
        } else {
            average_percent - mean(prior.periods().iter().map(|p| p.margin())) * 100.0
        };

        Self {
            window,
            first_month: current.periods().first().map(|p| p.month),
            last_month: current.latest().map(|p| p.month),
            total_revenue: MoneyKpi::new(metrics.total_revenue, prior_metrics.total_revenue),
            total_expenses: MoneyKpi::new(metrics.total_expenses, prior_metrics.total_expenses),
            total_profit: MoneyKpi::new(metrics.total_profit, prior_metrics.total_profit),
            average_margin: MarginKpi {
                average_percent,
                change_points,
            },
            trend: metrics.periods,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        let range = match (self.first_month, self.last_month) {
            (Some(first), Some(last)) => format!("{} to {}", first.label(), last.label()),
            _ => "no periods".to_string(),
        };
        output.push_str(&format_title(&format!(
            "Financial Performance: {} ({})",
            self.window, range
        )));

        output.push_str(&format!(
            "{:<20} {:>12} {:>10}\n",
            "Total Revenue",
            format_compact(self.total_revenue.value, symbol),
            format_change(self.total_revenue.change_percent)
        ));
        output.push_str(&format!(
            "{:<20} {:>12} {:>10}\n",
            "Total Expenses",
            format_compact(self.total_expenses.value, symbol),
            format_change(self.total_expenses.change_percent)
        ));
        output.push_str(&format!(
            "{:<20} {:>12} {:>10}\n",
            "Total Profit",
            format_compact(self.total_profit.value, symbol),
            format_change(self.total_profit.change_percent)
        ));
        output.push_str(&format!(
            "{:<20} {:>12} {:>10}\n\n",
            "Avg Profit Margin",
            format!("{:.1}%", self.average_margin.average_percent),
            format_change(self.average_margin.change_points)
        ));

        let rows = self.trend.iter().map(|p| TrendRow {
            month: p.month.label(),
            revenue: p.revenue.format_with_symbol(symbol),
            expenses: p.expenses.format_with_symbol(symbol),
            profit: p.profit.format_with_symbol(symbol),
            margin: format_fraction(p.operating_margin),
            growth: format_change(p.revenue_growth * 100.0),
        });
        output.push_str(&render_table(rows));
        output.push('\n');

        output
    }

    /// Export the trend to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "month",
            "revenue",
            "expenses",
            "profit",
            "gross_margin",
            "operating_margin",
            "expense_ratio",
            "revenue_growth",
        ])?;

        for p in &self.trend {
            wtr.write_record([
                p.month.to_string(),
                p.revenue.to_decimal_string(),
                p.expenses.to_decimal_string(),
                p.profit.to_decimal_string(),
                format!("{:.4}", p.gross_margin),
                format!("{:.4}", p.operating_margin),
                format!("{:.4}", p.expense_ratio),
                format!("{:.4}", p.revenue_growth),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scenario;
    use crate::services::generator::{generate, GeneratorConfig};

    fn dataset() -> Dataset {
        generate(
            &GeneratorConfig::ending_at(Month::new(2025, 12).unwrap()).with_seed(3),
            None,
        )
    }

    #[test]
    fn test_full_window_has_no_change() {
        let data = dataset();
        let report = SummaryReport::generate(&data, &data, TimeWindow::LastTwelveMonths);
        assert_eq!(report.trend.len(), 12);
        assert_eq!(report.total_revenue.change_percent, 0.0);
        assert_eq!(report.average_margin.change_points, 0.0);
        assert_eq!(report.first_month, Some(Month::new(2025, 1).unwrap()));
    }

    #[test]
    fn test_short_window_compares_against_prior() {
        let data = dataset();
        let report = SummaryReport::generate(&data, &data, TimeWindow::LastThreeMonths);
        assert_eq!(report.trend.len(), 3);

        let current: Money = data.periods()[9..].iter().map(|p| p.revenue).sum();
        let prior: Money = data.periods()[..9].iter().map(|p| p.revenue).sum();
        let expected = (current - prior).ratio_to(prior) * 100.0;

        assert_eq!(report.total_revenue.value, current);
        assert!((report.total_revenue.change_percent - expected).abs() < 1e-9);
        assert!(report.total_revenue.change_percent < 0.0);
    }

    #[test]
    fn test_scenario_compares_against_unadjusted_prior() {
        let baseline = dataset();
        let adjusted = baseline.with_scenario(&Scenario::new(1.2, 1.0));
        let window = TimeWindow::LastThreeMonths;

        let plain = SummaryReport::generate(&baseline, &baseline, window);
        let what_if = SummaryReport::generate(&adjusted, &baseline, window);

        let prior: Money = baseline.periods()[..9].iter().map(|p| p.revenue).sum();
        let current: Money = adjusted.periods()[9..].iter().map(|p| p.revenue).sum();
        let expected = (current - prior).ratio_to(prior) * 100.0;

        assert!((what_if.total_revenue.change_percent - expected).abs() < 1e-9);
        assert!(what_if.total_revenue.change_percent > plain.total_revenue.change_percent + 5.0);
        assert_eq!(what_if.total_expenses, plain.total_expenses);
        assert!(what_if.average_margin.change_points > plain.average_margin.change_points);
    }

    #[test]
    fn test_format_and_export() {
        let data = dataset();
        let report = SummaryReport::generate(&data, &data, TimeWindow::LastSixMonths);
        let text = report.format_terminal("$");
        assert!(text.contains("Total Revenue"));
        assert!(text.contains("December 2025"));

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("month,revenue,expenses,profit"));
        assert_eq!(csv.lines().count(), 7);
    }
}
