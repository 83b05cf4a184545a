//! Ratio Analysis Report
//!
//! Benchmarks the latest period of a window against fixed targets and
//! industry averages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tabled::Tabled;

use crate::display::{format_ratio, format_title, render_table};
use crate::error::FinResult;
use crate::models::{Dataset, Month};
use crate::services::metrics::derive_metrics;

/// Tolerance for budget variance rows
pub const VARIANCE_TOLERANCE: f64 = 0.05;

/// How a ratio is judged against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioDirection {
    /// Good at or above target
    HigherIsBetter,
    /// Good at or below target
    LowerIsBetter,
    /// Good within [`VARIANCE_TOLERANCE`] of zero
    NearZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioStatus {
    Good,
    NeedsAttention,
}

impl fmt::Display for RatioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::NeedsAttention => write!(f, "Needs Attention"),
        }
    }
}

/// One benchmarked ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub name: String,
    pub value: f64,
    pub target: f64,
    pub industry_average: f64,
    pub direction: RatioDirection,
}

impl RatioRow {
    fn new(name: &str, value: f64, target: f64, industry_average: f64, direction: RatioDirection) -> Self {
        Self {
            name: name.to_string(),
            value,
            target,
            industry_average,
            direction,
        }
    }

    pub fn status(&self) -> RatioStatus {
        let good = match self.direction {
            RatioDirection::HigherIsBetter => self.value >= self.target,
            RatioDirection::LowerIsBetter => self.value <= self.target,
            RatioDirection::NearZero => self.value.abs() <= VARIANCE_TOLERANCE,
        };
        if good {
            RatioStatus::Good
        } else {
            RatioStatus::NeedsAttention
        }
    }

    /// Difference between the value and the industry average
    pub fn gap_to_industry(&self) -> f64 {
        self.value - self.industry_average
    }
}

/// Ratio Analysis Report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioReport {
    /// Month the ratios describe; `None` for an empty window
    pub month: Option<Month>,
    pub rows: Vec<RatioRow>,
}

#[derive(Tabled)]
struct RatioTableRow {
    #[tabled(rename = "Ratio")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Industry Avg")]
    industry: String,
    #[tabled(rename = "vs Industry")]
    gap: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl RatioReport {
    /// Benchmark the latest period of `dataset`
    pub fn generate(dataset: &Dataset) -> Self {
        use RatioDirection::*;

        let metrics = derive_metrics(dataset.periods(), Some(dataset.budget()));
        let (Some(latest), Some(period)) = (metrics.latest(), dataset.latest()) else {
            return Self {
                month: None,
                rows: Vec::new(),
            };
        };

        let mut rows = vec![
            RatioRow::new("Gross Profit Margin", latest.gross_margin, 0.25, 0.22, HigherIsBetter),
            RatioRow::new("Operating Margin", latest.operating_margin, 0.20, 0.18, HigherIsBetter),
            RatioRow::new("EBITDA Margin", latest.operating_margin, 0.22, 0.20, HigherIsBetter),
            RatioRow::new("Expense Ratio", latest.expense_ratio, 0.65, 0.68, LowerIsBetter),
            RatioRow::new("Revenue Growth (MoM)", latest.revenue_growth, 0.05, 0.04, HigherIsBetter),
            RatioRow::new(
                "Return on Investment",
                latest.profit.ratio_to(latest.expenses),
                0.30,
                0.25,
                HigherIsBetter,
            ),
        ];

        if let (Some(capital), Some(flow)) = (
            dataset.working_capital().last(),
            dataset.cash_flows().last(),
        ) {
            rows.push(RatioRow::new("Current Ratio", capital.current_ratio(), 2.0, 1.8, HigherIsBetter));
            rows.push(RatioRow::new("Quick Ratio", capital.quick_ratio(), 1.5, 1.3, HigherIsBetter));
            rows.push(RatioRow::new(
                "Operating Cash Flow Ratio",
                flow.operating.ratio_to(capital.current_liabilities),
                1.2,
                1.0,
                HigherIsBetter,
            ));
        }

        if let Some(variance) = metrics.variance.latest() {
            rows.push(RatioRow::new("Revenue Variance", variance.revenue, 0.0, -0.05, NearZero));
            rows.push(RatioRow::new("Expense Variance", variance.expenses, 0.0, 0.03, NearZero));
        }

        Self {
            month: Some(period.month),
            rows,
        }
    }

    pub fn find(&self, name: &str) -> Option<&RatioRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Number of rows needing attention
    pub fn attention_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status() == RatioStatus::NeedsAttention)
            .count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let Some(month) = self.month else {
            let mut output = format_title("Financial Ratios");
            output.push_str("No periods in the selected window.\n");
            return output;
        };

        let mut output = format_title(&format!("Financial Ratios: {}", month.label()));

        let rows = self.rows.iter().map(|r| RatioTableRow {
            name: r.name.clone(),
            value: format_ratio(r.value),
            target: format_ratio(r.target),
            industry: format_ratio(r.industry_average),
            gap: format!("{:+.3}", r.gap_to_industry()),
            status: r.status().to_string(),
        });
        output.push_str(&render_table(rows));
        output.push('\n');
        output.push_str(&format!(
            "{} of {} ratios need attention\n",
            self.attention_count(),
            self.rows.len()
        ));

        output
    }

    /// Export the ratios to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["ratio", "value", "target", "industry_average", "status"])?;

        for r in &self.rows {
            wtr.write_record([
                r.name.clone(),
                format!("{:.4}", r.value),
                format!("{:.4}", r.target),
                format!("{:.4}", r.industry_average),
                r.status().to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
