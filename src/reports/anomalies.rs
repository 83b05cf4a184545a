//! Anomaly Report
//!
//! Lists the threshold crossings found in a window.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tabled::Tabled;

use crate::display::{format_fraction, format_title, render_table};
use crate::error::FinResult;
use crate::models::Dataset;
use crate::services::anomaly::{detect_anomalies, Anomaly, AnomalyThresholds};
use crate::services::metrics::derive_metrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub thresholds: AnomalyThresholds,
    pub periods_checked: usize,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Tabled)]
struct AnomalyRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Flag")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Threshold")]
    threshold: String,
}

impl AnomalyReport {
    pub fn generate(dataset: &Dataset, thresholds: &AnomalyThresholds) -> Self {
        let metrics = derive_metrics(dataset.periods(), Some(dataset.budget()));
        Self {
            thresholds: *thresholds,
            periods_checked: metrics.periods.len(),
            anomalies: detect_anomalies(&metrics, thresholds),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = format_title("Anomaly Flags");

        if self.anomalies.is_empty() {
            output.push_str(&format!(
                "No anomalies in {} periods checked.\n",
                self.periods_checked
            ));
            return output;
        }

        let rows = self.anomalies.iter().map(|a| AnomalyRow {
            month: a.month.label(),
            kind: a.kind.to_string(),
            value: format_fraction(a.value),
            threshold: format_fraction(a.threshold),
        });
        output.push_str(&render_table(rows));
        output.push('\n');
        output.push_str(&format!(
            "{} flags in {} periods checked\n",
            self.anomalies.len(),
            self.periods_checked
        ));

        output
    }

    /// Export the flags to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["month", "kind", "value", "threshold"])?;

        for a in &self.anomalies {
            wtr.write_record([
                a.month.to_string(),
                a.kind.to_string(),
                format!("{:.4}", a.value),
                format!("{:.4}", a.threshold),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use crate::services::generator::{generate, GeneratorConfig};

    fn dataset() -> Dataset {
        generate(
            &GeneratorConfig::ending_at(Month::new(2025, 12).unwrap()).with_seed(42),
            None,
        )
    }

    #[test]
    fn test_generated_budget_is_always_missed() {
        // Budget revenue is generated 5-10% above actuals.
        let thresholds = AnomalyThresholds {
            min_margin: 0.0,
            max_revenue_drop: 1.0,
            max_expense_ratio: 1.0,
            max_budget_variance: 0.04,
        };
        let report = AnomalyReport::generate(&dataset(), &thresholds);
        assert_eq!(report.periods_checked, 12);
        assert_eq!(report.anomalies.len(), 12);
    }

    #[test]
    fn test_permissive_thresholds() {
        let thresholds = AnomalyThresholds {
            min_margin: 0.0,
            max_revenue_drop: 1.0,
            max_expense_ratio: 1.0,
            max_budget_variance: 1.0,
        };
        let report = AnomalyReport::generate(&dataset(), &thresholds);
        assert!(report.anomalies.is_empty());
        assert!(report.format_terminal().contains("No anomalies in 12 periods"));
    }
}
