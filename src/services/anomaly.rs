//! Threshold-based anomaly flags
//!
//! Flags periods whose derived metrics cross fixed thresholds. These are
//! plain comparisons, not statistical outlier detection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics::DerivedMetrics;
use crate::models::Month;

/// Thresholds for anomaly flags, all expressed as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    /// Flag margins below this value
    #[serde(default = "default_min_margin")]
    pub min_margin: f64,
    /// Flag month-over-month revenue drops larger than this value
    #[serde(default = "default_max_revenue_drop")]
    pub max_revenue_drop: f64,
    /// Flag expense ratios above this value
    #[serde(default = "default_max_expense_ratio")]
    pub max_expense_ratio: f64,
    /// Flag revenue budget variance whose magnitude exceeds this value
    #[serde(default = "default_max_budget_variance")]
    pub max_budget_variance: f64,
}

fn default_min_margin() -> f64 {
    0.25
}

fn default_max_revenue_drop() -> f64 {
    0.10
}

fn default_max_expense_ratio() -> f64 {
    0.75
}

fn default_max_budget_variance() -> f64 {
    0.05
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            min_margin: default_min_margin(),
            max_revenue_drop: default_max_revenue_drop(),
            max_expense_ratio: default_max_expense_ratio(),
            max_budget_variance: default_max_budget_variance(),
        }
    }
}

/// What kind of threshold a period crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    LowMargin,
    RevenueDrop,
    HighExpenseRatio,
    BudgetVariance,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowMargin => write!(f, "Low margin"),
            Self::RevenueDrop => write!(f, "Revenue drop"),
            Self::HighExpenseRatio => write!(f, "High expense ratio"),
            Self::BudgetVariance => write!(f, "Budget variance"),
        }
    }
}

/// A single flagged observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub month: Month,
    pub kind: AnomalyKind,
    /// Observed value
    pub value: f64,
    /// Threshold that was crossed
    pub threshold: f64,
}

/// Flag every period crossing a threshold, chronological
pub fn detect_anomalies(metrics: &DerivedMetrics, thresholds: &AnomalyThresholds) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for (i, period) in metrics.periods.iter().enumerate() {
        if period.operating_margin < thresholds.min_margin {
            anomalies.push(Anomaly {
                month: period.month,
                kind: AnomalyKind::LowMargin,
                value: period.operating_margin,
                threshold: thresholds.min_margin,
            });
        }

        if i > 0 && period.revenue_growth < -thresholds.max_revenue_drop {
            anomalies.push(Anomaly {
                month: period.month,
                kind: AnomalyKind::RevenueDrop,
                value: period.revenue_growth,
                threshold: -thresholds.max_revenue_drop,
            });
        }

        if period.expense_ratio > thresholds.max_expense_ratio {
            anomalies.push(Anomaly {
                month: period.month,
                kind: AnomalyKind::HighExpenseRatio,
                value: period.expense_ratio,
                threshold: thresholds.max_expense_ratio,
            });
        }

        if let Some(variance) = metrics.variance.periods().and_then(|v| v.get(i)) {
            if variance.revenue.abs() > thresholds.max_budget_variance {
                anomalies.push(Anomaly {
                    month: period.month,
                    kind: AnomalyKind::BudgetVariance,
                    value: variance.revenue,
                    threshold: thresholds.max_budget_variance,
                });
            }
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetFigures, FinancialPeriod, Money};
    use crate::services::metrics::derive_metrics;

    fn period(month: Month, revenue: i64, expenses: i64) -> FinancialPeriod {
        FinancialPeriod::new(month, Money::from_dollars(revenue), Money::from_dollars(expenses))
    }

    #[test]
    fn test_healthy_periods_raise_nothing() {
        let start = Month::new(2025, 1).unwrap();
        let data = vec![period(start, 100, 60), period(start.next(), 105, 63)];
        let metrics = derive_metrics(&data, None);
        assert!(detect_anomalies(&metrics, &AnomalyThresholds::default()).is_empty());
    }

    #[test]
    fn test_flags_each_threshold() {
        let start = Month::new(2025, 1).unwrap();
        let data = vec![period(start, 100, 60), period(start.next(), 80, 64)];
        let budget = vec![
            BudgetFigures::new(start, Money::from_dollars(100), Money::from_dollars(60)),
            BudgetFigures::new(start.next(), Money::from_dollars(100), Money::from_dollars(60)),
        ];
        let metrics = derive_metrics(&data, Some(budget.as_slice()));
        let anomalies = detect_anomalies(&metrics, &AnomalyThresholds::default());

        let kinds: Vec<_> = anomalies.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AnomalyKind::LowMargin,
                AnomalyKind::RevenueDrop,
                AnomalyKind::HighExpenseRatio,
                AnomalyKind::BudgetVariance,
            ]
        );
        assert!(anomalies.iter().all(|a| a.month == start.next()));
        assert!((anomalies[1].value + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_first_period_never_flags_revenue_drop() {
        let data = vec![period(Month::new(2025, 1).unwrap(), 100, 60)];
        let thresholds = AnomalyThresholds {
            max_revenue_drop: -1.0,
            ..AnomalyThresholds::default()
        };
        let metrics = derive_metrics(&data, None);
        assert!(detect_anomalies(&metrics, &thresholds)
            .iter()
            .all(|a| a.kind != AnomalyKind::RevenueDrop));
    }
}
