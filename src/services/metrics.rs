//! Derived financial metrics
//!
//! Pure functions over a period sequence: per-period margins, expense ratio
//! and month-over-month growth, window totals, and variance against an
//! optional budget baseline. Every ratio uses 0.0 as its division-by-zero
//! sentinel.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{BudgetFigures, FinancialPeriod, Money, Month};

/// Derived values for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub month: Month,
    pub revenue: Money,
    pub expenses: Money,
    pub profit: Money,
    /// Profit over revenue; the data carries no cost-of-goods split
    pub gross_margin: f64,
    /// Profit over revenue
    pub operating_margin: f64,
    /// Expenses over revenue
    pub expense_ratio: f64,
    /// Revenue change versus the previous period as a fraction; 0.0 for the first period
    pub revenue_growth: f64,
}

/// Budget variance for one period, each as (actual − budget) / budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodVariance {
    pub month: Month,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Outcome of the budget variance computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VarianceAnalysis {
    /// Variance per period, aligned with the actuals
    Available { periods: Vec<PeriodVariance> },
    /// No usable budget was supplied
    Unavailable { reason: String },
}

impl VarianceAnalysis {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn periods(&self) -> Option<&[PeriodVariance]> {
        match self {
            Self::Available { periods } => Some(periods),
            Self::Unavailable { .. } => None,
        }
    }

    /// Variance of the most recent period
    pub fn latest(&self) -> Option<&PeriodVariance> {
        self.periods().and_then(|p| p.last())
    }
}

/// Metrics for a whole period sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub periods: Vec<PeriodMetrics>,
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub total_profit: Money,
    /// Mean of the per-period margins
    pub average_margin: f64,
    /// Total profit over total revenue
    pub aggregate_margin: f64,
    pub variance: VarianceAnalysis,
}

impl DerivedMetrics {
    pub fn latest(&self) -> Option<&PeriodMetrics> {
        self.periods.last()
    }
}

/// Compute the derived metrics for `periods`
///
/// A budget with a different length or different months than `periods`
/// makes variance unavailable; everything else is still computed.
pub fn derive_metrics(
    periods: &[FinancialPeriod],
    budget: Option<&[BudgetFigures]>,
) -> DerivedMetrics {
    let per_period: Vec<PeriodMetrics> = periods
        .iter()
        .enumerate()
        .map(|(i, period)| {
            let margin = period.margin();
            let revenue_growth = match i.checked_sub(1).map(|prev| &periods[prev]) {
                Some(prev) => growth_rate(prev.revenue, period.revenue),
                None => 0.0,
            };
            PeriodMetrics {
                month: period.month,
                revenue: period.revenue,
                expenses: period.expenses,
                profit: period.profit(),
                gross_margin: margin,
                operating_margin: margin,
                expense_ratio: period.expense_ratio(),
                revenue_growth,
            }
        })
        .collect();

    let total_revenue: Money = periods.iter().map(|p| p.revenue).sum();
    let total_expenses: Money = periods.iter().map(|p| p.expenses).sum();
    let total_profit = total_revenue - total_expenses;

    let average_margin = mean(periods.iter().map(|p| p.margin()));

    DerivedMetrics {
        periods: per_period,
        total_revenue,
        total_expenses,
        total_profit,
        average_margin,
        aggregate_margin: total_profit.ratio_to(total_revenue),
        variance: variance_analysis(periods, budget),
    }
}

/// Relative change from `previous` to `current`, 0.0 when `previous` is zero
pub fn growth_rate(previous: Money, current: Money) -> f64 {
    (current - previous).ratio_to(previous)
}

/// Relative deviation of `actual` from `budget`, 0.0 when `budget` is zero
pub fn variance(actual: Money, budget: Money) -> f64 {
    (actual - budget).ratio_to(budget)
}

/// Arithmetic mean, 0.0 for an empty sequence
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn variance_analysis(
    periods: &[FinancialPeriod],
    budget: Option<&[BudgetFigures]>,
) -> VarianceAnalysis {
    let Some(budget) = budget else {
        return VarianceAnalysis::Unavailable {
            reason: "no budget baseline supplied".to_string(),
        };
    };

    if budget.len() != periods.len() {
        warn!(
            budget = budget.len(),
            actuals = periods.len(),
            "budget length mismatch, variance unavailable"
        );
        return VarianceAnalysis::Unavailable {
            reason: format!(
                "budget has {} periods but actuals have {}",
                budget.len(),
                periods.len()
            ),
        };
    }

    if let Some((actual, planned)) = periods
        .iter()
        .zip(budget)
        .find(|(a, b)| a.month != b.month)
    {
        warn!(actual = %actual.month, budget = %planned.month, "budget months misaligned, variance unavailable");
        return VarianceAnalysis::Unavailable {
            reason: format!(
                "budget month {} does not match actual month {}",
                planned.month, actual.month
            ),
        };
    }

    let periods = periods
        .iter()
        .zip(budget)
        .map(|(actual, planned)| PeriodVariance {
            month: actual.month,
            revenue: variance(actual.revenue, planned.revenue),
            expenses: variance(actual.expenses, planned.expenses),
            profit: variance(actual.profit(), planned.profit()),
        })
        .collect();

    VarianceAnalysis::Available { periods }
}
