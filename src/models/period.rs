//! Monthly financial records
//!
//! A [`FinancialPeriod`] stores only revenue and expenses. Profit and margin
//! are always computed from them, so they cannot drift when a scenario
//! rescales either side.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::Month;

/// One calendar month's actual financial figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    /// Calendar month of this record
    pub month: Month,
    /// Revenue for the month
    pub revenue: Money,
    /// Expenses for the month
    pub expenses: Money,
}

impl FinancialPeriod {
    pub fn new(month: Month, revenue: Money, expenses: Money) -> Self {
        Self {
            month,
            revenue,
            expenses,
        }
    }

    /// Revenue minus expenses; may be negative
    pub fn profit(&self) -> Money {
        self.revenue - self.expenses
    }

    /// Profit divided by revenue as a fraction (0.25 = 25%), 0.0 when revenue is zero
    pub fn margin(&self) -> f64 {
        self.profit().ratio_to(self.revenue)
    }

    /// Profit margin expressed as a percentage
    pub fn margin_percent(&self) -> f64 {
        self.margin() * 100.0
    }

    /// Expenses divided by revenue, 0.0 when revenue is zero
    pub fn expense_ratio(&self) -> f64 {
        self.expenses.ratio_to(self.revenue)
    }
}

/// Budgeted figures for one month, used as the variance baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetFigures {
    pub month: Month,
    pub revenue: Money,
    pub expenses: Money,
}

impl BudgetFigures {
    pub fn new(month: Month, revenue: Money, expenses: Money) -> Self {
        Self {
            month,
            revenue,
            expenses,
        }
    }

    pub fn profit(&self) -> Money {
        self.revenue - self.expenses
    }

    pub fn margin(&self) -> f64 {
        self.profit().ratio_to(self.revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> Month {
        Month::new(2025, 1).unwrap()
    }

    #[test]
    fn test_profit_and_margin() {
        let period = FinancialPeriod::new(jan(), Money::from_dollars(100_000), Money::from_dollars(65_000));
        assert_eq!(period.profit(), Money::from_dollars(35_000));
        assert!((period.margin() - 0.35).abs() < 1e-12);
        assert!((period.margin_percent() - 35.0).abs() < 1e-9);
        assert!((period.expense_ratio() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_negative_profit() {
        let period = FinancialPeriod::new(jan(), Money::from_dollars(50), Money::from_dollars(80));
        assert_eq!(period.profit(), Money::from_dollars(-30));
        assert!(period.margin() < 0.0);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let period = FinancialPeriod::new(jan(), Money::zero(), Money::from_dollars(10));
        assert_eq!(period.margin(), 0.0);
        assert_eq!(period.expense_ratio(), 0.0);
    }

    #[test]
    fn test_budget_profit() {
        let budget = BudgetFigures::new(jan(), Money::from_dollars(110), Money::from_dollars(60));
        assert_eq!(budget.profit(), Money::from_dollars(50));
    }
}
