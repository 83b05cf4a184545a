//! Cash flow and working capital
//!
//! Only the generated factors are stored. Amounts are derived from the period
//! they belong to, so a scenario that rescales revenue or expenses moves cash
//! flow and working capital along with it.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::FinancialPeriod;

/// Per-period factors linking cash flow and working capital to the P&L
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowDrivers {
    /// Operating cash flow as a multiple of profit
    pub operating: f64,
    /// Investing outflow as a fraction of expenses
    pub investing: f64,
    /// Financing cash flow as a multiple of profit
    pub financing: f64,
    /// Current assets as a fraction of revenue
    pub current_assets: f64,
    /// Current liabilities as a fraction of expenses
    pub current_liabilities: f64,
}

impl CashFlowDrivers {
    pub fn cash_flow(&self, period: &FinancialPeriod) -> CashFlow {
        let profit = period.profit();
        CashFlow {
            operating: profit.scale(self.operating),
            investing: -period.expenses.scale(self.investing),
            financing: profit.scale(self.financing),
        }
    }

    pub fn working_capital(&self, period: &FinancialPeriod) -> WorkingCapital {
        WorkingCapital {
            current_assets: period.revenue.scale(self.current_assets),
            current_liabilities: period.expenses.scale(self.current_liabilities),
        }
    }
}

/// Cash flow components for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    pub operating: Money,
    pub investing: Money,
    pub financing: Money,
}

impl CashFlow {
    pub fn net(&self) -> Money {
        self.operating + self.investing + self.financing
    }
}

/// Short-term balance sheet position for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingCapital {
    pub current_assets: Money,
    pub current_liabilities: Money,
}

impl WorkingCapital {
    /// Current assets over current liabilities, 0.0 without liabilities
    pub fn current_ratio(&self) -> f64 {
        self.current_assets.ratio_to(self.current_liabilities)
    }

    /// Quick ratio approximated as 70% of current assets over liabilities
    pub fn quick_ratio(&self) -> f64 {
        self.current_assets
            .scale(QUICK_ASSET_FRACTION)
            .ratio_to(self.current_liabilities)
    }
}

/// Share of current assets treated as liquid for the quick ratio
pub const QUICK_ASSET_FRACTION: f64 = 0.7;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;

    fn period() -> FinancialPeriod {
        FinancialPeriod::new(
            Month::new(2025, 1).unwrap(),
            Money::from_dollars(1_000),
            Money::from_dollars(600),
        )
    }

    fn drivers() -> CashFlowDrivers {
        CashFlowDrivers {
            operating: 1.0,
            investing: 0.2,
            financing: -0.1,
            current_assets: 0.4,
            current_liabilities: 0.25,
        }
    }

    #[test]
    fn test_cash_flow_follows_period() {
        let flow = drivers().cash_flow(&period());
        assert_eq!(flow.operating, Money::from_dollars(400));
        assert_eq!(flow.investing, Money::from_dollars(-120));
        assert_eq!(flow.financing, Money::from_dollars(-40));
        assert_eq!(flow.net(), Money::from_dollars(240));
    }

    #[test]
    fn test_working_capital_ratios() {
        let wc = drivers().working_capital(&period());
        assert_eq!(wc.current_assets, Money::from_dollars(400));
        assert_eq!(wc.current_liabilities, Money::from_dollars(150));
        assert!((wc.current_ratio() - 400.0 / 150.0).abs() < 1e-12);
        assert!((wc.quick_ratio() - 280.0 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratios_without_liabilities() {
        let wc = WorkingCapital {
            current_assets: Money::from_dollars(10),
            current_liabilities: Money::zero(),
        };
        assert_eq!(wc.current_ratio(), 0.0);
        assert_eq!(wc.quick_ratio(), 0.0);
    }
}
