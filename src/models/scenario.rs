//! What-if scenarios
//!
//! A scenario rescales revenue and/or expenses, either for every period or
//! from a given month onward. Multipliers are clamped into a safe range
//! instead of being rejected.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::month::Month;
use super::period::FinancialPeriod;

/// Smallest multiplier a scenario may apply
pub const MIN_MULTIPLIER: f64 = 0.01;

/// Largest multiplier a scenario may apply
pub const MAX_MULTIPLIER: f64 = 10.0;

/// A hypothetical multiplicative adjustment of revenue and expenses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub revenue_multiplier: f64,
    pub expense_multiplier: f64,
    /// First month the adjustment applies to; `None` applies it to every period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_at: Option<Month>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::baseline()
    }
}

impl Scenario {
    /// The identity scenario
    pub fn baseline() -> Self {
        Self {
            revenue_multiplier: 1.0,
            expense_multiplier: 1.0,
            starting_at: None,
        }
    }

    /// Build a scenario from multipliers, clamping them into the safe range
    pub fn new(revenue_multiplier: f64, expense_multiplier: f64) -> Self {
        Self {
            revenue_multiplier: clamp_multiplier("revenue", revenue_multiplier),
            expense_multiplier: clamp_multiplier("expense", expense_multiplier),
            starting_at: None,
        }
    }

    /// Build a scenario from percentage changes (e.g. `+10.0`, `-5.0`)
    pub fn from_percent_changes(revenue_pct: f64, expense_pct: f64) -> Self {
        Self::new(1.0 + revenue_pct / 100.0, 1.0 + expense_pct / 100.0)
    }

    /// Restrict the adjustment to periods from `month` onward
    pub fn starting_at(mut self, month: Month) -> Self {
        self.starting_at = Some(month);
        self
    }

    /// True when applying this scenario changes nothing
    pub fn is_identity(&self) -> bool {
        self.revenue_multiplier == 1.0 && self.expense_multiplier == 1.0
    }

    /// Whether the adjustment covers the given month
    pub fn applies_to(&self, month: Month) -> bool {
        self.starting_at.map_or(true, |start| month >= start)
    }

    /// Return the adjusted copy of a period
    ///
    /// Multipliers are re-clamped here so hand-built or deserialized
    /// scenarios get the same protection as ones made through [`Scenario::new`].
    pub fn apply(&self, period: &FinancialPeriod) -> FinancialPeriod {
        if !self.applies_to(period.month) || self.is_identity() {
            return period.clone();
        }
        let revenue_multiplier = clamp_multiplier("revenue", self.revenue_multiplier);
        let expense_multiplier = clamp_multiplier("expense", self.expense_multiplier);

        FinancialPeriod::new(
            period.month,
            period.revenue.scale(revenue_multiplier),
            period.expenses.scale(expense_multiplier),
        )
    }

    /// Percentage change applied to revenue (e.g. 10.0 for a 1.10 multiplier)
    pub fn revenue_change_percent(&self) -> f64 {
        (self.revenue_multiplier - 1.0) * 100.0
    }

    /// Percentage change applied to expenses
    pub fn expense_change_percent(&self) -> f64 {
        (self.expense_multiplier - 1.0) * 100.0
    }
}

fn clamp_multiplier(which: &str, value: f64) -> f64 {
    if !value.is_finite() {
        warn!(multiplier = which, value, "non-finite scenario multiplier replaced by 1.0");
        return 1.0;
    }
    let clamped = value.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER);
    if clamped != value {
        warn!(multiplier = which, value, clamped, "scenario multiplier clamped");
    }
    clamped
}
