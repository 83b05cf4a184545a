//! Department model
//!
//! Each period's revenue and expenses are split across a fixed, closed set of
//! departments. Splits are stored as weight vectors and the money amounts are
//! derived on demand, so a rescaled period is always re-allocated in full.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::month::Month;
use super::period::FinancialPeriod;
use crate::error::FinError;

/// Number of departments in the fixed set
pub const DEPARTMENT_COUNT: usize = 5;

/// An organizational unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Sales,
    Marketing,
    #[serde(rename = "R&D")]
    ResearchAndDevelopment,
    Operations,
    Administration,
}

impl Department {
    /// All departments in their canonical order
    pub const ALL: [Department; DEPARTMENT_COUNT] = [
        Department::Sales,
        Department::Marketing,
        Department::ResearchAndDevelopment,
        Department::Operations,
        Department::Administration,
    ];

    /// Position of this department in [`Department::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::Sales => 0,
            Self::Marketing => 1,
            Self::ResearchAndDevelopment => 2,
            Self::Operations => 3,
            Self::Administration => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Marketing => "Marketing",
            Self::ResearchAndDevelopment => "R&D",
            Self::Operations => "Operations",
            Self::Administration => "Administration",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Department {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "marketing" => Ok(Self::Marketing),
            "r&d" | "rd" | "r-and-d" | "research" => Ok(Self::ResearchAndDevelopment),
            "operations" | "ops" => Ok(Self::Operations),
            "administration" | "admin" => Ok(Self::Administration),
            _ => Err(FinError::unknown_department(s)),
        }
    }
}

/// Normalized allocation weights, one per department, summing to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWeights([f64; DEPARTMENT_COUNT]);

impl DepartmentWeights {
    /// Equal weight for every department
    pub fn equal() -> Self {
        Self([1.0 / DEPARTMENT_COUNT as f64; DEPARTMENT_COUNT])
    }

    /// Normalize raw non-negative weights so they sum to 1
    ///
    /// Falls back to equal weights when the raw weights are unusable.
    pub fn normalized(raw: [f64; DEPARTMENT_COUNT]) -> Self {
        let usable = raw.iter().all(|w| w.is_finite() && *w >= 0.0);
        let sum: f64 = raw.iter().sum();
        if !usable || sum <= 0.0 {
            return Self::equal();
        }
        let mut weights = raw;
        for w in weights.iter_mut() {
            *w /= sum;
        }
        Self(weights)
    }

    pub fn get(&self, department: Department) -> f64 {
        self.0[department.index()]
    }

    /// Split `total` across departments so the parts sum to `total` exactly
    ///
    /// Uses the largest-remainder method on whole cents.
    pub fn allocate(&self, total: Money) -> [Money; DEPARTMENT_COUNT] {
        let cents = total.cents();
        let mut parts = [0i64; DEPARTMENT_COUNT];
        let mut remainders = [(0usize, 0.0f64); DEPARTMENT_COUNT];
        let mut assigned = 0i64;

        for (i, weight) in self.0.iter().enumerate() {
            let exact = cents as f64 * weight;
            let floor = exact.floor();
            parts[i] = floor as i64;
            assigned += parts[i];
            remainders[i] = (i, exact - floor);
        }

        remainders.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut leftover = cents - assigned;
        let mut k = 0;
        while leftover > 0 {
            parts[remainders[k % DEPARTMENT_COUNT].0] += 1;
            leftover -= 1;
            k += 1;
        }
        while leftover < 0 {
            parts[remainders[DEPARTMENT_COUNT - 1 - k % DEPARTMENT_COUNT].0] -= 1;
            leftover += 1;
            k += 1;
        }

        parts.map(Money::from_cents)
    }
}

/// Revenue and expense weights for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSplit {
    pub revenue: DepartmentWeights,
    pub expenses: DepartmentWeights,
}

impl DepartmentSplit {
    pub fn new(revenue: DepartmentWeights, expenses: DepartmentWeights) -> Self {
        Self { revenue, expenses }
    }

    /// Derive the department records for a period
    pub fn records(&self, period: &FinancialPeriod) -> Vec<DepartmentRecord> {
        let revenues = self.revenue.allocate(period.revenue);
        let expenses = self.expenses.allocate(period.expenses);

        Department::ALL
            .iter()
            .map(|&department| {
                let i = department.index();
                DepartmentRecord {
                    month: period.month,
                    department,
                    revenue: revenues[i],
                    expenses: expenses[i],
                    revenue_share: revenues[i].ratio_to(period.revenue),
                    expense_share: expenses[i].ratio_to(period.expenses),
                }
            })
            .collect()
    }
}

/// One department's slice of a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub month: Month,
    pub department: Department,
    /// Allocated revenue
    pub revenue: Money,
    /// Allocated expenses
    pub expenses: Money,
    /// Fraction of the period's revenue
    pub revenue_share: f64,
    /// Fraction of the period's expenses
    pub expense_share: f64,
}

impl DepartmentRecord {
    pub fn profit(&self) -> Money {
        self.revenue - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_department() {
        assert_eq!("sales".parse::<Department>().unwrap(), Department::Sales);
        assert_eq!("R&D".parse::<Department>().unwrap(), Department::ResearchAndDevelopment);
        assert_eq!("admin".parse::<Department>().unwrap(), Department::Administration);
        assert!("Legal".parse::<Department>().is_err());
    }

    #[test]
    fn test_index_matches_order() {
        for (i, dept) in Department::ALL.iter().enumerate() {
            assert_eq!(dept.index(), i);
        }
    }

    #[test]
    fn test_normalized_weights_sum_to_one() {
        let weights = DepartmentWeights::normalized([0.1, 0.3, 0.2, 0.25, 0.15]);
        let sum: f64 = Department::ALL.iter().map(|d| weights.get(*d)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unusable_weights_fall_back_to_equal() {
        assert_eq!(DepartmentWeights::normalized([0.0; 5]), DepartmentWeights::equal());
        assert_eq!(
            DepartmentWeights::normalized([f64::NAN, 1.0, 1.0, 1.0, 1.0]),
            DepartmentWeights::equal()
        );
    }

    #[test]
    fn test_allocate_is_exact() {
        let weights = DepartmentWeights::equal();
        let parts = weights.allocate(Money::from_cents(1001));
        let total: Money = parts.iter().sum();
        assert_eq!(total.cents(), 1001);
        assert_eq!(parts[0].cents(), 201);
        assert_eq!(parts[4].cents(), 200);

        let uneven = DepartmentWeights::normalized([0.13, 0.29, 0.11, 0.27, 0.2]);
        for cents in [0, 1, 7, 99_999, 123_456_789] {
            let total: Money = uneven.allocate(Money::from_cents(cents)).iter().sum();
            assert_eq!(total.cents(), cents);
        }
    }

    #[test]
    fn test_records_sum_to_period_totals() {
        let month = Month::new(2025, 6).unwrap();
        let period = FinancialPeriod::new(month, Money::from_cents(98_765_43), Money::from_cents(61_234_57));
        let split = DepartmentSplit::new(
            DepartmentWeights::normalized([0.2, 0.1, 0.3, 0.25, 0.15]),
            DepartmentWeights::normalized([0.22, 0.18, 0.2, 0.24, 0.16]),
        );

        let records = split.records(&period);
        assert_eq!(records.len(), DEPARTMENT_COUNT);

        let revenue: Money = records.iter().map(|r| r.revenue).sum();
        let expenses: Money = records.iter().map(|r| r.expenses).sum();
        assert_eq!(revenue, period.revenue);
        assert_eq!(expenses, period.expenses);

        let share: f64 = records.iter().map(|r| r.revenue_share).sum();
        assert!((share - 1.0).abs() < 1e-9);
    }
}
