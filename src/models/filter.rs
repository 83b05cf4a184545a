//! View filters: trailing time window and department selection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::department::Department;
use crate::error::FinError;

/// Trailing window of periods to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    LastThreeMonths,
    LastSixMonths,
    #[default]
    LastTwelveMonths,
    AllTime,
}

impl TimeWindow {
    /// Number of trailing periods covered, `None` for all of them
    pub fn months(&self) -> Option<usize> {
        match self {
            Self::LastThreeMonths => Some(3),
            Self::LastSixMonths => Some(6),
            Self::LastTwelveMonths => Some(12),
            Self::AllTime => None,
        }
    }

    /// Index of the first period inside the window for a sequence of `len` periods
    pub fn start_index(&self, len: usize) -> usize {
        self.months().map_or(0, |n| len.saturating_sub(n))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastThreeMonths => write!(f, "Last 3 Months"),
            Self::LastSixMonths => write!(f, "Last 6 Months"),
            Self::LastTwelveMonths => write!(f, "Last 12 Months"),
            Self::AllTime => write!(f, "All Time"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "3" | "3m" | "last_three_months" => Ok(Self::LastThreeMonths),
            "6" | "6m" | "last_six_months" => Ok(Self::LastSixMonths),
            "12" | "12m" | "last_twelve_months" => Ok(Self::LastTwelveMonths),
            "all" | "all_time" => Ok(Self::AllTime),
            other => Err(FinError::Validation(format!(
                "Invalid time window: {}. Use 3, 6, 12 or all",
                other
            ))),
        }
    }
}

/// Set of departments to include; empty means all of them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepartmentFilter {
    selected: BTreeSet<Department>,
}

impl DepartmentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(departments: impl IntoIterator<Item = Department>) -> Self {
        Self {
            selected: departments.into_iter().collect(),
        }
    }

    pub fn includes(&self, department: Department) -> bool {
        self.selected.is_empty() || self.selected.contains(&department)
    }

    /// The included departments in canonical order
    pub fn departments(&self) -> Vec<Department> {
        Department::ALL
            .iter()
            .copied()
            .filter(|d| self.includes(*d))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_index() {
        assert_eq!(TimeWindow::LastThreeMonths.start_index(12), 9);
        assert_eq!(TimeWindow::LastTwelveMonths.start_index(12), 0);
        assert_eq!(TimeWindow::LastSixMonths.start_index(4), 0);
        assert_eq!(TimeWindow::AllTime.start_index(12), 0);
    }

    #[test]
    fn test_parse_window() {
        assert_eq!("6".parse::<TimeWindow>().unwrap(), TimeWindow::LastSixMonths);
        assert_eq!("ALL".parse::<TimeWindow>().unwrap(), TimeWindow::AllTime);
        assert!("7".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_department_filter() {
        let all = DepartmentFilter::all();
        assert_eq!(all.departments().len(), 5);

        let some = DepartmentFilter::only([Department::Operations, Department::Sales]);
        assert!(some.includes(Department::Sales));
        assert!(!some.includes(Department::Marketing));
        assert_eq!(
            some.departments(),
            vec![Department::Sales, Department::Operations]
        );
    }
}
