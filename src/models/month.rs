//! Calendar month representation
//!
//! Every financial period in a dataset is exactly one calendar month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter abbreviation for a 1-based month of year
pub fn short_month_name(month_of_year: u32) -> Option<&'static str> {
    let index = month_of_year.checked_sub(1)? as usize;
    MONTH_NAMES.get(index).map(|name| &name[..3])
}

/// A calendar month (e.g., "2025-01")
///
/// Deserialization goes through [`Month::new`], so a month outside 1..=12
/// is rejected when reading stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthFields")]
pub struct Month {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct MonthFields {
    year: i32,
    month: u32,
}

impl TryFrom<MonthFields> for Month {
    type Error = MonthParseError;

    fn try_from(fields: MonthFields) -> Result<Self, Self::Error> {
        Month::new(fields.year, fields.month)
    }
}

impl Month {
    /// Create a month; `month` is 1-based and must be in 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The current calendar month (local time)
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::from_date(today)
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of year, 1-based
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Long label such as "January 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The `count` months ending at (and including) this one, oldest first
    pub fn trailing(&self, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut current = *self;
        for _ in 0..count {
            months.push(current);
            current = current.prev();
        }
        months.reverse();
        months
    }

    /// Parse a month string in "YYYY-MM" format
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(jan.next(), Month::new(2025, 2).unwrap());
        assert_eq!(jan.prev(), Month::new(2024, 12).unwrap());

        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), jan);
    }

    #[test]
    fn test_trailing() {
        let end = Month::new(2025, 3).unwrap();
        let months = end.trailing(12);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], Month::new(2024, 4).unwrap());
        assert_eq!(months[11], end);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::parse("2025-01").unwrap(), Month::new(2025, 1).unwrap());
        assert_eq!(Month::parse("2025-13"), Err(MonthParseError::InvalidMonth(13)));
        assert!(Month::parse("January").is_err());
    }

    #[test]
    fn test_display_and_label() {
        let m = Month::new(2025, 1).unwrap();
        assert_eq!(m.to_string(), "2025-01");
        assert_eq!(m.label(), "January 2025");
    }

    #[test]
    fn test_ordering() {
        assert!(Month::new(2024, 12).unwrap() < Month::new(2025, 1).unwrap());
    }

    #[test]
    fn test_deserialize_validates_month() {
        let month: Month = serde_json::from_str(r#"{"year":2025,"month":12}"#).unwrap();
        assert_eq!(month, Month::new(2025, 12).unwrap());

        for bad in [r#"{"year":2025,"month":13}"#, r#"{"year":2025,"month":0}"#] {
            let err = serde_json::from_str::<Month>(bad).unwrap_err();
            assert!(err.to_string().contains("Invalid month"), "{}", err);
        }
    }

    #[test]
    fn test_short_month_name() {
        assert_eq!(short_month_name(1), Some("Jan"));
        assert_eq!(short_month_name(12), Some("Dec"));
        assert_eq!(short_month_name(0), None);
        assert_eq!(short_month_name(13), None);
    }
}
