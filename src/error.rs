//! Custom error types for fincontrol
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions. Numeric edge cases (division by zero,
//! out-of-range scenario multipliers, mismatched budgets) are handled with
//! sentinels and never surface here.

use thiserror::Error;

/// The main error type for fincontrol operations
#[derive(Error, Debug)]
pub enum FinError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input (month strings, department names, amounts)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(String),
}

impl FinError {
    /// Create a validation error for an unknown department name
    pub fn unknown_department(name: impl Into<String>) -> Self {
        Self::Validation(format!("Unknown department: {}", name.into()))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for fincontrol operations
pub type FinResult<T> = Result<T, FinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_unknown_department() {
        let err = FinError::unknown_department("Legal");
        assert_eq!(err.to_string(), "Validation error: Unknown department: Legal");
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fin_err: FinError = io_err.into();
        assert!(matches!(fin_err, FinError::Io(_)));
    }
}
