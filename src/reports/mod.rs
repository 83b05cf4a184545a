//! Reports module for fincontrol
//!
//! Provides the dashboard views: performance summary, department
//! performance, ratio benchmarking, cash flow, anomaly flags, the
//! correlation matrix and the monthly margin calendar. Every report is generated from a [`Dataset`] and
//! can be rendered for the terminal or exported as CSV.
//!
//! [`Dataset`]: crate::models::Dataset

pub mod anomalies;
pub mod cash_flow;
pub mod correlation;
pub mod departments;
pub mod margin_calendar;
pub mod ratios;
pub mod summary;

pub use anomalies::AnomalyReport;
pub use cash_flow::{CashFlowEntry, CashFlowReport};
pub use correlation::CorrelationReport;
pub use departments::{DepartmentReport, DepartmentSummary};
pub use margin_calendar::{MarginCalendar, MarginCalendarRow};
pub use ratios::{RatioDirection, RatioReport, RatioRow, RatioStatus};
pub use summary::{MarginKpi, MoneyKpi, SummaryReport};
