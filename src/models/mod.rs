//! Core data models for fincontrol
//!
//! This module contains the data structures of the financial-controlling
//! domain: money, months, monthly periods, departments, cash flow, scenarios,
//! view filters and the generated dataset that ties them together.

pub mod cash_flow;
pub mod dataset;
pub mod department;
pub mod filter;
pub mod money;
pub mod month;
pub mod period;
pub mod scenario;

pub use cash_flow::{CashFlow, CashFlowDrivers, WorkingCapital};
pub use dataset::Dataset;
pub use department::{
    Department, DepartmentRecord, DepartmentSplit, DepartmentWeights, DEPARTMENT_COUNT,
};
pub use filter::{DepartmentFilter, TimeWindow};
pub use money::Money;
pub use month::{short_month_name, Month};
pub use period::{BudgetFigures, FinancialPeriod};
pub use scenario::Scenario;
