//! CSV Export functionality
//!
//! Exports the combined period × department table, the period table and the
//! department table. Column order is fixed and output is byte-identical for
//! identical datasets.

use std::io::Write;

use crate::error::FinResult;
use crate::models::{Dataset, DepartmentRecord};

/// Columns of the combined export
pub const DATASET_COLUMNS: [&str; 7] = [
    "month",
    "revenue",
    "expenses",
    "profit",
    "margin",
    "department",
    "department_share",
];

/// Export one row per period and department
///
/// Revenue, expenses, profit and margin are the period totals; margin and
/// `department_share` are fractions with four decimals.
pub fn export_dataset_csv<W: Write>(dataset: &Dataset, writer: W) -> FinResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DATASET_COLUMNS)?;

    for (period, split) in dataset.periods().iter().zip(dataset.splits()) {
        let margin = format!("{:.4}", period.margin());
        for record in split.records(period) {
            wtr.write_record([
                period.month.to_string(),
                period.revenue.to_decimal_string(),
                period.expenses.to_decimal_string(),
                period.profit().to_decimal_string(),
                margin.clone(),
                record.department.to_string(),
                format!("{:.4}", record.revenue_share),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Export one row per period with budget and cash-flow columns
pub fn export_periods_csv<W: Write>(dataset: &Dataset, writer: W) -> FinResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "month",
        "revenue",
        "expenses",
        "profit",
        "margin",
        "budget_revenue",
        "budget_expenses",
        "operating_cash_flow",
        "net_cash_flow",
    ])?;

    let cash_flows = dataset.cash_flows();
    for ((period, budget), flow) in dataset
        .periods()
        .iter()
        .zip(dataset.budget())
        .zip(&cash_flows)
    {
        wtr.write_record([
            period.month.to_string(),
            period.revenue.to_decimal_string(),
            period.expenses.to_decimal_string(),
            period.profit().to_decimal_string(),
            format!("{:.4}", period.margin()),
            budget.revenue.to_decimal_string(),
            budget.expenses.to_decimal_string(),
            flow.operating.to_decimal_string(),
            flow.net().to_decimal_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export every department record of the dataset
pub fn export_departments_csv<W: Write>(dataset: &Dataset, writer: W) -> FinResult<()> {
    write_department_records(&dataset.department_records(), writer)
}

/// Write department records with their allocated amounts and shares
pub fn write_department_records<W: Write>(
    records: &[DepartmentRecord],
    writer: W,
) -> FinResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "month",
        "department",
        "revenue",
        "expenses",
        "profit",
        "revenue_share",
        "expense_share",
    ])?;

    for r in records {
        wtr.write_record([
            r.month.to_string(),
            r.department.to_string(),
            r.revenue.to_decimal_string(),
            r.expenses.to_decimal_string(),
            r.profit().to_decimal_string(),
            format!("{:.4}", r.revenue_share),
            format!("{:.4}", r.expense_share),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
