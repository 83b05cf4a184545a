//! Department Performance Report
//!
//! Totals per department over the selected window, restricted to the
//! departments in the filter.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tabled::Tabled;

use crate::display::{format_bar, format_fraction, format_title, render_table};
use crate::error::FinResult;
use crate::models::{Dataset, Department, DepartmentFilter, DepartmentRecord, Money};

/// Aggregated figures for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: Department,
    pub revenue: Money,
    pub expenses: Money,
    pub profit: Money,
    /// Fraction of the selected departments' revenue
    pub revenue_share: f64,
}

/// Department Performance Report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentReport {
    pub departments: Vec<DepartmentSummary>,
    /// Filtered per-period records the summaries were built from
    pub records: Vec<DepartmentRecord>,
    pub total_revenue: Money,
    pub total_expenses: Money,
}

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Distribution")]
    bar: String,
}

impl DepartmentReport {
    /// Aggregate every period of `dataset` for the departments in `filter`
    pub fn generate(dataset: &Dataset, filter: &DepartmentFilter) -> Self {
        let records: Vec<DepartmentRecord> = dataset
            .department_records()
            .into_iter()
            .filter(|r| filter.includes(r.department))
            .collect();

        let mut departments: Vec<DepartmentSummary> = filter
            .departments()
            .into_iter()
            .map(|department| {
                let own = records.iter().filter(|r| r.department == department);
                let revenue: Money = own.clone().map(|r| r.revenue).sum();
                let expenses: Money = own.map(|r| r.expenses).sum();
                DepartmentSummary {
                    department,
                    revenue,
                    expenses,
                    profit: revenue - expenses,
                    revenue_share: 0.0,
                }
            })
            .collect();

        let total_revenue: Money = departments.iter().map(|d| d.revenue).sum();
        let total_expenses: Money = departments.iter().map(|d| d.expenses).sum();
        for summary in departments.iter_mut() {
            summary.revenue_share = summary.revenue.ratio_to(total_revenue);
        }

        Self {
            departments,
            records,
            total_revenue,
            total_expenses,
        }
    }

    /// Department with the highest profit
    pub fn most_profitable(&self) -> Option<&DepartmentSummary> {
        self.departments.iter().max_by_key(|d| d.profit)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format_title("Department Performance");

        if self.departments.is_empty() {
            output.push_str("No departments selected.\n");
            return output;
        }

        let max_share = self
            .departments
            .iter()
            .map(|d| d.revenue_share)
            .fold(0.0, f64::max);

        let rows = self.departments.iter().map(|d| DepartmentRow {
            department: d.department.to_string(),
            revenue: d.revenue.format_with_symbol(symbol),
            expenses: d.expenses.format_with_symbol(symbol),
            profit: d.profit.format_with_symbol(symbol),
            share: format_fraction(d.revenue_share),
            bar: format_bar(d.revenue_share, max_share, 20),
        });
        output.push_str(&render_table(rows));
        output.push('\n');

        output.push_str(&format!(
            "Total revenue: {}   Total expenses: {}\n",
            self.total_revenue.format_with_symbol(symbol),
            self.total_expenses.format_with_symbol(symbol)
        ));
        if let Some(best) = self.most_profitable() {
            output.push_str(&format!("Most profitable: {}\n", best.department));
        }

        output
    }

    /// Export the per-period department records to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        crate::export::csv::write_department_records(&self.records, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use crate::services::generator::{generate, GeneratorConfig};

    fn dataset() -> Dataset {
        generate(
            &GeneratorConfig::ending_at(Month::new(2025, 6).unwrap()).with_seed(11),
            None,
        )
    }

    #[test]
    fn test_all_departments_cover_dataset_totals() {
        let data = dataset();
        let report = DepartmentReport::generate(&data, &DepartmentFilter::all());

        let revenue: Money = data.periods().iter().map(|p| p.revenue).sum();
        let expenses: Money = data.periods().iter().map(|p| p.expenses).sum();
        assert_eq!(report.departments.len(), 5);
        assert_eq!(report.total_revenue, revenue);
        assert_eq!(report.total_expenses, expenses);

        let share: f64 = report.departments.iter().map(|d| d.revenue_share).sum();
        assert!((share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_restricts_departments() {
        let filter = DepartmentFilter::only([Department::Sales, Department::Marketing]);
        let report = DepartmentReport::generate(&dataset(), &filter);

        assert_eq!(report.departments.len(), 2);
        assert_eq!(report.records.len(), 24);
        assert!(report
            .records
            .iter()
            .all(|r| matches!(r.department, Department::Sales | Department::Marketing)));
    }

    #[test]
    fn test_format_terminal() {
        let report = DepartmentReport::generate(&dataset(), &DepartmentFilter::all());
        let text = report.format_terminal("$");
        assert!(text.contains("R&D"));
        assert!(text.contains("Most profitable"));
    }
}
