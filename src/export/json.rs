//! JSON Export functionality
//!
//! Exports a dataset with its derived metrics to JSON format with schema
//! versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{FinError, FinResult};
use crate::models::{
    BudgetFigures, CashFlow, Dataset, DepartmentRecord, FinancialPeriod, Money, Month, Scenario,
    WorkingCapital,
};
use crate::services::metrics::{derive_metrics, DerivedMetrics};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full dataset export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Seed the dataset was generated from
    pub seed: u64,

    /// Scenario applied to the actuals, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,

    pub periods: Vec<FinancialPeriod>,
    pub budget: Vec<BudgetFigures>,
    pub departments: Vec<DepartmentRecord>,
    pub cash_flow: Vec<CashFlow>,
    pub working_capital: Vec<WorkingCapital>,
    pub metrics: DerivedMetrics,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub period_count: usize,
    pub first_month: Option<Month>,
    pub last_month: Option<Month>,
    pub total_revenue: Money,
    pub total_expenses: Money,
}

impl DatasetExport {
    /// Create a new export from a dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let metrics = derive_metrics(dataset.periods(), Some(dataset.budget()));

        let metadata = ExportMetadata {
            period_count: dataset.len(),
            first_month: dataset.periods().first().map(|p| p.month),
            last_month: dataset.latest().map(|p| p.month),
            total_revenue: metrics.total_revenue,
            total_expenses: metrics.total_expenses,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            seed: dataset.seed(),
            scenario: dataset.scenario().copied(),
            periods: dataset.periods().to_vec(),
            budget: dataset.budget().to_vec(),
            departments: dataset.department_records(),
            cash_flow: dataset.cash_flows(),
            working_capital: dataset.working_capital(),
            metrics,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for pair in self.periods.windows(2) {
            if pair[1].month != pair[0].month.next() {
                return Err(format!(
                    "Periods are not consecutive: {} follows {}",
                    pair[1].month, pair[0].month
                ));
            }
        }

        if self.budget.len() != self.periods.len() {
            return Err(format!(
                "Budget has {} entries for {} periods",
                self.budget.len(),
                self.periods.len()
            ));
        }

        for period in &self.periods {
            let own = self.departments.iter().filter(|r| r.month == period.month);
            let revenue: Money = own.clone().map(|r| r.revenue).sum();
            let expenses: Money = own.map(|r| r.expenses).sum();
            if revenue != period.revenue || expenses != period.expenses {
                return Err(format!(
                    "Department figures for {} do not add up to the period totals",
                    period.month
                ));
            }
        }

        Ok(())
    }
}

/// Export a dataset to JSON
pub fn export_full_json<W: Write>(dataset: &Dataset, writer: W, pretty: bool) -> FinResult<()> {
    let export = DatasetExport::from_dataset(dataset);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export and check its consistency
pub fn import_from_json(json_str: &str) -> FinResult<DatasetExport> {
    let export: DatasetExport = serde_json::from_str(json_str)?;
    export.validate().map_err(FinError::Validation)?;
    Ok(export)
}
