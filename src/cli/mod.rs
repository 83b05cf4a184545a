//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod report;

use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::Settings;
use crate::error::{FinError, FinResult};
use crate::models::{DepartmentFilter, Money, Month, Scenario, TimeWindow};
use crate::services::{DashboardRequest, GeneratorConfig, MAX_BASE_REVENUE};

pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};

/// Flags shared by every command that builds a dataset
#[derive(Args, Debug, Clone, Default)]
pub struct DatasetArgs {
    /// Random seed (default from settings)
    #[arg(long, env = "FINCONTROL_SEED")]
    pub seed: Option<u64>,

    /// Last month of the generated year (YYYY-MM, default: current month)
    #[arg(long)]
    pub end_month: Option<String>,

    /// Time window: 3, 6, 12 or all (default from settings)
    #[arg(short, long)]
    pub window: Option<String>,

    /// What-if revenue change in percent (e.g. 10 or -5)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub revenue_change: f64,

    /// What-if expense change in percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub expense_change: f64,

    /// First month the what-if changes apply to (YYYY-MM)
    #[arg(long)]
    pub scenario_from: Option<String>,

    /// Restrict department views (repeatable)
    #[arg(short, long = "department")]
    pub departments: Vec<String>,

    /// Base monthly revenue level (default from settings)
    #[arg(long)]
    pub base_revenue: Option<String>,
}

impl DatasetArgs {
    /// Combine the flags with the settings defaults into a dashboard request
    pub fn to_request(&self, settings: &Settings) -> FinResult<DashboardRequest> {
        let end_month = match &self.end_month {
            Some(s) => parse_month(s)?,
            None => Month::current(),
        };

        let base_revenue = match &self.base_revenue {
            Some(s) => parse_base_revenue(s)?,
            None => settings.base_revenue,
        };

        let config = GeneratorConfig::ending_at(end_month)
            .with_seed(self.seed.unwrap_or(settings.default_seed))
            .with_base_revenue(base_revenue);

        let window = match &self.window {
            Some(s) => s.parse::<TimeWindow>()?,
            None => settings.default_window,
        };

        let scenario = if self.revenue_change != 0.0 || self.expense_change != 0.0 {
            let scenario = Scenario::from_percent_changes(self.revenue_change, self.expense_change);
            Some(match &self.scenario_from {
                Some(s) => scenario.starting_at(parse_month(s)?),
                None => scenario,
            })
        } else {
            None
        };

        let departments = if self.departments.is_empty() {
            DepartmentFilter::all()
        } else {
            DepartmentFilter::only(
                self.departments
                    .iter()
                    .map(|d| d.parse())
                    .collect::<FinResult<Vec<_>>>()?,
            )
        };

        Ok(DashboardRequest {
            config,
            scenario,
            window,
            departments,
            thresholds: settings.anomaly_thresholds,
        })
    }
}

fn parse_month(s: &str) -> FinResult<Month> {
    Month::parse(s).map_err(|e| {
        FinError::Validation(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2025-01)",
            e
        ))
    })
}

fn parse_base_revenue(s: &str) -> FinResult<Money> {
    let amount = Money::parse(s).map_err(|e| FinError::Validation(e.to_string()))?;
    if !amount.is_positive() || amount > MAX_BASE_REVENUE {
        return Err(FinError::Validation(format!(
            "Base revenue must be positive and at most {}: {}",
            MAX_BASE_REVENUE, s
        )));
    }
    Ok(amount)
}

/// Open `path` for writing, or stdout when no path is given
fn open_output(path: Option<&Path>) -> FinResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
