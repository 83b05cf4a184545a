//! CLI commands for data export
//!
//! Exports the scenario-adjusted, windowed dataset. Without an output path
//! the export is written to stdout.

use clap::{Args, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use super::{open_output, DatasetArgs};
use crate::config::Settings;
use crate::error::FinResult;
use crate::export::{csv, json, yaml};
use crate::models::Dataset;
use crate::services::Dashboard;

/// Arguments shared by the export commands
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// One row per period and department (month, revenue, expenses, profit,
    /// margin, department, department_share)
    Dataset(ExportArgs),

    /// One row per period with budget and cash-flow columns
    Periods(ExportArgs),

    /// One row per period and department with allocated amounts
    Departments(ExportArgs),

    /// Full dataset with derived metrics as JSON
    Json {
        #[command(flatten)]
        args: ExportArgs,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Full dataset with derived metrics as YAML
    Yaml(ExportArgs),
}

/// Handle export commands
pub fn handle_export_command(settings: &Settings, cmd: ExportCommands) -> FinResult<()> {
    match cmd {
        ExportCommands::Dataset(args) => write_export(settings, args, |d, w| {
            csv::export_dataset_csv(d, w)
        }),
        ExportCommands::Periods(args) => write_export(settings, args, |d, w| {
            csv::export_periods_csv(d, w)
        }),
        ExportCommands::Departments(args) => write_export(settings, args, |d, w| {
            csv::export_departments_csv(d, w)
        }),
        ExportCommands::Json { args, pretty } => write_export(settings, args, |d, w| {
            json::export_full_json(d, w, pretty)
        }),
        ExportCommands::Yaml(args) => write_export(settings, args, |d, w| {
            yaml::export_full_yaml(d, w)
        }),
    }
}

fn write_export(
    settings: &Settings,
    args: ExportArgs,
    export: impl FnOnce(&Dataset, &mut dyn Write) -> FinResult<()>,
) -> FinResult<()> {
    let request = args.dataset.to_request(settings)?;
    let dashboard = Dashboard::build(&request);

    let mut writer = open_output(args.output.as_deref())?;
    export(&dashboard.windowed, writer.as_mut())?;
    writer.flush()?;

    if let Some(path) = &args.output {
        println!(
            "Exported {} periods to: {}",
            dashboard.windowed.len(),
            path.display()
        );
    }

    Ok(())
}
