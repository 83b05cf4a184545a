//! CLI commands for reports
//!
//! Each command builds a fresh dashboard from its flags and prints one view,
//! or writes it as CSV when `--output` is given.

use clap::{Args, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use super::{open_output, DatasetArgs};
use crate::config::Settings;
use crate::error::FinResult;
use crate::services::{Dashboard, DashboardView};

/// Arguments shared by the report commands
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Headline KPIs for the window with the monthly trend
    #[command(alias = "overview")]
    Summary(ReportArgs),

    /// Revenue, expenses and profit per department
    #[command(alias = "depts")]
    Departments(ReportArgs),

    /// Latest-period ratios against targets and industry averages
    Ratios(ReportArgs),

    /// Cash flow components and working capital
    CashFlow(ReportArgs),

    /// Periods crossing the anomaly thresholds
    Anomalies(ReportArgs),

    /// Correlation of revenue, expenses, profit and margin
    Correlation(ReportArgs),

    /// Mean profit margin by year and month of year
    #[command(alias = "heatmap")]
    MarginCalendar(ReportArgs),
}

#[derive(Debug, Clone, Copy)]
enum View {
    Summary,
    Departments,
    Ratios,
    CashFlow,
    Anomalies,
    Correlation,
    MarginCalendar,
}

/// Handle report commands
pub fn handle_report_command(settings: &Settings, cmd: ReportCommands) -> FinResult<()> {
    let (view, args) = match cmd {
        ReportCommands::Summary(args) => (View::Summary, args),
        ReportCommands::Departments(args) => (View::Departments, args),
        ReportCommands::Ratios(args) => (View::Ratios, args),
        ReportCommands::CashFlow(args) => (View::CashFlow, args),
        ReportCommands::Anomalies(args) => (View::Anomalies, args),
        ReportCommands::Correlation(args) => (View::Correlation, args),
        ReportCommands::MarginCalendar(args) => (View::MarginCalendar, args),
    };

    let request = args.dataset.to_request(settings)?;
    let dashboard = Dashboard::build(&request);

    match args.output {
        Some(path) => {
            let mut writer = open_output(Some(path.as_path()))?;
            export_view(&dashboard, view, writer.as_mut())?;
            writer.flush()?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            if let Some(scenario) = dashboard.adjusted.scenario() {
                println!(
                    "Scenario: revenue {:+.1}%, expenses {:+.1}%{}\n",
                    scenario.revenue_change_percent(),
                    scenario.expense_change_percent(),
                    scenario
                        .starting_at
                        .map(|m| format!(" from {}", m))
                        .unwrap_or_default()
                );
            }
            println!("{}", render_view(&dashboard, view, &settings.currency_symbol));
        }
    }

    Ok(())
}

fn render_view(dashboard: &DashboardView, view: View, symbol: &str) -> String {
    match view {
        View::Summary => dashboard.summary.format_terminal(symbol),
        View::Departments => dashboard.departments.format_terminal(symbol),
        View::Ratios => dashboard.ratios.format_terminal(),
        View::CashFlow => dashboard.cash_flow.format_terminal(symbol),
        View::Anomalies => dashboard.anomalies.format_terminal(),
        View::Correlation => dashboard.correlation.format_terminal(),
        View::MarginCalendar => dashboard.margin_calendar.format_terminal(),
    }
}

fn export_view(dashboard: &DashboardView, view: View, writer: &mut dyn Write) -> FinResult<()> {
    match view {
        View::Summary => dashboard.summary.export_csv(writer),
        View::Departments => dashboard.departments.export_csv(writer),
        View::Ratios => dashboard.ratios.export_csv(writer),
        View::CashFlow => dashboard.cash_flow.export_csv(writer),
        View::Anomalies => dashboard.anomalies.export_csv(writer),
        View::Correlation => dashboard.correlation.export_csv(writer),
        View::MarginCalendar => dashboard.margin_calendar.export_csv(writer),
    }
}
