use anyhow::Result;
use clap::{Parser, Subcommand};

use fincontrol::cli::{handle_export_command, handle_report_command, ExportCommands, ReportCommands};
use fincontrol::config::{paths::FinPaths, settings::Settings};
use fincontrol::display::separator;

#[derive(Parser)]
#[command(
    name = "fincontrol",
    version,
    about = "Financial controlling dashboard for the terminal",
    long_about = "fincontrol generates a reproducible year of monthly company financials \
                  and shows the controlling views on top of it: KPI summary, department \
                  performance, ratio benchmarks, cash flow, anomaly flags and what-if \
                  scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Export the dataset to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    fincontrol::init_tracing();

    let cli = Cli::parse();

    let paths = FinPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => handle_report_command(&settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&settings, cmd)?,
        Some(Commands::Init { force }) => {
            if paths.is_initialized() && !force {
                println!(
                    "Settings already exist at: {}",
                    paths.settings_file().display()
                );
                println!("Use --force to reset them to the defaults.");
            } else {
                Settings::default().save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            println!("fincontrol Configuration");
            println!("{}", separator(24));
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Default seed:     {}", settings.default_seed);
            println!("  Base revenue:     {}", settings.base_revenue);
            println!("  Default window:   {}", settings.default_window);
            let t = &settings.anomaly_thresholds;
            println!(
                "  Anomaly flags:    margin < {:.0}%, revenue drop > {:.0}%, expense ratio > {:.0}%, |budget variance| > {:.0}%",
                t.min_margin * 100.0,
                t.max_revenue_drop * 100.0,
                t.max_expense_ratio * 100.0,
                t.max_budget_variance * 100.0
            );
        }
        None => {
            println!("fincontrol - Financial controlling dashboard");
            println!();
            println!("Run 'fincontrol --help' for usage information.");
            println!("Run 'fincontrol summary' for the performance overview.");
        }
    }

    Ok(())
}
