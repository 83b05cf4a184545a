//! fincontrol - Financial controlling dashboard for the terminal
//!
//! This library generates a reproducible synthetic year of monthly company
//! financials (revenue, expenses, department allocations, budget baseline,
//! cash flow) and derives the controlling views on top of it: margins,
//! growth, budget variance, ratio benchmarks, anomaly flags and what-if
//! scenarios.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, periods, departments, scenarios)
//! - `services`: Generation, metric derivation and the dashboard session
//! - `reports`: Terminal and CSV views over a dataset
//! - `export`: CSV, JSON and YAML export
//! - `display`: Shared terminal formatting
//! - `cli`: Command handlers for the `fincontrol` binary
//!
//! # Example
//!
//! ```rust
//! use fincontrol::models::{Month, Scenario};
//! use fincontrol::services::{derive_metrics, generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::ending_at(Month::new(2025, 12).unwrap()).with_seed(42);
//! let dataset = generate(&config, Some(&Scenario::new(1.1, 1.0)));
//! let metrics = derive_metrics(dataset.periods(), Some(dataset.budget()));
//! assert_eq!(metrics.periods.len(), 12);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{FinError, FinResult};
pub use services::{derive_metrics, generate};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `fincontrol=warn`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fincontrol=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
