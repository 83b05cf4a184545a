//! Display formatting for terminal output
//!
//! Provides utilities for formatting amounts, ratios and tables for the
//! report views.

pub mod report;

pub use report::{
    format_bar, format_change, format_compact, format_fraction, format_ratio, format_title,
    render_table, separator,
};
