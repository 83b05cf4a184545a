//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the report views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Money;

/// Format an amount with K/M abbreviations, e.g. "$1.2M", "$950.0K", "$950"
pub fn format_compact(amount: Money, symbol: &str) -> String {
    let value = amount.to_f64();
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    // Thresholds sit where the smaller unit would round up to 1000.
    if abs >= 999_950.0 {
        format!("{}{}{:.1}M", sign, symbol, abs / 1_000_000.0)
    } else if abs >= 999.5 {
        format!("{}{}{:.1}K", sign, symbol, abs / 1_000.0)
    } else {
        format!("{}{}{:.0}", sign, symbol, abs)
    }
}

/// Format a fraction as a percentage with one decimal ("0.253" -> "25.3%")
pub fn format_fraction(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Format a signed percentage change ("+4.2%")
pub fn format_change(pct: f64) -> String {
    format!("{:+.1}%", pct)
}

/// Format a ratio value: fractions below 1 as percentages, larger values as plain numbers
pub fn format_ratio(value: f64) -> String {
    if value.abs() < 1.0 {
        format_fraction(value)
    } else {
        format!("{:.2}", value)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header with an underline of the same width
pub fn format_title(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Render rows as a rounded terminal table
pub fn render_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
