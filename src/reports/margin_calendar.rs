//! Margin Calendar Report
//!
//! Mean profit margin pivoted by year (rows) and month of year (columns).
//! A year that does not cover every month reads 0.0 for the missing ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::display::{format_fraction, format_title};
use crate::error::FinResult;
use crate::models::{short_month_name, Dataset};

/// One year of the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginCalendarRow {
    pub year: i32,
    /// Mean margin per month of year, January first; `None` where no period falls
    pub months: [Option<f64>; 12],
}

impl MarginCalendarRow {
    /// Mean margin for a 1-based month of year, 0.0 when there is no data
    pub fn margin(&self, month_of_year: u32) -> f64 {
        month_of_year
            .checked_sub(1)
            .and_then(|i| self.months.get(i as usize).copied().flatten())
            .unwrap_or(0.0)
    }
}

/// Margin Calendar Report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginCalendar {
    /// Rows in ascending year order
    pub years: Vec<MarginCalendarRow>,
}

impl MarginCalendar {
    pub fn generate(dataset: &Dataset) -> Self {
        let mut cells: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
        for period in dataset.periods() {
            let cell = cells
                .entry((period.month.year(), period.month.month()))
                .or_insert((0.0, 0));
            cell.0 += period.margin();
            cell.1 += 1;
        }

        let mut years: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
        for ((year, month), (sum, count)) in cells {
            let row = years.entry(year).or_insert([None; 12]);
            row[(month - 1) as usize] = Some(sum / count as f64);
        }

        Self {
            years: years
                .into_iter()
                .map(|(year, months)| MarginCalendarRow { year, months })
                .collect(),
        }
    }

    /// Format the calendar for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = format_title("Monthly Profit Margin");

        if self.years.is_empty() {
            output.push_str("No periods in the selected window.\n");
            return output;
        }

        let mut builder = Builder::default();
        let mut header = vec!["Year".to_string()];
        header.extend((1..=12).filter_map(short_month_name).map(String::from));
        builder.push_record(header);

        for row in &self.years {
            let mut record = vec![row.year.to_string()];
            record.extend(row.months.iter().map(|cell| match cell {
                Some(margin) => format_fraction(*margin),
                None => "-".to_string(),
            }));
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');

        output
    }

    /// Export the calendar to CSV format, zero-filling missing months
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["year".to_string()];
        header.extend(
            (1..=12)
                .filter_map(short_month_name)
                .map(|name| name.to_lowercase()),
        );
        wtr.write_record(&header)?;

        for row in &self.years {
            let mut record = vec![row.year.to_string()];
            record.extend((1..=12).map(|m| format!("{:.4}", row.margin(m))));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
