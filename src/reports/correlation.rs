//! Correlation Report

use serde::{Deserialize, Serialize};
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::display::format_title;
use crate::error::FinResult;
use crate::models::Dataset;
use crate::services::correlation::{CorrelationMatrix, Series};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub periods: usize,
    pub matrix: CorrelationMatrix,
}

impl CorrelationReport {
    pub fn generate(dataset: &Dataset) -> Self {
        Self {
            periods: dataset.len(),
            matrix: CorrelationMatrix::from_periods(dataset.periods()),
        }
    }

    /// Format the matrix for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = format_title(&format!("Correlation Matrix ({} periods)", self.periods));

        let mut builder = Builder::default();
        let mut header = vec![String::new()];
        header.extend(Series::ALL.iter().map(|s| s.to_string()));
        builder.push_record(header);

        for row in Series::ALL {
            let mut record = vec![row.to_string()];
            record.extend(
                Series::ALL
                    .iter()
                    .map(|col| format!("{:+.2}", self.matrix.get(row, *col))),
            );
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');

        output
    }

    /// Export the matrix to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["series".to_string()];
        header.extend(Series::ALL.iter().map(|s| s.to_string().to_lowercase()));
        wtr.write_record(&header)?;

        for row in Series::ALL {
            let mut record = vec![row.to_string().to_lowercase()];
            record.extend(
                Series::ALL
                    .iter()
                    .map(|col| format!("{:.4}", self.matrix.get(row, *col))),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
