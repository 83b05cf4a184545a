//! YAML Export functionality
//!
//! Exports a dataset to YAML format for human-readable review.

use std::io::Write;

use crate::error::{FinError, FinResult};
use crate::export::json::DatasetExport;
use crate::models::Dataset;

/// Export a dataset to YAML format
pub fn export_full_yaml<W: Write>(dataset: &Dataset, mut writer: W) -> FinResult<()> {
    let export = DatasetExport::from_dataset(dataset);

    writeln!(writer, "# fincontrol dataset export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer, "# Seed: {}", export.seed)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export and check its consistency
pub fn import_from_yaml(yaml_str: &str) -> FinResult<DatasetExport> {
    let export: DatasetExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FinError::Validation(e.to_string()))?;
    export.validate().map_err(FinError::Validation)?;
    Ok(export)
}
