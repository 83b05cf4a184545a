//! Export module for fincontrol
//!
//! Provides dataset export in multiple formats:
//! - CSV: combined, period-level and department-level tables
//! - JSON: machine-readable full export with derived metrics
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{
    export_dataset_csv, export_departments_csv, export_periods_csv, write_department_records,
    DATASET_COLUMNS,
};
pub use json::{export_full_json, import_from_json, DatasetExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
