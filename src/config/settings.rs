//! User settings for fincontrol
//!
//! Persistent defaults for the dashboard commands: currency symbol, seed,
//! revenue level, window and anomaly thresholds.

use serde::{Deserialize, Serialize};

use super::paths::FinPaths;
use crate::error::{FinError, FinResult};
use crate::models::{Money, TimeWindow};
use crate::services::anomaly::AnomalyThresholds;
use crate::services::generator::{DEFAULT_BASE_REVENUE, DEFAULT_SEED};

/// User settings for fincontrol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Seed used when `--seed` is not given
    #[serde(default = "default_seed")]
    pub default_seed: u64,

    /// Revenue level the generator starts from
    #[serde(default = "default_base_revenue")]
    pub base_revenue: Money,

    /// Window used when `--window` is not given
    #[serde(default)]
    pub default_window: TimeWindow,

    /// Anomaly flag thresholds
    #[serde(default)]
    pub anomaly_thresholds: AnomalyThresholds,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_base_revenue() -> Money {
    DEFAULT_BASE_REVENUE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_seed: default_seed(),
            base_revenue: default_base_revenue(),
            default_window: TimeWindow::default(),
            anomaly_thresholds: AnomalyThresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinPaths) -> FinResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| FinError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinPaths) -> FinResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_seed, 42);
        assert_eq!(settings.default_window, TimeWindow::LastTwelveMonths);
        assert_eq!(settings.anomaly_thresholds.min_margin, 0.25);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.default_window = TimeWindow::LastSixMonths;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_window, TimeWindow::LastSixMonths);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_seed": 7}"#).unwrap();
        assert_eq!(settings.default_seed, 7);
        assert_eq!(settings.base_revenue, DEFAULT_BASE_REVENUE);
        assert_eq!(settings.anomaly_thresholds, AnomalyThresholds::default());
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinError::Config(_)));
    }
}
