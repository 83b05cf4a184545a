//! Service layer for fincontrol
//!
//! The service layer holds the computations behind the reports: dataset
//! generation, metric derivation, anomaly flags, correlation and the
//! dashboard session that ties them together.

pub mod anomaly;
pub mod correlation;
pub mod dashboard;
pub mod generator;
pub mod metrics;

pub use anomaly::{detect_anomalies, Anomaly, AnomalyKind, AnomalyThresholds};
pub use correlation::{pearson, CorrelationMatrix, Series};
pub use dashboard::{Dashboard, DashboardRequest, DashboardView};
pub use generator::{
    generate, DatasetGenerator, GeneratorConfig, DEFAULT_SEED, MAX_BASE_REVENUE,
};
pub use metrics::{derive_metrics, DerivedMetrics, PeriodMetrics, PeriodVariance, VarianceAnalysis};
