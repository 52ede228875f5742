pub mod access_log;
pub mod logger;

#[cfg(feature = "prometheus")]
pub mod metrics;

#[cfg(feature = "prometheus")]
pub mod prometheus_exporter;

#[cfg(feature = "prometheus")]
pub use metrics::MetricsCollector;
