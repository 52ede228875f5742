use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomelabConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Allow any origin. Handy when the dashboard is served from a dev server.
    #[serde(default)]
    pub cors_permissive: bool,
}

/// Where the infrastructure document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Write a starter document on boot when the file does not exist.
    #[serde(default = "default_true")]
    pub seed_if_missing: bool,
}

/// Ollama pass-through settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_model")]
    pub default_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrometheusConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_addr() -> String { "0.0.0.0:3000".into() }
fn default_data_path() -> PathBuf { PathBuf::from("data/infrastructure.json") }
fn default_true() -> bool { true }
fn default_ollama_timeout() -> u64 { 60_000 }
fn default_model() -> String { "llama3.2".into() }
fn default_log_level() -> String { "info".into() }
fn default_metrics_path() -> String { "/metrics".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            cors_permissive: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            seed_if_missing: true,
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_ollama_timeout(),
            default_model: default_model(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            prometheus: PrometheusConfig::default(),
        }
    }
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_metrics_path(),
        }
    }
}

impl HomelabConfig {
    /// Layer the optional YAML file and environment overrides.
    ///
    /// `HOMELAB_SERVER__ADDR` maps to `server.addr`; the bare `DATA_PATH`
    /// variable still points at the document file.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("HOMELAB_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATA_PATH"])
                    .map(|_| "storage.data_path".into()),
            )
    }

    /// Load configuration from an optional YAML file + env overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config: HomelabConfig = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the HTTP router cannot be built from.
    pub fn validate(&self) -> anyhow::Result<()> {
        let path = self.observability.prometheus.path.as_str();
        if !path.starts_with('/') || path == "/" {
            anyhow::bail!("observability.prometheus.path must start with '/' and name a route, got {path:?}");
        }
        if path.contains(['{', '}', '*']) {
            anyhow::bail!("observability.prometheus.path must be a literal path, got {path:?}");
        }
        if path == "/api" || path.starts_with("/api/") {
            anyhow::bail!("observability.prometheus.path must not live under /api, got {path:?}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = HomelabConfig::default();
        assert_eq!(cfg.server.addr, "0.0.0.0:3000");
        assert!(!cfg.server.cors_permissive);
        assert_eq!(cfg.storage.data_path, PathBuf::from("data/infrastructure.json"));
        assert!(cfg.storage.seed_if_missing);
        assert_eq!(cfg.ollama.timeout_ms, 60_000);
        assert_eq!(cfg.ollama.default_model, "llama3.2");
        assert_eq!(cfg.observability.log_level, "info");
        assert_eq!(cfg.observability.log_format, LogFormat::Pretty);
        assert!(!cfg.observability.prometheus.enabled);
        assert_eq!(cfg.observability.prometheus.path, "/metrics");
    }

    #[test]
    fn log_format_serializes_to_lowercase() {
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), "\"json\"");
        let f: LogFormat = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(f, LogFormat::Compact);
    }

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmpfile,
            "server:\n  addr: \"127.0.0.1:8080\"\nollama:\n  timeout_ms: 5000\nobservability:\n  log_format: json\n  prometheus:\n    enabled: true\n"
        )
        .unwrap();
        let cfg = HomelabConfig::load(Some(tmpfile.path())).unwrap();
        assert_eq!(cfg.server.addr, "127.0.0.1:8080");
        assert_eq!(cfg.ollama.timeout_ms, 5000);
        assert_eq!(cfg.observability.log_format, LogFormat::Json);
        assert!(cfg.observability.prometheus.enabled);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.ollama.default_model, "llama3.2");
        assert_eq!(cfg.observability.prometheus.path, "/metrics");
    }

    #[test]
    fn bad_metrics_path_is_rejected() {
        for bad in ["/", "metrics", "", "/api/metrics", "/{id}"] {
            let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
            write!(tmpfile, "observability:\n  prometheus:\n    path: \"{bad}\"\n").unwrap();
            assert!(HomelabConfig::load(Some(tmpfile.path())).is_err(), "{bad:?} accepted");
        }
        let mut cfg = HomelabConfig::default();
        cfg.observability.prometheus.path = "/internal/metrics".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_yaml_type_is_an_error() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "ollama:\n  timeout_ms: \"soon\"\n").unwrap();
        assert!(HomelabConfig::load(Some(tmpfile.path())).is_err());
    }
}
