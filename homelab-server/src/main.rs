// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Homelab Map
//
//  HTTP:    axum on a multi-threaded tokio runtime
//  Storage: one JSON document on disk
//  Config:  optional YAML + HOMELAB_* env + CLI flags
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use clap::Parser;
use homelab_admin::ollama::OllamaProxy;
use homelab_admin::server::{AdminState, start_admin};
use homelab_core::HomelabConfig;
use homelab_observability::MetricsCollector;
use homelab_observability::logger::init_tracing;
use homelab_store::{DocumentFile, InfrastructureStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "homelab", version, about = "Homelab Map: infrastructure map and service launcher")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "HOMELAB_CONFIG")]
    config: Option<PathBuf>,

    /// JSON data file (overrides config and DATA_PATH)
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:3000
    #[arg(long)]
    addr: Option<String>,

    /// Log level or EnvFilter directives
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut HomelabConfig) {
        if let Some(path) = self.data_path {
            config.storage.data_path = path;
        }
        if let Some(addr) = self.addr {
            config.server.addr = addr;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Config ──
    let mut config = HomelabConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    // ── Tracing ──
    init_tracing(&config.observability.log_level, config.observability.log_format)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Homelab Map starting");

    // ── Data file ──
    let file = DocumentFile::new(config.storage.data_path.clone());
    if config.storage.seed_if_missing {
        file.seed_if_missing()?;
    } else if !file.path().exists() {
        warn!(path = %file.path().display(), "Data file does not exist; reads will fail until one is saved");
    }
    let store = InfrastructureStore::new(file);

    // ── Metrics ──
    let metrics = Arc::new(MetricsCollector::new(config.observability.prometheus.enabled)?);
    match store.load() {
        Ok(doc) => {
            let counts = doc.counts();
            metrics.set_counts(counts);
            info!(
                hosts = counts.hosts,
                services = counts.services,
                connections = counts.connections,
                locations = counts.locations,
                "Infrastructure document loaded"
            );
        }
        Err(e) => warn!(error = %e, "Infrastructure document could not be read"),
    }

    // ── Ollama pass-through ──
    let ollama = OllamaProxy::new(Duration::from_millis(config.ollama.timeout_ms))?;

    let state = Arc::new(AdminState {
        store,
        metrics,
        ollama,
        default_model: config.ollama.default_model.clone(),
        metrics_path: config.observability.prometheus.path.clone(),
    });

    start_admin(config.server, state, shutdown_signal()).await?;

    info!("Homelab Map stopped");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix (docker stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping...");
}
