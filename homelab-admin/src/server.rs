use crate::handlers;
use crate::middleware::access_log;
use crate::ollama::OllamaProxy;
use axum::{
    Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
};
use homelab_core::config::ServerConfig;
use homelab_observability::MetricsCollector;
use homelab_store::InfrastructureStore;
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP API.
pub struct AdminState {
    pub store: InfrastructureStore,
    pub metrics: Arc<MetricsCollector>,
    pub ollama: OllamaProxy,
    /// Model pre-filled in the Ollama tester's curl commands.
    pub default_model: String,
    /// Where Prometheus text is served.
    pub metrics_path: String,
}

/// Build the Axum router with every API route plus the dashboard fallback.
pub fn build_admin_router(state: Arc<AdminState>) -> Router {
    let metrics_path = state.metrics_path.clone();

    let api = Router::new()
        // Whole document
        .route("/data", get(handlers::data::get_data).put(handlers::data::put_data))
        .route("/topology", get(handlers::topology::get_topology))
        // Hosts
        .route("/hosts", post(handlers::hosts::create_host))
        .route(
            "/hosts/{id}",
            patch(handlers::hosts::update_host).delete(handlers::hosts::delete_host),
        )
        .route("/hosts/{id}/position", put(handlers::hosts::update_position))
        // Services
        .route("/hosts/{id}/services", post(handlers::services::create_service))
        .route(
            "/hosts/{id}/services/{service_id}",
            patch(handlers::services::update_service).delete(handlers::services::delete_service),
        )
        .route("/hosts/{id}/services/{service_id}/url", get(handlers::services::service_url))
        .route("/hosts/{id}/services/{service_id}/open", get(handlers::services::open_service))
        .route(
            "/hosts/{id}/services/{service_id}/ollama",
            get(handlers::services::ollama_commands),
        )
        // Connections
        .route("/connections", post(handlers::connections::create_connection))
        .route("/connections/{id}", delete(handlers::connections::delete_connection))
        // Locations & settings
        .route("/locations", post(handlers::settings::create_location))
        .route("/settings", patch(handlers::settings::update_settings))
        .route("/settings/dark-mode", post(handlers::settings::toggle_dark_mode))
        // Ollama pass-through
        .route("/ollama-proxy", post(handlers::ollama::proxy))
        // Health
        .route("/health", get(handlers::health::health_check));

    Router::new()
        .nest("/api", api)
        .route(&metrics_path, get(metrics_handler))
        .route("/", get(handlers::dashboard::dashboard_index))
        .fallback(handlers::dashboard::dashboard_fallback)
        .layer(from_fn_with_state(Arc::clone(&state), access_log))
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn start_admin(
    config: ServerConfig,
    state: Arc<AdminState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let mut app = build_admin_router(state);
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %listener.local_addr()?, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Prometheus metrics endpoint handler.
async fn metrics_handler(State(state): State<Arc<AdminState>>) -> String {
    state.metrics.render()
}
