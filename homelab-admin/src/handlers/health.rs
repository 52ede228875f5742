use crate::server::AdminState;
use axum::extract::State;
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn health_check(State(state): State<Arc<AdminState>>) -> Json<Value> {
    let meta = state.store.metadata();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "metrics": state.metrics.is_enabled(),
        "persistence": {
            "mode": "file",
            "path": meta.path,
            "file_exists": meta.file_exists,
            "size_bytes": meta.size_bytes,
            "last_modified_unix": meta.last_modified_unix,
        },
    }))
}
