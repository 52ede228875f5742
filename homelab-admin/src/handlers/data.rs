use super::{ApiResponse, committed_ok, json_body, read_error};
use crate::server::AdminState;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use homelab_core::InfrastructureData;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// `GET /api/data`
pub async fn get_data(State(state): State<Arc<AdminState>>) -> ApiResponse {
    match state.store.load() {
        Ok(doc) => match serde_json::to_value(&doc) {
            Ok(value) => (StatusCode::OK, Json(value)),
            Err(e) => read_error(e.into()),
        },
        Err(e) => read_error(e),
    }
}

/// `PUT /api/data`: replace the whole document.
///
/// The body is taken as raw JSON so that shape errors come back as the same
/// `Invalid data format` 400 as rule violations.
pub async fn put_data(
    State(state): State<Arc<AdminState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };
    let doc: InfrastructureData = match serde_json::from_value(body) {
        Ok(doc) => doc,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid data format",
                    "details": [{ "path": "", "message": e.to_string() }],
                })),
            );
        }
    };

    let (hosts, connections) = (doc.hosts.len(), doc.connections.len());
    let resp = committed_ok(&state, state.store.replace(doc));
    if resp.0.is_success() {
        info!(hosts, connections, "infrastructure document replaced");
    }
    resp
}
