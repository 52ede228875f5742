use super::{ApiResponse, parse_body, status_from};
use crate::ollama::ProxyRequest;
use crate::server::AdminState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// `POST /api/ollama-proxy`
pub async fn proxy(State(state): State<Arc<AdminState>>, body: Result<Json<Value>, JsonRejection>) -> ApiResponse {
    let req: ProxyRequest = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.ollama.forward(req).await {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => {
            warn!(error = %e, "ollama proxy failed");
            (status_from(e.status_code()), Json(e.to_json()))
        }
    }
}
