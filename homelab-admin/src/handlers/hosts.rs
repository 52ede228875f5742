use super::{ApiResponse, committed, committed_ok, parse_body};
use crate::server::AdminState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use homelab_core::edit::{HostPatch, NewHost};
use homelab_core::model::Position;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// `POST /api/hosts`
pub async fn create_host(State(state): State<Arc<AdminState>>, body: Result<Json<Value>, JsonRejection>) -> ApiResponse {
    let new: NewHost = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state.store.mutate(|doc| doc.add_host(new));
    if let Ok(done) = &result {
        info!(host_id = %done.value.id, name = %done.value.name, "host added");
    }
    committed(&state, StatusCode::CREATED, result)
}

/// `PATCH /api/hosts/{id}`
pub async fn update_host(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let patch: HostPatch = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state.store.mutate(|doc| doc.update_host(&id, patch));
    committed(&state, StatusCode::OK, result)
}

/// `DELETE /api/hosts/{id}`: also drops every connection touching the host.
pub async fn delete_host(State(state): State<Arc<AdminState>>, Path(id): Path<String>) -> ApiResponse {
    let result = state.store.mutate(|doc| doc.delete_host(&id));
    if result.is_ok() {
        info!(host_id = %id, "host deleted");
    }
    committed_ok(&state, result)
}

/// `PUT /api/hosts/{id}/position`: sent when a drag ends.
pub async fn update_position(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let pos: Position = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state
        .store
        .mutate(|doc| doc.update_host_position(&id, pos.x, pos.y));
    committed(&state, StatusCode::OK, result)
}
