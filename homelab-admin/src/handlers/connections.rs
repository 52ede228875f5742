use super::{ApiResponse, committed, committed_ok, parse_body};
use crate::server::AdminState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConnection {
    pub source_host_id: String,
    pub target_host_id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// `POST /api/connections`: 409 when the pair is already linked.
pub async fn create_connection(
    State(state): State<Arc<AdminState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let new: NewConnection = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state.store.mutate(|doc| {
        doc.add_connection(&new.source_host_id, &new.target_host_id, new.label)
    });
    if let Ok(done) = &result {
        info!(
            source = %done.value.source_host_id,
            target = %done.value.target_host_id,
            "connection added"
        );
    }
    committed(&state, StatusCode::CREATED, result)
}

/// `DELETE /api/connections/{id}`
pub async fn delete_connection(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResponse {
    let result = state.store.mutate(|doc| doc.delete_connection(&id));
    committed_ok(&state, result)
}
