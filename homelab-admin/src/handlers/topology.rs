use super::{ApiResponse, read_error, rejected};
use crate::server::AdminState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use homelab_core::TopologyView;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct TopologyQuery {
    #[serde(default)]
    pub edit: bool,
}

/// `GET /api/topology?edit=true`: nodes are draggable only in edit mode.
pub async fn get_topology(
    State(state): State<Arc<AdminState>>,
    query: Result<Query<TopologyQuery>, QueryRejection>,
) -> ApiResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(r) => return rejected(r.status(), r.body_text()),
    };
    let doc = match state.store.load() {
        Ok(doc) => doc,
        Err(e) => return read_error(e),
    };
    let view = TopologyView::build(&doc, query.edit);
    match serde_json::to_value(&view) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => read_error(e.into()),
    }
}
