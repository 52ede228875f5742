use super::{ApiResponse, committed, parse_body};
use crate::server::AdminState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use homelab_core::edit::SettingsPatch;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NewLocation {
    pub label: String,
}

/// `POST /api/locations`
pub async fn create_location(State(state): State<Arc<AdminState>>, body: Result<Json<Value>, JsonRejection>) -> ApiResponse {
    let new: NewLocation = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state.store.mutate(|doc| doc.add_location(&new.label));
    committed(&state, StatusCode::CREATED, result)
}

/// `PATCH /api/settings`
pub async fn update_settings(State(state): State<Arc<AdminState>>, body: Result<Json<Value>, JsonRejection>) -> ApiResponse {
    let patch: SettingsPatch = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state.store.mutate(|doc| Ok(doc.update_settings(patch)));
    committed(&state, StatusCode::OK, result)
}

/// `POST /api/settings/dark-mode`: flip and save.
pub async fn toggle_dark_mode(State(state): State<Arc<AdminState>>) -> ApiResponse {
    let result = state.store.mutate(|doc| Ok(doc.toggle_dark_mode()));
    committed(&state, StatusCode::OK, result)
}
