pub mod connections;
pub mod dashboard;
pub mod data;
pub mod health;
pub mod hosts;
pub mod ollama;
pub mod services;
pub mod settings;
pub mod topology;

use crate::server::AdminState;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use homelab_core::HomelabError;
use homelab_store::{Committed, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::error;

pub(crate) type ApiResponse = (StatusCode, Json<Value>);

pub(crate) const READ_FAILED: &str = "Failed to read infrastructure data";
pub(crate) const SAVE_FAILED: &str = "Failed to save infrastructure data";

pub(crate) fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub(crate) fn error_response(err: HomelabError) -> ApiResponse {
    (status_from(err.status_code()), Json(err.to_json()))
}

/// Error body for a request axum could not extract (bad JSON, wrong
/// content type, malformed query string).
pub(crate) fn rejected(status: StatusCode, message: String) -> ApiResponse {
    (status, Json(json!({ "error": message })))
}

/// Unwrap a JSON extractor result, keeping the `{"error"}` body shape on
/// rejection.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiResponse> {
    body.map(|Json(value)| value)
        .map_err(|r| rejected(r.status(), r.body_text()))
}

/// Deserialize a request body, turning shape errors into a 400.
pub(crate) fn parse_body<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiResponse> {
    serde_json::from_value(json_body(body)?).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid request body", "details": e.to_string() })),
        )
    })
}

/// Map a failed read to a response. File problems are logged and hidden
/// behind a generic message.
pub(crate) fn read_error(err: StoreError) -> ApiResponse {
    error!(error = %err, "failed to read infrastructure data");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": READ_FAILED })))
}

/// Map a failed mutation to a response.
pub(crate) fn write_error(state: &AdminState, err: StoreError) -> ApiResponse {
    if err.is_client_error() {
        return error_response(err.into());
    }
    state.metrics.record_write(None);
    error!(error = %err, "failed to save infrastructure data");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": SAVE_FAILED })))
}

/// Record a finished write and render its value.
pub(crate) fn committed<T: Serialize>(
    state: &AdminState,
    status: StatusCode,
    result: Result<Committed<T>, StoreError>,
) -> ApiResponse {
    match result {
        Ok(done) => {
            state.metrics.record_write(Some(done.counts));
            match serde_json::to_value(&done.value) {
                Ok(value) => (status, Json(value)),
                Err(e) => error_response(e.into()),
            }
        }
        Err(e) => write_error(state, e),
    }
}

/// Like [`committed`], but answers `{"success": true}` whatever the edit returned.
pub(crate) fn committed_ok<T>(state: &AdminState, result: Result<Committed<T>, StoreError>) -> ApiResponse {
    match result {
        Ok(done) => {
            state.metrics.record_write(Some(done.counts));
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(e) => write_error(state, e),
    }
}
