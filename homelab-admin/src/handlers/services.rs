use super::{ApiResponse, committed, committed_ok, error_response, parse_body, read_error, rejected};
use crate::server::AdminState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use homelab_core::edit::{NewService, ServicePatch};
use homelab_core::urls;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// `POST /api/hosts/{id}/services`
pub async fn create_service(
    State(state): State<Arc<AdminState>>,
    Path(host_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let new: NewService = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state.store.mutate(|doc| doc.add_service(&host_id, new));
    if let Ok(done) = &result {
        info!(%host_id, service_id = %done.value.id, port = done.value.port, "service added");
    }
    committed(&state, StatusCode::CREATED, result)
}

/// `PATCH /api/hosts/{id}/services/{service_id}`
pub async fn update_service(
    State(state): State<Arc<AdminState>>,
    Path((host_id, service_id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let patch: ServicePatch = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = state
        .store
        .mutate(|doc| doc.update_service(&host_id, &service_id, patch));
    committed(&state, StatusCode::OK, result)
}

/// `DELETE /api/hosts/{id}/services/{service_id}`
pub async fn delete_service(
    State(state): State<Arc<AdminState>>,
    Path((host_id, service_id)): Path<(String, String)>,
) -> ApiResponse {
    let result = state
        .store
        .mutate(|doc| doc.delete_service(&host_id, &service_id));
    committed_ok(&state, result)
}

/// Resolve a service and run `f` on it against a fresh read of the file.
fn with_service<T>(
    state: &AdminState,
    host_id: &str,
    service_id: &str,
    f: impl FnOnce(&homelab_core::Host, &homelab_core::Service) -> T,
) -> Result<T, ApiResponse> {
    let doc = state.store.load().map_err(read_error)?;
    let (host, service) = doc.service(host_id, service_id).map_err(error_response)?;
    Ok(f(host, service))
}

/// `GET /api/hosts/{id}/services/{service_id}/url`
pub async fn service_url(
    State(state): State<Arc<AdminState>>,
    Path((host_id, service_id)): Path<(String, String)>,
) -> ApiResponse {
    match with_service(&state, &host_id, &service_id, urls::service_url) {
        Ok(url) => (StatusCode::OK, Json(json!({ "url": url }))),
        Err(resp) => resp,
    }
}

/// `GET /api/hosts/{id}/services/{service_id}/open`: 307 to the service.
pub async fn open_service(
    State(state): State<Arc<AdminState>>,
    Path((host_id, service_id)): Path<(String, String)>,
) -> Response {
    match with_service(&state, &host_id, &service_id, urls::service_url) {
        Ok(url) => Redirect::temporary(&url).into_response(),
        Err(resp) => resp.into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OllamaQuery {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// `GET /api/hosts/{id}/services/{service_id}/ollama`: tester setup.
pub async fn ollama_commands(
    State(state): State<Arc<AdminState>>,
    Path((host_id, service_id)): Path<(String, String)>,
    query: Result<Query<OllamaQuery>, QueryRejection>,
) -> ApiResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(r) => return rejected(r.status(), r.body_text()),
    };
    let base = match with_service(&state, &host_id, &service_id, urls::ollama_base_url) {
        Ok(base) => base,
        Err(resp) => return resp,
    };
    let model = query
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.default_model.clone());
    let prompt = query.prompt.unwrap_or_else(|| "Hello!".to_string());

    (
        StatusCode::OK,
        Json(json!({
            "baseUrl": base,
            "model": model,
            "generateCurl": urls::ollama_generate_curl(&base, &model, &prompt),
            "tagsCurl": urls::ollama_tags_curl(&base),
        })),
    )
}
