use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};
use rust_embed::Embed;
use serde_json::json;

/// Static dashboard files, embedded at compile time.
#[derive(Embed)]
#[folder = "../dashboard/"]
struct DashboardAssets;

fn mime_from_ext(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn serve_embedded(path: &str) -> Response {
    match DashboardAssets::get(path) {
        Some(file) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime_from_ext(path)),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            file.data.into_owned(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// `GET /`
pub async fn dashboard_index() -> Response {
    serve_embedded("index.html")
}

/// Everything the router does not match.
///
/// - unknown `/api/...` paths get a JSON 404
/// - paths with an extension are served as assets
/// - anything else falls back to `index.html`
pub async fn dashboard_fallback(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path == "api" || path.starts_with("api/") {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();
    }
    if path.is_empty() {
        return serve_embedded("index.html");
    }
    let file = path.rsplit('/').next().unwrap_or(path);
    if file.contains('.') {
        return serve_embedded(path);
    }
    serve_embedded("index.html")
}
