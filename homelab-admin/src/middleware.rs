use crate::server::AdminState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use homelab_observability::access_log::AccessLogEntry;
use std::sync::Arc;
use std::time::Instant;

/// Access log + request metrics.
///
/// The metrics label uses the route template (`/api/hosts/{id}`), never the
/// concrete path, so ids don't blow up label cardinality.
pub async fn access_log(
    State(state): State<Arc<AdminState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "fallback".to_owned());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let status = response.status().as_u16();
    AccessLogEntry::new(method.as_str(), &path, status, elapsed.as_secs_f64() * 1000.0).emit();
    state
        .metrics
        .record_request(&route, method.as_str(), status, elapsed.as_secs_f64());

    response
}
