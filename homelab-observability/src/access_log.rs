use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Structured access log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub latency_ms: f64,
}

impl AccessLogEntry {
    pub fn new(method: &str, path: &str, status: u16, latency_ms: f64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            method: method.to_string(),
            path: path.to_string(),
            status,
            latency_ms,
        }
    }

    /// Emit the entry as a `tracing` event; server errors go out at `warn`.
    pub fn emit(&self) {
        if self.status >= 500 {
            tracing::warn!(
                target: "homelab::access",
                method = %self.method,
                path = %self.path,
                status = self.status,
                latency_ms = self.latency_ms,
                "request failed"
            );
        } else {
            tracing::info!(
                target: "homelab::access",
                method = %self.method,
                path = %self.path,
                status = self.status,
                latency_ms = self.latency_ms,
                "request"
            );
        }
    }
}
