//! Pass-through client for a local Ollama API.
//!
//! The dashboard cannot call Ollama directly (different origin), so it posts
//! `{url, body?, method?}` here and gets Ollama's JSON answer back. No retries.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

/// Body of `POST /api/ollama-proxy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub body: Option<Value>,
    /// Defaults to POST.
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported method: {0}")]
    InvalidMethod(String),

    #[error("Ollama API error: {status}")]
    Upstream { status: u16, details: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON from Ollama: {0}")]
    InvalidResponse(String),
}

impl ProxyError {
    /// Upstream errors keep the upstream status; local failures are 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MissingUrl | ProxyError::InvalidUrl(_) | ProxyError::InvalidMethod(_) => 400,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) | ProxyError::InvalidResponse(_) => 500,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ProxyError::Upstream { details, .. } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OllamaProxy {
    client: Client,
}

impl OllamaProxy {
    pub fn new(timeout: Duration) -> Result<Self, ProxyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    fn parse_target(req: &ProxyRequest) -> Result<(Url, Method), ProxyError> {
        let raw = req
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ProxyError::MissingUrl)?;
        let url = Url::parse(raw).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidUrl(format!("unsupported scheme '{}'", url.scheme())));
        }

        let name = req.method.as_deref().unwrap_or("POST").trim().to_ascii_uppercase();
        let method = match name.as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "PATCH" => Method::PATCH,
            "DELETE" => Method::DELETE,
            _ => return Err(ProxyError::InvalidMethod(name)),
        };
        Ok((url, method))
    }

    /// Forward the request and return the upstream JSON body.
    pub async fn forward(&self, req: ProxyRequest) -> Result<Value, ProxyError> {
        let (url, method) = Self::parse_target(&req)?;
        tracing::debug!(%url, %method, "forwarding to ollama");

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        // Only POST carries the JSON body.
        if method == Method::POST
            && let Some(body) = req.body.filter(|b| !b.is_null())
        {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "ollama returned an error");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                details: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProxyError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(url: Option<&str>, method: Option<&str>) -> ProxyRequest {
        ProxyRequest {
            url: url.map(str::to_string),
            body: None,
            method: method.map(str::to_string),
        }
    }

    #[test]
    fn missing_or_blank_url_is_rejected() {
        assert!(matches!(OllamaProxy::parse_target(&req(None, None)), Err(ProxyError::MissingUrl)));
        assert!(matches!(
            OllamaProxy::parse_target(&req(Some("  "), None)),
            Err(ProxyError::MissingUrl)
        ));
    }

    #[test]
    fn method_defaults_to_post_and_is_case_insensitive() {
        let (_, m) = OllamaProxy::parse_target(&req(Some("http://10.0.0.2:11434/api/generate"), None)).unwrap();
        assert_eq!(m, Method::POST);
        let (_, m) = OllamaProxy::parse_target(&req(Some("http://10.0.0.2:11434/api/tags"), Some("get"))).unwrap();
        assert_eq!(m, Method::GET);
    }

    #[test]
    fn odd_method_and_scheme_are_rejected() {
        assert!(matches!(
            OllamaProxy::parse_target(&req(Some("http://x/"), Some("TRACE"))),
            Err(ProxyError::InvalidMethod(m)) if m == "TRACE"
        ));
        assert!(matches!(
            OllamaProxy::parse_target(&req(Some("file:///etc/passwd"), None)),
            Err(ProxyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn upstream_error_body_has_details() {
        let err = ProxyError::Upstream {
            status: 404,
            details: "model not found".into(),
        };
        assert_eq!(err.status_code(), 404);
        let body = err.to_json();
        assert_eq!(body["error"], "Ollama API error: 404");
        assert_eq!(body["details"], "model not found");
    }
}
