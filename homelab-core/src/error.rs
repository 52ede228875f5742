use crate::validation::ValidationIssue;
use thiserror::Error;

/// Unified error type for Homelab Map.
#[derive(Error, Debug)]
pub enum HomelabError {
    #[error("Host not found: {0}")]
    HostNotFound(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Connection already exists between {0} and {1}")]
    DuplicateConnection(String, String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid data format")]
    Validation(Vec<ValidationIssue>),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl HomelabError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HomelabError::HostNotFound(_)
            | HomelabError::ServiceNotFound(_)
            | HomelabError::ConnectionNotFound(_)
            | HomelabError::LocationNotFound(_) => 404,
            HomelabError::DuplicateConnection(..) => 409,
            HomelabError::InvalidInput(_) | HomelabError::Validation(_) => 400,
            _ => 500,
        }
    }

    /// JSON error body. Validation failures carry their issues under `details`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            HomelabError::Validation(issues) => serde_json::json!({
                "error": self.to_string(),
                "details": issues,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(HomelabError::HostNotFound("h".into()).status_code(), 404);
        assert_eq!(HomelabError::ServiceNotFound("s".into()).status_code(), 404);
        assert_eq!(HomelabError::ConnectionNotFound("c".into()).status_code(), 404);
    }

    #[test]
    fn duplicate_connection_is_conflict() {
        let e = HomelabError::DuplicateConnection("a".into(), "b".into());
        assert_eq!(e.status_code(), 409);
        assert_eq!(e.to_string(), "Connection already exists between a and b");
    }

    #[test]
    fn validation_body_has_details() {
        let e = HomelabError::Validation(vec![ValidationIssue::new("hosts.0.ip", "Invalid IP address")]);
        let body = e.to_json();
        assert_eq!(body["error"], "Invalid data format");
        assert_eq!(body["details"][0]["path"], "hosts.0.ip");
        assert_eq!(e.status_code(), 400);
    }

    #[test]
    fn store_error_is_500() {
        assert_eq!(HomelabError::Store("disk full".into()).status_code(), 500);
    }
}
