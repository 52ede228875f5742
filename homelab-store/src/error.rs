use homelab_core::{HomelabError, ValidationIssue};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),

    #[error("Data file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid data format")]
    Invalid(Vec<ValidationIssue>),

    #[error(transparent)]
    Edit(#[from] HomelabError),
}

impl StoreError {
    /// True for failures caused by the caller's input rather than the file.
    pub fn is_client_error(&self) -> bool {
        match self {
            StoreError::Invalid(_) => true,
            StoreError::Edit(e) => e.status_code() < 500,
            _ => false,
        }
    }
}

impl From<StoreError> for HomelabError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(issues) => HomelabError::Validation(issues),
            StoreError::Edit(e) => e,
            other => HomelabError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_errors_pass_through_unchanged() {
        let err: HomelabError = StoreError::Edit(HomelabError::HostNotFound("h".into())).into();
        assert!(matches!(err, HomelabError::HostNotFound(id) if id == "h"));
    }

    #[test]
    fn invalid_becomes_validation() {
        let issues = vec![ValidationIssue::new("hosts.0.ip", "Invalid IP address")];
        let err: HomelabError = StoreError::Invalid(issues.clone()).into();
        assert!(matches!(err, HomelabError::Validation(ref i) if *i == issues));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn file_errors_become_500() {
        let err = StoreError::NotFound(PathBuf::from("/tmp/x.json"));
        assert!(!err.is_client_error());
        let err: HomelabError = err.into();
        assert_eq!(err.status_code(), 500);
    }
}
