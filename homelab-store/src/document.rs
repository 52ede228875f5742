//! The JSON data file.
//!
//! The file is always read and written as a whole. Writes are atomic: the
//! document goes to a `.json.tmp` sibling first and is then renamed over the
//! final path, so a crash mid-write never leaves a truncated document behind.

use crate::error::StoreError;
use homelab_core::model::InfrastructureData;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub path: String,
    pub file_exists: bool,
    pub size_bytes: Option<u64>,
    pub last_modified_unix: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read and parse the whole document.
    pub fn read(&self) -> Result<InfrastructureData, StoreError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(self.io_err(e)),
        };

        serde_json::from_str(&data).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize the document and atomically replace the file.
    pub fn write(&self, doc: &InfrastructureData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        // Atomic write: tmp file → rename
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        tracing::debug!(path = %self.path.display(), "document saved");
        Ok(())
    }

    /// Write the starter document when no file exists yet. Returns true if it did.
    pub fn seed_if_missing(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            tracing::debug!(path = %self.path.display(), "data file present, not seeding");
            return Ok(false);
        }
        self.write(&InfrastructureData::default())?;
        tracing::info!(path = %self.path.display(), "no data file found, wrote starter document");
        Ok(true)
    }

    pub fn metadata(&self) -> FileMetadata {
        let meta = std::fs::metadata(&self.path).ok();
        FileMetadata {
            path: self.path.to_string_lossy().into_owned(),
            file_exists: meta.is_some(),
            size_bytes: meta.as_ref().map(|m| m.len()),
            last_modified_unix: meta
                .as_ref()
                .and_then(|m| m.modified().ok())
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_returns_same_document() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("infrastructure.json"));
        let mut doc = InfrastructureData::default();
        doc.settings.dark_mode = true;

        file.write(&doc).unwrap();
        assert_eq!(file.read().unwrap(), doc);
        assert!(!dir.path().join("infrastructure.json.tmp").exists());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("nested/deeper/data.json"));
        file.write(&InfrastructureData::default()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn written_file_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        file.write(&InfrastructureData::default()).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("\n  \"version\": \"1.0\""));
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("nonexistent.json"));
        assert!(matches!(file.read(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn read_malformed_file_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not valid json {{{{").unwrap();
        let file = DocumentFile::new(path);
        assert!(matches!(file.read(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn seed_only_when_missing() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        assert!(file.seed_if_missing().unwrap());
        assert!(!file.seed_if_missing().unwrap());
        assert_eq!(file.read().unwrap(), InfrastructureData::default());
    }

    #[test]
    fn metadata_reports_existence_and_size() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("data.json"));
        let before = file.metadata();
        assert!(!before.file_exists);
        assert!(before.size_bytes.is_none());

        file.write(&InfrastructureData::default()).unwrap();
        let after = file.metadata();
        assert!(after.file_exists);
        assert!(after.size_bytes.unwrap() > 0);
        assert!(after.last_modified_unix.is_some());
    }
}
