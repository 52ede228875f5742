use crate::document::{DocumentFile, FileMetadata};
use crate::error::StoreError;
use homelab_core::edit::DocumentCounts;
use homelab_core::model::InfrastructureData;
use homelab_core::{HomelabError, validate};
use std::sync::{Mutex, PoisonError};

/// Result of a successful write: what the edit returned plus the new totals.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub counts: DocumentCounts,
}

/// Whole-document store on top of [`DocumentFile`].
///
/// The file stays the source of truth: every read goes to disk, and every
/// write replaces the whole file. Writers in this process take `write_lock`
/// so two edits never interleave their read and write steps. Edits made to the
/// file by anything else are not detected; the last write wins.
#[derive(Debug)]
pub struct InfrastructureStore {
    file: DocumentFile,
    write_lock: Mutex<()>,
}

impl InfrastructureStore {
    pub fn new(file: DocumentFile) -> Self {
        Self {
            file,
            write_lock: Mutex::new(()),
        }
    }

    pub fn file(&self) -> &DocumentFile {
        &self.file
    }

    pub fn metadata(&self) -> FileMetadata {
        self.file.metadata()
    }

    pub fn load(&self) -> Result<InfrastructureData, StoreError> {
        self.file.read()
    }

    /// Validate and write a complete replacement document.
    pub fn replace(&self, doc: InfrastructureData) -> Result<Committed<()>, StoreError> {
        validate(&doc).map_err(StoreError::Invalid)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.file.write(&doc)?;
        Ok(Committed {
            value: (),
            counts: doc.counts(),
        })
    }

    /// Read, edit, validate, write. The file is untouched if the edit or the
    /// validation fails.
    pub fn mutate<T, F>(&self, edit: F) -> Result<Committed<T>, StoreError>
    where
        F: FnOnce(&mut InfrastructureData) -> Result<T, HomelabError>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut doc = self.file.read()?;
        let value = edit(&mut doc)?;
        validate(&doc).map_err(StoreError::Invalid)?;
        self.file.write(&doc)?;
        Ok(Committed {
            value,
            counts: doc.counts(),
        })
    }
}
