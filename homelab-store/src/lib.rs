pub mod document;
pub mod error;
pub mod store;

pub use document::{DocumentFile, FileMetadata};
pub use error::StoreError;
pub use store::{Committed, InfrastructureStore};
