//! Persistence gateway for the library document.

pub mod in_memory;
pub mod json_file;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use kiosk_library::LibrarySnapshot;

pub use in_memory::InMemoryLibraryStore;
pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode library document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whole-document load/save of books and loans.
///
/// `load` never fails: an absent or unreadable document yields the seed catalog.
pub trait LibraryStore: Send + Sync {
    fn load(&self) -> LibrarySnapshot;
    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), StoreError>;
}

impl<S> LibraryStore for Arc<S>
where
    S: LibraryStore + ?Sized,
{
    fn load(&self) -> LibrarySnapshot {
        (**self).load()
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}
