//! Application services.
//!
//! Each service owns its domain state and runs every user action through the
//! same pipeline:
//!
//! ```text
//! action
//!   ↓
//! 1. Apply the domain operation (rejects leave state untouched)
//!   ↓
//! 2. Persist the full document (library only)
//!   ↓
//! 3. Publish one event carrying the refreshed view data
//! ```
//!
//! Nothing is published unless the save succeeded.

pub mod library_service;
pub mod ordering_service;

use std::path::PathBuf;

use thiserror::Error;

use kiosk_catalog::AssetError;
use kiosk_core::DomainError;

use crate::store::StoreError;

pub use library_service::LibraryService;
pub use ordering_service::OrderingService;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected by the domain; state is unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The mutation applied in memory but the document could not be written.
    #[error("could not save library data: {0}")]
    Store(#[from] StoreError),
    /// The change was applied (and saved) but subscribers were not notified.
    #[error("could not publish event: {0}")]
    Publish(String),
}

impl ServiceError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(err) => Some(err),
            _ => None,
        }
    }
}

/// What happened to the optional image given with a new book.
#[derive(Debug)]
pub enum ImageImport {
    NotRequested,
    Copied(PathBuf),
    /// The book was still added.
    Failed(AssetError),
}

impl ImageImport {
    pub fn warning(&self) -> Option<String> {
        match self {
            ImageImport::Failed(err) => Some(format!("book added without image: {err}")),
            _ => None,
        }
    }
}
