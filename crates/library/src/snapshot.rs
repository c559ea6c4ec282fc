use serde::{Deserialize, Serialize};

use kiosk_catalog::{Book, seed};

use crate::loan::LoanEntry;

/// The persisted library document: `{"books": [...], "borrowed": [...]}`.
///
/// A missing array is read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub borrowed: Vec<LoanEntry>,
}

impl LibrarySnapshot {
    /// Built-in catalog with no loans.
    pub fn seed() -> Self {
        Self {
            books: seed::books(),
            borrowed: Vec::new(),
        }
    }
}
