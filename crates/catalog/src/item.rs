use core::str::FromStr;

use serde::{Deserialize, Serialize};

use kiosk_core::{DomainError, Entity, ItemId};

/// Behaviour shared by everything a [`Catalog`](crate::Catalog) can hold.
pub trait CatalogItem: Entity<Id = ItemId> {
    fn name(&self) -> &str;

    fn category(&self) -> &str;

    /// Borrowing status, for items that track one.
    fn status(&self) -> Option<BookStatus> {
        None
    }

    /// Free-text match. `needle` is already lowercased and non-empty.
    fn matches_text(&self, needle: &str) -> bool {
        self.name().to_lowercase().contains(needle)
    }
}

/// A dish on the food-ordering menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    /// Price in whole rupees.
    pub price: u64,
    pub category: String,
}

impl MenuItem {
    pub fn new(id: ItemId, name: impl Into<String>, price: u64, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
        }
    }
}

impl Entity for MenuItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl CatalogItem for MenuItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Book borrowing status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
        }
    }
}

impl core::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            other => Err(DomainError::validation(format!("unknown book status: {other}"))),
        }
    }
}

/// A book in the library catalog.
///
/// Field order matches the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: ItemId,
    pub name: String,
    pub author: String,
    pub category: String,
    pub status: BookStatus,
}

impl Book {
    /// A new, available book.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            author: author.into(),
            category: category.into(),
            status: BookStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}

impl Entity for Book {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl CatalogItem for Book {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn status(&self) -> Option<BookStatus> {
        Some(self.status)
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}
