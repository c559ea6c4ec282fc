use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kiosk_catalog::Book;
use kiosk_core::ItemId;
use kiosk_events::Event;

use crate::due_date::DueDate;
use crate::stats::LibraryStats;

/// Event: BookBorrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub book_id: ItemId,
    pub name: String,
    pub due_date: DueDate,
    pub stats: LibraryStats,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BookReturned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub book_id: ItemId,
    pub name: String,
    pub stats: LibraryStats,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BookAdded. `categories` is the refreshed filter choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub book: Book,
    pub categories: Vec<String>,
    pub stats: LibraryStats,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryEvent {
    BookBorrowed(BookBorrowed),
    BookReturned(BookReturned),
    BookAdded(BookAdded),
}

impl LibraryEvent {
    /// Statistics after the change.
    pub fn stats(&self) -> &LibraryStats {
        match self {
            LibraryEvent::BookBorrowed(e) => &e.stats,
            LibraryEvent::BookReturned(e) => &e.stats,
            LibraryEvent::BookAdded(e) => &e.stats,
        }
    }

    pub fn book_id(&self) -> ItemId {
        match self {
            LibraryEvent::BookBorrowed(e) => e.book_id,
            LibraryEvent::BookReturned(e) => e.book_id,
            LibraryEvent::BookAdded(e) => e.book.id,
        }
    }
}

impl Event for LibraryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LibraryEvent::BookBorrowed(_) => "library.book.borrowed",
            LibraryEvent::BookReturned(_) => "library.book.returned",
            LibraryEvent::BookAdded(_) => "library.book.added",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LibraryEvent::BookBorrowed(e) => e.occurred_at,
            LibraryEvent::BookReturned(e) => e.occurred_at,
            LibraryEvent::BookAdded(e) => e.occurred_at,
        }
    }
}
