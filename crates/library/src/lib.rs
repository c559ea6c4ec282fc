//! Library domain module.
//!
//! Loan ledger, the per-book borrow/return state machine, the inventory
//! manager (adding books), and the statistics panel. Deterministic domain
//! logic only: callers supply "today", persistence lives in `kiosk-infra`.

pub mod due_date;
pub mod event;
pub mod library;
pub mod loan;
pub mod snapshot;
pub mod stats;

pub use due_date::{DEFAULT_LOAN_DAYS, DUE_DATE_FORMAT, DueDate};
pub use event::{BookAdded, BookBorrowed, BookReturned, LibraryEvent};
pub use library::{Library, NewBook};
pub use loan::{LoanEntry, LoanLedger};
pub use snapshot::LibrarySnapshot;
pub use stats::{LibraryStats, most_popular_category};
