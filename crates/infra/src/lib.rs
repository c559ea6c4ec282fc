//! Infrastructure layer: configuration, persistence, clock, application services.
//!
//! Domain crates stay pure; everything that touches the filesystem, the wall
//! clock or the event bus is wired together here.

pub mod clock;
pub mod config;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::KioskConfig;
pub use service::{ImageImport, LibraryService, OrderingService, ServiceError};
pub use store::{InMemoryLibraryStore, JsonFileStore, LibraryStore, StoreError};
