use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **self-contained** (they carry the derived view data a presenter needs)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "library.book.borrowed").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (wall-clock time of the user action).
    fn occurred_at(&self) -> DateTime<Utc>;
}
