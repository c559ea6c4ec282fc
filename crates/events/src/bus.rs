//! Event publishing/subscription abstraction (mechanics only).
//!
//! This module provides the **observer contract** between the application core and
//! whatever presents it. A service mutates state, then publishes one event describing
//! the change; each subscriber receives its own copy and redraws.
//!
//! ## Design
//!
//! - **Toolkit-agnostic**: nothing here knows about widgets; a console, a test, or a
//!   GUI can subscribe.
//! - **Fire-and-forget**: publishing never blocks on a slow subscriber.
//! - **No persistence**: the bus is for distribution; the data file is the record.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every message published after it was created
/// (broadcast semantics).
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = bus.subscribe();
/// service.borrow(book_id)?;
/// while let Ok(event) = subscription.try_recv() {
///     redraw(&event);
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Collect every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// user intent → service (mutate → save) → EventBus::publish → subscribers redraw
/// ```
///
/// Events are published only **after** the mutation (and, for the library, the
/// write-through save) succeeded, so a subscriber never observes a state that was
/// rolled back or not persisted.
///
/// `publish()` can fail (e.g. poisoned lock). Failures are surfaced to the calling
/// service, which reports them without undoing the already-applied mutation.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
