//! Change notifications for presentation layers.
//!
//! Services publish an event after every successful mutation; presenters
//! subscribe and redraw from the view data carried by the event.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
