//! Food-ordering domain module.
//!
//! The cart ledger and the events published when it changes. Deterministic
//! domain logic only (no IO, no storage: the food app keeps its cart in memory).

pub mod cart;
pub mod event;

pub use cart::{Cart, CartEntry, CartLine, CartView, OrderReceipt};
pub use event::{CartEvent, ItemAdded, ItemRemoved, OrderPlaced};
