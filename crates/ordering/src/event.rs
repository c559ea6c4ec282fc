use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kiosk_core::{EntryId, ItemId};
use kiosk_events::Event;

use crate::cart::{CartView, OrderReceipt};

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub entry_id: EntryId,
    pub item_id: ItemId,
    pub name: String,
    pub cart: CartView,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub entry_id: EntryId,
    pub name: String,
    pub cart: CartView,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderPlaced. The cart is empty afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub receipt: OrderReceipt,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    OrderPlaced(OrderPlaced),
}

impl CartEvent {
    /// Cart contents after the change.
    pub fn cart(&self) -> CartView {
        match self {
            CartEvent::ItemAdded(e) => e.cart.clone(),
            CartEvent::ItemRemoved(e) => e.cart.clone(),
            CartEvent::OrderPlaced(_) => CartView::default(),
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "ordering.cart.item_added",
            CartEvent::ItemRemoved(_) => "ordering.cart.item_removed",
            CartEvent::OrderPlaced(_) => "ordering.cart.order_placed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::OrderPlaced(e) => e.occurred_at,
        }
    }
}
