use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kiosk_catalog::MenuItem;
use kiosk_core::{DomainError, DomainResult, EntryId};

/// One cart line: a copy of the menu item as it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub entry_id: EntryId,
    pub item: MenuItem,
}

/// Render payload for a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub entry_id: EntryId,
    pub name: String,
    pub price: u64,
}

/// Render payload for the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: u64,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Confirmation of a placed order. Nothing is transmitted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub line_count: usize,
    pub total: u64,
    pub placed_at: DateTime<Utc>,
}

/// Ordered cart ledger. The same menu item may appear (and be billed) several times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a copy of `item`.
    pub fn add(&mut self, item: MenuItem) -> EntryId {
        let entry_id = EntryId::new();
        self.entries.push(CartEntry { entry_id, item });
        entry_id
    }

    /// Remove the entry at `index`; out of range is a no-op returning `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<CartEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn remove(&mut self, entry_id: EntryId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.entry_id == entry_id)?;
        self.remove_at(index)
    }

    /// Sum of entry prices, recomputed from the entries on every call.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.item.price).sum()
    }

    /// Confirm and clear the cart. An empty cart is rejected and left untouched.
    pub fn place_order(&mut self, placed_at: DateTime<Utc>) -> DomainResult<OrderReceipt> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        let receipt = OrderReceipt {
            line_count: self.entries.len(),
            total: self.total(),
            placed_at,
        };
        self.entries.clear();
        Ok(receipt)
    }

    pub fn view(&self) -> CartView {
        CartView {
            lines: self
                .entries
                .iter()
                .map(|e| CartLine {
                    entry_id: e.entry_id,
                    name: e.item.name.clone(),
                    price: e.item.price,
                })
                .collect(),
            total: self.total(),
        }
    }
}
