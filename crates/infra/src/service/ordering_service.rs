use tracing::{debug, info};

use kiosk_catalog::{Catalog, CatalogQuery, MenuItem, seed};
use kiosk_core::{DomainError, EntryId, ItemId};
use kiosk_events::{Event, EventBus, Subscription};
use kiosk_ordering::{Cart, CartEntry, CartEvent, CartView, ItemAdded, ItemRemoved, OrderPlaced, OrderReceipt};

use super::ServiceError;
use crate::clock::Clock;

/// Menu browsing and the cart. Memory only; nothing is persisted.
#[derive(Debug)]
pub struct OrderingService<B, C> {
    menu: Catalog<MenuItem>,
    cart: Cart,
    bus: B,
    clock: C,
}

impl<B, C> OrderingService<B, C>
where
    B: EventBus<CartEvent>,
    C: Clock,
{
    pub fn new(menu: Catalog<MenuItem>, bus: B, clock: C) -> Self {
        Self {
            menu,
            cart: Cart::new(),
            bus,
            clock,
        }
    }

    /// Service over the built-in menu.
    pub fn with_seed_menu(bus: B, clock: C) -> Self {
        Self::new(Catalog::from_items(seed::menu()), bus, clock)
    }

    pub fn menu(&self) -> &Catalog<MenuItem> {
        &self.menu
    }

    /// Observe every published cart change.
    pub fn subscribe(&self) -> Subscription<CartEvent> {
        self.bus.subscribe()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn browse(&self, query: &CatalogQuery) -> Vec<&MenuItem> {
        self.menu.filter(query)
    }

    pub fn view(&self) -> CartView {
        self.cart.view()
    }

    pub fn add_to_cart(&mut self, item_id: ItemId) -> Result<EntryId, ServiceError> {
        let item = self.menu.get(item_id).cloned().ok_or(DomainError::NotFound)?;
        let name = item.name.clone();
        let entry_id = self.cart.add(item);
        debug!(item_id = %item_id, entry_id = %entry_id, "added to cart");

        self.publish(CartEvent::ItemAdded(ItemAdded {
            entry_id,
            item_id,
            name,
            cart: self.cart.view(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(entry_id)
    }

    /// Remove the cart line at `index`. Out of range does nothing and publishes nothing.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<Option<CartEntry>, ServiceError> {
        let removed = self.cart.remove_at(index);
        self.removed(removed)
    }

    pub fn remove_entry(&mut self, entry_id: EntryId) -> Result<Option<CartEntry>, ServiceError> {
        let removed = self.cart.remove(entry_id);
        self.removed(removed)
    }

    pub fn place_order(&mut self) -> Result<OrderReceipt, ServiceError> {
        let receipt = self.cart.place_order(self.clock.now())?;
        info!(lines = receipt.line_count, total = receipt.total, "order placed");

        self.publish(CartEvent::OrderPlaced(OrderPlaced {
            receipt: receipt.clone(),
            occurred_at: receipt.placed_at,
        }))?;
        Ok(receipt)
    }

    fn removed(&mut self, removed: Option<CartEntry>) -> Result<Option<CartEntry>, ServiceError> {
        let Some(entry) = removed else {
            return Ok(None);
        };
        debug!(entry_id = %entry.entry_id, "removed from cart");

        self.publish(CartEvent::ItemRemoved(ItemRemoved {
            entry_id: entry.entry_id,
            name: entry.item.name.clone(),
            cart: self.cart.view(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(Some(entry))
    }

    fn publish(&self, event: CartEvent) -> Result<(), ServiceError> {
        let event_type = event.event_type();
        self.bus
            .publish(event)
            .map_err(|e| ServiceError::Publish(format!("{e:?}")))?;
        debug!(event_type, "cart event published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kiosk_catalog::CategoryFilter;
    use kiosk_events::InMemoryEventBus;

    use crate::clock::FixedClock;

    fn service() -> (
        OrderingService<InMemoryEventBus<CartEvent>, FixedClock>,
        Subscription<CartEvent>,
    ) {
        let bus = InMemoryEventBus::<CartEvent>::new();
        let events = bus.subscribe();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        (OrderingService::with_seed_menu(bus, clock), events)
    }

    #[test]
    fn adding_publishes_running_total() {
        let (mut svc, events) = service();

        svc.add_to_cart(ItemId::new(1)).unwrap(); // Burger 120
        svc.add_to_cart(ItemId::new(5)).unwrap(); // Tea 30

        let totals: Vec<u64> = events.drain().iter().map(|e| e.cart().total).collect();
        assert_eq!(totals, vec![120, 150]);
        assert_eq!(svc.view().lines.len(), 2);
    }

    #[test]
    fn unknown_menu_item_is_not_found() {
        let (mut svc, events) = service();
        let err = svc.add_to_cart(ItemId::new(99)).unwrap_err();
        assert_eq!(err.domain(), Some(&DomainError::NotFound));
        assert!(svc.cart().is_empty());
        assert!(events.drain().is_empty());
    }

    #[test]
    fn out_of_range_remove_is_silent() {
        let (mut svc, events) = service();
        svc.add_to_cart(ItemId::new(2)).unwrap();
        events.drain();

        assert!(svc.remove_from_cart(3).unwrap().is_none());
        assert_eq!(svc.cart().len(), 1);
        assert!(events.drain().is_empty());

        let removed = svc.remove_from_cart(0).unwrap().unwrap();
        assert_eq!(removed.item.name, "Cake");
        assert!(events.drain()[0].cart().is_empty());
    }

    #[test]
    fn remove_by_entry_id_keeps_other_duplicates() {
        let (mut svc, _events) = service();
        let first = svc.add_to_cart(ItemId::new(4)).unwrap();
        let second = svc.add_to_cart(ItemId::new(4)).unwrap();

        svc.remove_entry(first).unwrap();

        assert_eq!(svc.cart().entries()[0].entry_id, second);
        assert!(svc.remove_entry(first).unwrap().is_none());
    }

    #[test]
    fn order_clears_cart_and_empty_order_is_rejected() {
        let (mut svc, events) = service();
        let err = svc.place_order().unwrap_err();
        assert_eq!(err.domain(), Some(&DomainError::EmptyCart));

        svc.add_to_cart(ItemId::new(1)).unwrap();
        svc.add_to_cart(ItemId::new(3)).unwrap();
        events.drain();

        let receipt = svc.place_order().unwrap();
        assert_eq!(receipt.line_count, 2);
        assert_eq!(receipt.total, 220);
        assert!(svc.cart().is_empty());
        match events.drain().as_slice() {
            [CartEvent::OrderPlaced(e)] => assert_eq!(e.receipt, receipt),
            other => panic!("Expected one OrderPlaced, got {other:?}"),
        }
    }

    #[test]
    fn browse_filters_menu() {
        let (svc, _events) = service();
        let drinks = svc.browse(&CatalogQuery::all().category(CategoryFilter::parse("Drinks")));
        let names: Vec<&str> = drinks.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Coffee", "Tea", "Coca Cola", "Milkshake"]);

        let cakes = svc.browse(&CatalogQuery::all().text("CAKE"));
        assert_eq!(cakes.len(), 3);
    }
}
