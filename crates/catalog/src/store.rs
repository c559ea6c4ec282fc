use std::collections::BTreeSet;

use kiosk_core::{DomainError, DomainResult, ItemId};

use crate::filter::{self, ALL, CatalogQuery};
use crate::item::CatalogItem;

/// Ordered, authoritative collection of catalog items.
///
/// Insertion order is display order; nothing ever re-sorts the store. Items are
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<T> {
    items: Vec<T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: CatalogItem> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt items as loaded, without re-validating id uniqueness.
    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Next free id: `max(existing ids, default 0) + 1`.
    ///
    /// A catalog already holding `u64::MAX` has no next id.
    pub fn next_id(&self) -> DomainResult<ItemId> {
        let max = self
            .items
            .iter()
            .map(|item| item.id())
            .max()
            .unwrap_or(ItemId::new(0));
        max.next()
            .ok_or_else(|| DomainError::conflict(format!("no item id left after {max}")))
    }

    /// Append an item, keeping ids unique.
    pub fn push(&mut self, item: T) -> DomainResult<()> {
        if self.contains(item.id()) {
            return Err(DomainError::conflict(format!(
                "item id {} already exists",
                item.id()
            )));
        }
        self.items.push(item);
        Ok(())
    }

    /// Sorted, de-duplicated categories.
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.category().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Category selector entries: the "All" sentinel followed by [`Self::categories`].
    pub fn category_choices(&self) -> Vec<String> {
        let mut choices = vec![ALL.to_string()];
        choices.extend(self.categories());
        choices
    }

    pub fn filter(&self, query: &CatalogQuery) -> Vec<&T> {
        filter::filter(&self.items, query)
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Book, BookStatus, MenuItem};

    fn books() -> Catalog<Book> {
        Catalog::from_items(vec![
            Book::new(ItemId::new(1), "The Great Gatsby", "F. Scott Fitzgerald", "Fiction"),
            Book::new(ItemId::new(4), "The Hobbit", "J.R.R. Tolkien", "Fantasy"),
            Book::new(ItemId::new(2), "1984", "George Orwell", "Sci-Fi"),
        ])
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(books().next_id(), Ok(ItemId::new(5)));
        assert_eq!(Catalog::<Book>::new().next_id(), Ok(ItemId::new(1)));
    }

    #[test]
    fn next_id_is_exhausted_at_u64_max() {
        let catalog = Catalog::from_items(vec![Book::new(
            ItemId::new(u64::MAX),
            "Last",
            "Someone",
            "Fiction",
        )]);
        assert!(matches!(catalog.next_id(), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn push_rejects_duplicate_ids() {
        let mut catalog = books();
        let err = catalog
            .push(Book::new(ItemId::new(4), "Dup", "Someone", "Fantasy"))
            .unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("already exists") => {}
            _ => panic!("Expected Conflict for duplicate id"),
        }
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn push_appends_at_the_end() {
        let mut catalog = books();
        let id = catalog.next_id().unwrap();
        catalog
            .push(Book::new(id, "Dune", "Frank Herbert", "Sci-Fi"))
            .unwrap();
        assert_eq!(catalog.items().last().map(|b| b.id), Some(id));
    }

    #[test]
    fn get_mut_allows_status_flip() {
        let mut catalog = books();
        catalog.get_mut(ItemId::new(2)).unwrap().status = BookStatus::Borrowed;
        assert_eq!(catalog.get(ItemId::new(2)).unwrap().status, BookStatus::Borrowed);
        assert!(catalog.get_mut(ItemId::new(99)).is_none());
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let catalog = Catalog::from_items(vec![
            MenuItem::new(ItemId::new(1), "Tea", 30, "Drinks"),
            MenuItem::new(ItemId::new(2), "Cake", 150, "Dessert"),
            MenuItem::new(ItemId::new(3), "Coffee", 80, "Drinks"),
        ]);
        assert_eq!(catalog.categories(), vec!["Dessert", "Drinks"]);
        assert_eq!(catalog.category_choices(), vec!["All", "Dessert", "Drinks"]);
    }
}
