use std::path::Path;

use tracing::{debug, info, warn};

use kiosk_catalog::{AssetLibrary, Book, CatalogQuery, ImageSource};
use kiosk_core::{EntryId, ItemId};
use kiosk_events::{Event, EventBus, Subscription};
use kiosk_library::{
    BookAdded, BookBorrowed, BookReturned, Library, LibraryEvent, LibraryStats, LoanEntry, NewBook,
};

use super::{ImageImport, ServiceError};
use crate::clock::Clock;
use crate::store::LibraryStore;

/// Owns the library state and writes it through to the store on every change.
#[derive(Debug)]
pub struct LibraryService<S, B, C> {
    library: Library,
    store: S,
    bus: B,
    clock: C,
    assets: AssetLibrary,
}

impl<S, B, C> LibraryService<S, B, C>
where
    S: LibraryStore,
    B: EventBus<LibraryEvent>,
    C: Clock,
{
    /// Load the current document from `store` (seed catalog on first run).
    pub fn open(store: S, bus: B, clock: C, assets: AssetLibrary) -> Self {
        let library = Library::from_snapshot(store.load());
        info!(
            books = library.catalog().len(),
            loans = library.loans().len(),
            "library opened"
        );
        Self {
            library,
            store,
            bus,
            clock,
            assets,
        }
    }

    pub fn with_loan_days(mut self, loan_days: u64) -> Self {
        self.library = self.library.with_loan_days(loan_days);
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Observe every published library change.
    pub fn subscribe(&self) -> Subscription<LibraryEvent> {
        self.bus.subscribe()
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<&Book> {
        self.library.search(query)
    }

    pub fn stats(&self) -> LibraryStats {
        self.library.stats(self.clock.today())
    }

    pub fn image_for(&self, book: &Book) -> ImageSource {
        self.assets.resolve(&book.name)
    }

    pub fn borrow(&mut self, book_id: ItemId) -> Result<LoanEntry, ServiceError> {
        let entry = self.library.borrow(book_id, self.clock.today())?;
        info!(book_id = %book_id, due_date = %entry.due_date, "book borrowed");

        self.commit(LibraryEvent::BookBorrowed(BookBorrowed {
            book_id,
            name: entry.name.clone(),
            due_date: entry.due_date,
            stats: self.stats(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(entry)
    }

    /// Return the loan at `index` in the loan list.
    pub fn return_book(&mut self, index: usize) -> Result<LoanEntry, ServiceError> {
        let entry = self.library.return_book(index)?;
        self.returned(entry)
    }

    pub fn return_entry(&mut self, entry_id: EntryId) -> Result<LoanEntry, ServiceError> {
        let entry = self.library.return_entry(entry_id)?;
        self.returned(entry)
    }

    /// Add a book, optionally copying `image` into the assets directory.
    ///
    /// A failed image copy does not fail the call; it is reported in the
    /// returned [`ImageImport`].
    pub fn add_book(
        &mut self,
        new_book: &NewBook,
        image: Option<&Path>,
    ) -> Result<(Book, ImageImport), ServiceError> {
        let book = self.library.add_book(new_book)?;
        info!(book_id = %book.id, name = %book.name, "book added");

        let import = match image {
            None => ImageImport::NotRequested,
            Some(source) => match self.assets.import(source, &book.name) {
                Ok(dest) => ImageImport::Copied(dest),
                Err(err) => {
                    warn!(book_id = %book.id, error = %err, "image not imported");
                    ImageImport::Failed(err)
                }
            },
        };

        self.commit(LibraryEvent::BookAdded(BookAdded {
            book: book.clone(),
            categories: self.library.catalog().category_choices(),
            stats: self.stats(),
            occurred_at: self.clock.now(),
        }))?;
        Ok((book, import))
    }

    fn returned(&mut self, entry: LoanEntry) -> Result<LoanEntry, ServiceError> {
        info!(book_id = %entry.book_id, "book returned");
        self.commit(LibraryEvent::BookReturned(BookReturned {
            book_id: entry.book_id,
            name: entry.name.clone(),
            stats: self.stats(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(entry)
    }

    /// Save, then publish. A failed save publishes nothing.
    fn commit(&self, event: LibraryEvent) -> Result<(), ServiceError> {
        if let Err(err) = self.store.save(&self.library.snapshot()) {
            warn!(error = %err, "library change kept in memory but not saved");
            return Err(err.into());
        }

        let event_type = event.event_type();
        self.bus
            .publish(event)
            .map_err(|e| ServiceError::Publish(format!("{e:?}")))?;
        debug!(event_type, "library event published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use kiosk_catalog::{BookStatus, StatusFilter};
    use kiosk_core::DomainError;
    use kiosk_events::InMemoryEventBus;

    use crate::clock::FixedClock;
    use crate::store::InMemoryLibraryStore;
    use proptest::prelude::*;

    type Service = LibraryService<Arc<InMemoryLibraryStore>, InMemoryEventBus<LibraryEvent>, FixedClock>;

    struct Harness {
        service: Service,
        store: Arc<InMemoryLibraryStore>,
        events: Subscription<LibraryEvent>,
        _assets: tempfile::TempDir,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn harness() -> Harness {
        let assets = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryLibraryStore::seeded());
        let bus = InMemoryEventBus::<LibraryEvent>::new();
        let events = bus.subscribe();
        let service = LibraryService::open(
            store.clone(),
            bus,
            FixedClock::on(today()),
            AssetLibrary::new(assets.path().join("images")),
        );
        Harness {
            service,
            store,
            events,
            _assets: assets,
        }
    }

    #[test]
    fn borrow_saves_once_and_publishes_stats() {
        let mut h = harness();

        let entry = h.service.borrow(ItemId::new(1)).unwrap();

        assert_eq!(entry.due_date.to_string(), "02-11-2026");
        assert_eq!(h.store.save_count(), 1);
        assert_eq!(h.store.document().borrowed.len(), 1);

        let events = h.events.drain();
        assert_eq!(events.len(), 1);
        match &events[0] {
            LibraryEvent::BookBorrowed(e) => {
                assert_eq!(e.book_id, ItemId::new(1));
                assert_eq!(e.stats.borrowed, 1);
                assert_eq!(e.stats.available, 7);
            }
            other => panic!("Expected BookBorrowed, got {other:?}"),
        }
    }

    #[test]
    fn rejected_operations_neither_save_nor_publish() {
        let mut h = harness();
        h.service.borrow(ItemId::new(1)).unwrap();
        h.events.drain();

        let err = h.service.borrow(ItemId::new(1)).unwrap_err();
        assert_eq!(err.domain(), Some(&DomainError::NotAvailable(ItemId::new(1))));
        assert!(h.service.return_book(5).is_err());
        assert!(h.service.add_book(&NewBook::new("", "x", "y"), None).is_err());

        assert_eq!(h.store.save_count(), 1);
        assert!(h.events.drain().is_empty());
    }

    #[test]
    fn return_restores_availability() {
        let mut h = harness();
        h.service.borrow(ItemId::new(4)).unwrap();

        let entry = h.service.return_book(0).unwrap();

        assert_eq!(entry.book_id, ItemId::new(4));
        let available = h
            .service
            .search(&CatalogQuery::all().status(StatusFilter::Only(BookStatus::Available)));
        assert_eq!(available.len(), 8);
        assert_eq!(h.store.save_count(), 2);
        assert_eq!(h.store.document(), h.service.library().snapshot());
        assert_eq!(h.events.drain().len(), 2);
    }

    #[test]
    fn failed_save_keeps_memory_change_and_skips_publish() {
        let mut h = harness();
        h.store.fail_saves(true);

        match h.service.borrow(ItemId::new(2)) {
            Err(ServiceError::Store(_)) => {}
            other => panic!("Expected Store error, got {other:?}"),
        }

        assert_eq!(h.service.library().loans().len(), 1);
        assert!(h.store.document().borrowed.is_empty());
        assert!(h.events.drain().is_empty());
    }

    #[test]
    fn add_book_publishes_refreshed_categories() {
        let mut h = harness();

        let (book, import) = h
            .service
            .add_book(&NewBook::new("Dune", "Frank Herbert", "Space Opera"), None)
            .unwrap();

        assert_eq!(book.id, ItemId::new(9));
        assert!(matches!(import, ImageImport::NotRequested));
        match h.events.drain().as_slice() {
            [LibraryEvent::BookAdded(e)] => {
                assert_eq!(e.book, book);
                assert!(e.categories.contains(&"Space Opera".to_string()));
                assert_eq!(e.categories[0], "All");
                assert_eq!(e.stats.total, 9);
            }
            other => panic!("Expected one BookAdded, got {other:?}"),
        }
    }

    #[test]
    fn add_book_copies_image_or_warns() {
        let mut h = harness();
        let src_dir = tempfile::tempdir().unwrap();
        let cover = src_dir.path().join("cover.png");
        std::fs::write(&cover, b"img").unwrap();

        let (book, import) = h
            .service
            .add_book(&NewBook::new("Ender's Game", "Orson Scott Card", "Sci-Fi"), Some(&cover))
            .unwrap();
        match import {
            ImageImport::Copied(dest) => assert!(dest.ends_with("endersgame.jpg")),
            other => panic!("Expected Copied, got {other:?}"),
        }
        assert!(!h.service.image_for(&book).is_placeholder());

        let missing = src_dir.path().join("nope.png");
        let (book, import) = h
            .service
            .add_book(&NewBook::new("Dune", "Frank Herbert", "Sci-Fi"), Some(&missing))
            .unwrap();
        assert!(import.warning().is_some());
        assert!(h.service.image_for(&book).is_placeholder());
        assert_eq!(h.store.save_count(), 2);
    }

    #[test]
    fn reopening_sees_saved_state() {
        let mut h = harness();
        h.service.borrow(ItemId::new(3)).unwrap();

        let reopened = LibraryService::open(
            h.store.clone(),
            InMemoryEventBus::<LibraryEvent>::new(),
            FixedClock::on(today()),
            AssetLibrary::new("unused"),
        );

        assert_eq!(
            reopened.library().book(ItemId::new(3)).map(|b| b.status),
            Some(BookStatus::Borrowed)
        );
        assert_eq!(reopened.stats().borrowed, 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Borrow(u64),
        Return(usize),
        Add(bool),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u64..11).prop_map(Op::Borrow),
            (0usize..6).prop_map(Op::Return),
            any::<bool>().prop_map(Op::Add),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: every accepted mutation saves once and publishes one event;
        /// every rejected one does neither.
        #[test]
        fn one_save_and_one_event_per_accepted_mutation(ops in prop::collection::vec(op(), 0..30)) {
            let mut h = harness();
            let mut accepted = 0usize;

            for op in ops {
                let ok = match op {
                    Op::Borrow(id) => h.service.borrow(ItemId::new(id)).is_ok(),
                    Op::Return(index) => h.service.return_book(index).is_ok(),
                    Op::Add(valid) => {
                        let title = if valid { "Dune" } else { "   " };
                        h.service
                            .add_book(&NewBook::new(title, "Frank Herbert", "Sci-Fi"), None)
                            .is_ok()
                    }
                };
                if ok {
                    accepted += 1;
                }

                prop_assert_eq!(h.events.drain().len(), usize::from(ok));
                prop_assert_eq!(h.store.save_count(), accepted);
            }
            prop_assert_eq!(h.store.document(), h.service.library().snapshot());
        }
    }
}
