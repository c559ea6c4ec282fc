use std::io;
use std::path::PathBuf;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use kiosk_library::LibrarySnapshot;

use super::{LibraryStore, StoreError};

/// In-memory library store for tests/dev.
///
/// Counts successful saves and can be told to fail them.
#[derive(Debug)]
pub struct InMemoryLibraryStore {
    document: RwLock<LibrarySnapshot>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryLibraryStore {
    pub fn new(initial: LibrarySnapshot) -> Self {
        Self {
            document: RwLock::new(initial),
            saves: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn seeded() -> Self {
        Self::new(LibrarySnapshot::seed())
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Last saved document (or the initial one).
    pub fn document(&self) -> LibrarySnapshot {
        match self.document.read() {
            Ok(doc) => doc.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for InMemoryLibraryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl LibraryStore for InMemoryLibraryStore {
    fn load(&self) -> LibrarySnapshot {
        self.document()
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), StoreError> {
        let unavailable = |msg: &str| StoreError::Io {
            path: PathBuf::from("<memory>"),
            source: io::Error::other(msg.to_string()),
        };
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("store is failing"));
        }

        let mut doc = self.document.write().map_err(|_| unavailable("lock poisoned"))?;
        *doc = snapshot.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
