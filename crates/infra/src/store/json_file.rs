use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};

use kiosk_library::LibrarySnapshot;

use super::{LibraryStore, StoreError};

const INDENT: &[u8] = b"    ";

/// The library document on disk.
///
/// Saves replace the whole file: the document is written to a sibling
/// `<name>.tmp` and renamed over the previous file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("library"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn encode(snapshot: &LibrarySnapshot) -> Result<Vec<u8>, StoreError> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        snapshot.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl LibraryStore for JsonFileStore {
    fn load(&self) -> LibrarySnapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no library data file; starting from seed catalog");
                return LibrarySnapshot::seed();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable library data file; starting from seed catalog");
                return LibrarySnapshot::seed();
            }
        };

        match serde_json::from_str::<LibrarySnapshot>(&raw) {
            Ok(snapshot) => {
                debug!(
                    path = %self.path.display(),
                    books = snapshot.books.len(),
                    borrowed = snapshot.borrowed.len(),
                    "loaded library data"
                );
                snapshot
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "malformed library data file; starting from seed catalog");
                LibrarySnapshot::seed()
            }
        }
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), StoreError> {
        let bytes = Self::encode(snapshot)?;
        let tmp = self.temp_path();

        fs::write(&tmp, &bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            books = snapshot.books.len(),
            borrowed = snapshot.borrowed.len(),
            "saved library data"
        );
        Ok(())
    }
}
