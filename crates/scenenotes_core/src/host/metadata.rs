//! Per-document blob slot contract and in-memory implementation.

use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used for documents that have not been saved yet.
pub const UNTITLED_DOCUMENT: &str = "untitled";

/// Failure reported by a host metadata store.
#[derive(Debug)]
pub enum MetadataError {
    Db(DbError),
    /// Host refused the write.
    Rejected(String),
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Rejected(message) => write!(f, "metadata write rejected: {message}"),
        }
    }
}

impl Error for MetadataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<DbError> for MetadataError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for MetadataError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Host-document key/value slot holding one opaque string per document.
pub trait DocumentMetadata {
    /// Points the slot at `document`, or at the untitled slot for `None`.
    fn select_document(&mut self, document: Option<&str>);
    /// Key of the currently selected document.
    fn current_document(&self) -> &str;
    /// Reads the blob for the current document. `Ok(None)` when never written.
    fn read_blob(&self) -> Result<Option<String>, MetadataError>;
    /// Replaces the blob for the current document.
    fn write_blob(&mut self, blob: &str) -> Result<(), MetadataError>;
}

/// In-memory slot store.
///
/// `reject_next_writes` lets callers simulate a host that refuses writes.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    slots: HashMap<String, String>,
    current: Option<String>,
    rejected_writes: u32,
    write_count: u64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot directly, bypassing the write counter.
    pub fn with_blob(mut self, document: &str, blob: impl Into<String>) -> Self {
        self.slots.insert(document.to_string(), blob.into());
        self
    }

    /// Makes the next `count` writes fail with [`MetadataError::Rejected`].
    pub fn reject_next_writes(&mut self, count: u32) {
        self.rejected_writes = count;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    /// Raw blob for any document, regardless of the current selection.
    pub fn blob(&self, document: &str) -> Option<&str> {
        self.slots.get(document).map(String::as_str)
    }
}

impl DocumentMetadata for MemoryDocumentStore {
    fn select_document(&mut self, document: Option<&str>) {
        self.current = document.map(str::to_string);
    }

    fn current_document(&self) -> &str {
        self.current.as_deref().unwrap_or(UNTITLED_DOCUMENT)
    }

    fn read_blob(&self) -> Result<Option<String>, MetadataError> {
        Ok(self.slots.get(self.current_document()).cloned())
    }

    fn write_blob(&mut self, blob: &str) -> Result<(), MetadataError> {
        if self.rejected_writes > 0 {
            self.rejected_writes -= 1;
            return Err(MetadataError::Rejected(format!(
                "slot `{}` is read-only",
                self.current_document()
            )));
        }
        let key = self.current_document().to_string();
        self.slots.insert(key, blob.to_string());
        self.write_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentMetadata, MemoryDocumentStore, MetadataError, UNTITLED_DOCUMENT};

    #[test]
    fn slots_are_isolated_per_document() {
        let mut store = MemoryDocumentStore::new();
        store.select_document(Some("shot_010.ma"));
        store.write_blob("[]").unwrap();

        store.select_document(Some("shot_020.ma"));
        assert_eq!(store.read_blob().unwrap(), None);

        store.select_document(Some("shot_010.ma"));
        assert_eq!(store.read_blob().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn unselected_store_uses_untitled_slot() {
        let mut store = MemoryDocumentStore::new();
        assert_eq!(store.current_document(), UNTITLED_DOCUMENT);
        store.write_blob("x").unwrap();
        assert_eq!(store.blob(UNTITLED_DOCUMENT), Some("x"));
    }

    #[test]
    fn rejected_writes_are_counted_down() {
        let mut store = MemoryDocumentStore::new();
        store.reject_next_writes(1);
        assert!(matches!(
            store.write_blob("a"),
            Err(MetadataError::Rejected(_))
        ));
        store.write_blob("b").unwrap();
        assert_eq!(store.write_count(), 1);
    }
}
