//! SQLite-backed document metadata store.
//!
//! Stands in for hosts that have no native per-document metadata field: each
//! document key maps to one row in `document_notes`.

use super::metadata::{DocumentMetadata, MetadataError, UNTITLED_DOCUMENT};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteDocumentStore {
    conn: Connection,
    current: Option<String>,
}

impl SqliteDocumentStore {
    /// Opens (and migrates) a store file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            current: None,
        }
    }

    /// Lists document keys that have a stored blob, sorted by key.
    pub fn documents(&self) -> Result<Vec<String>, MetadataError> {
        let mut stmt = self
            .conn
            .prepare("SELECT document_key FROM document_notes ORDER BY document_key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys)
    }
}

impl DocumentMetadata for SqliteDocumentStore {
    fn select_document(&mut self, document: Option<&str>) {
        self.current = document.map(str::to_string);
    }

    fn current_document(&self) -> &str {
        self.current.as_deref().unwrap_or(UNTITLED_DOCUMENT)
    }

    fn read_blob(&self) -> Result<Option<String>, MetadataError> {
        let blob = self
            .conn
            .query_row(
                "SELECT blob FROM document_notes WHERE document_key = ?1;",
                [self.current_document()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(blob)
    }

    fn write_blob(&mut self, blob: &str) -> Result<(), MetadataError> {
        self.conn.execute(
            "INSERT INTO document_notes (document_key, blob)
             VALUES (?1, ?2)
             ON CONFLICT(document_key) DO UPDATE SET
                blob = excluded.blob,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.current_document(), blob],
        )?;
        Ok(())
    }
}
