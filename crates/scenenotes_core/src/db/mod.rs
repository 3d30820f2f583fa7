//! SQLite bootstrap for the document metadata store.
//!
//! # Responsibility
//! - Open and configure SQLite connections holding per-document note blobs.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Slots must not be read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the document notes database.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a statement outside a migration step.
    Sqlite(rusqlite::Error),
    /// A migration script failed; the schema stays at the previous version.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build with a schema this one cannot read.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "document notes database error: {err}"),
            Self::Migration { version, source } => write!(
                f,
                "document notes schema migration {version} failed: {source}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "document notes schema version {db_version} is newer than supported {latest_supported}; \
                 refusing to touch stored note blobs"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
