//! Core domain logic for the scene notes panel.
//! This crate owns the note model, its persisted blob format and the
//! checklist editing rules; widgets live in the host integration.

pub mod checklist;
pub mod codec;
pub mod config;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use checklist::{ChecklistEdit, ChecklistEditor};
pub use codec::{
    deserialize_check, deserialize_note, deserialize_notes, serialize_check, serialize_note,
    serialize_notes, CodecError,
};
pub use config::PanelConfig;
pub use host::{
    Clock, DocumentEvent, DocumentEvents, DocumentMetadata, FixedClock, MemoryDocumentStore,
    MetadataError, SqliteDocumentStore, Subscription, SystemClock,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::check::NoteCheck;
pub use model::note::{Note, NoteId};
pub use search::{matches, NoteVisibility, VisibilityFilter};
pub use service::{NoteService, NoteServiceError, NotesPanel};
pub use store::{NoteStore, StoreError};

/// Minimal health-check API for host integration smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
