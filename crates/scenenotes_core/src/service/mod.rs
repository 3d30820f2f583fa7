//! Panel-level use-case services.
//!
//! # Responsibility
//! - Apply user actions to the note store and persist after each one.
//! - Rebuild panel state when the host switches documents.
//!
//! # Invariants
//! - Every mutating action is followed by a synchronous save.
//! - Persistence failures are logged, never returned to the UI.

pub mod note_service;
pub mod panel;

pub use note_service::{NoteService, NoteServiceError};
pub use panel::NotesPanel;
