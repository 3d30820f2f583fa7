//! Note record.
//!
//! # Responsibility
//! - Hold the user-authored fields of one note and its checklist.
//! - Expose derived flags used by the panel (`has_checklist`, `is_linked`).
//!
//! # Invariants
//! - `id` is an in-memory identity only; it is regenerated on every load.
//! - `created_date` is always UTC.

use crate::model::check::NoteCheck;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// In-memory identity of a loaded note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// A titled note with body text, metadata and an ordered checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    /// May be empty; rendered as placeholder text.
    pub title: String,
    /// May be empty; rendered as placeholder text.
    pub text: String,
    /// Creation time, persisted with microsecond precision.
    pub created_date: DateTime<Utc>,
    pub author: String,
    /// Ordered checklist rows, including any uncommitted empty rows.
    pub checklist: Vec<NoteCheck>,
    /// Scene object references this note is tagged with.
    pub linked_objects: Vec<String>,
    pub pinned: bool,
    pub archived: bool,
}

impl Note {
    /// Creates an empty note stamped with `created_date`.
    pub fn new(created_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            text: String::new(),
            created_date,
            author: String::new(),
            checklist: Vec::new(),
            linked_objects: Vec::new(),
            pinned: false,
            archived: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_check(mut self, check: NoteCheck) -> Self {
        self.add_check(check);
        self
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Appends one checklist row.
    pub fn add_check(&mut self, check: NoteCheck) {
        self.checklist.push(check);
    }

    /// Returns whether the checklist section has anything to show.
    ///
    /// A lone empty placeholder row does not count.
    pub fn has_checklist(&self) -> bool {
        match self.checklist.as_slice() {
            [] => false,
            [only] => !only.is_blank(),
            _ => true,
        }
    }

    /// Returns whether the note is tagged with at least one scene object.
    pub fn is_linked(&self) -> bool {
        !self.linked_objects.is_empty()
    }
}
