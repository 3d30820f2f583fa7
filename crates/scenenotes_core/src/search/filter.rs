//! Case-insensitive substring filter over note title and body.

use crate::model::note::{Note, NoteId};
use crate::store::NoteStore;

/// Returns whether `query` occurs in the note's title or text, ignoring case.
///
/// An empty query matches every note.
pub fn matches(note: &Note, query: &str) -> bool {
    matches_lowered(note, &query.to_lowercase())
}

fn matches_lowered(note: &Note, lowered: &str) -> bool {
    note.title.to_lowercase().contains(lowered) || note.text.to_lowercase().contains(lowered)
}

/// Presentation-side visibility flag for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteVisibility {
    pub note_id: NoteId,
    pub visible: bool,
}

/// Active search box state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityFilter {
    query: String,
    lowered: String,
    /// Archived notes are hidden unless this is set.
    pub show_archived: bool,
}

impl VisibilityFilter {
    pub fn new(query: impl Into<String>) -> Self {
        let mut filter = Self::default();
        filter.set_query(query);
        filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.lowered = self.query.to_lowercase();
    }

    /// Whether one note passes the current query and archive setting.
    pub fn is_visible(&self, note: &Note) -> bool {
        (self.show_archived || !note.archived) && matches_lowered(note, &self.lowered)
    }

    /// Computes visibility for every note in display order.
    pub fn apply(&self, store: &NoteStore) -> Vec<NoteVisibility> {
        store
            .iter()
            .map(|note| NoteVisibility {
                note_id: note.id(),
                visible: self.is_visible(note),
            })
            .collect()
    }
}
