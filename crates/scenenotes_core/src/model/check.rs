//! Checklist row model.
//!
//! # Responsibility
//! - Store the text and check state of one checklist row.
//! - Derive the check state of group headers from their children.
//!
//! # Invariants
//! - A row with children is a group header; its own `checked` flag is never
//!   the source of truth for display.
//! - An empty `text` marks an uncommitted row that is never persisted.

/// One checkable line of text, optionally owning sub-items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCheck {
    /// Row text. Empty while the row is an open, uncommitted slot.
    pub text: String,
    /// Stored flag. Ignored for display when `children` is non-empty.
    checked: bool,
    children: Vec<NoteCheck>,
}

impl NoteCheck {
    /// Creates an unchecked leaf row.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
            children: Vec::new(),
        }
    }

    /// Creates a leaf row with an explicit check state.
    pub fn with_checked(text: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(text)
        }
    }

    /// Creates an empty row used as the trailing open slot.
    pub fn open_slot() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(text: String, checked: bool, children: Vec<NoteCheck>) -> Self {
        Self {
            text,
            checked,
            children,
        }
    }

    /// Appends a sub-item, turning this row into a group header.
    pub fn add_child(&mut self, child: NoteCheck) {
        self.children.push(child);
    }

    /// Builder form of [`NoteCheck::add_child`].
    pub fn with_child(mut self, child: NoteCheck) -> Self {
        self.add_child(child);
        self
    }

    pub fn children(&self) -> &[NoteCheck] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<NoteCheck> {
        &mut self.children
    }

    /// Returns whether this row owns sub-items.
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns whether the row has no text yet.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the effective check state.
    ///
    /// Group headers are checked iff every child is checked (recursively).
    /// Leaf rows report their stored flag.
    pub fn is_checked(&self) -> bool {
        if self.children.is_empty() {
            self.checked
        } else {
            self.children.iter().all(NoteCheck::is_checked)
        }
    }

    /// Returns the stored flag without group derivation.
    ///
    /// Only the codec needs this; display code should call [`NoteCheck::is_checked`].
    pub fn stored_checked(&self) -> bool {
        self.checked
    }

    /// Sets the check state.
    ///
    /// On a group header the value is pushed down to every descendant so the
    /// derived state matches what was requested.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        for child in &mut self.children {
            child.set_checked(checked);
        }
    }
}
