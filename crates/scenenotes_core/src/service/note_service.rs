//! Note panel service.
//!
//! # Responsibility
//! - Own the note store, the document slot and per-note checklist editors.
//! - Turn UI events into model mutations followed by a save.
//!
//! # Invariants
//! - Every note in the store has an attached checklist editor.
//! - Saves happen synchronously after each mutation; the last write wins.
//! - Document reloads drop all editor and search state before loading.

use crate::checklist::{ChecklistEdit, ChecklistEditor};
use crate::config::PanelConfig;
use crate::host::clock::{Clock, SystemClock};
use crate::host::events::DocumentEvent;
use crate::host::metadata::DocumentMetadata;
use crate::model::check::NoteCheck;
use crate::model::note::{Note, NoteId};
use crate::search::{NoteVisibility, VisibilityFilter};
use crate::store::NoteStore;
use log::{info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for panel actions addressed at a missing target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    NoteNotFound(NoteId),
    CheckNotFound { note_id: NoteId, index: usize },
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::CheckNotFound { note_id, index } => {
                write!(f, "checklist row {index} not found on note {note_id}")
            }
        }
    }
}

impl Error for NoteServiceError {}

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// Notes panel session bound to one host metadata slot.
pub struct NoteService<M: DocumentMetadata> {
    store: NoteStore,
    meta: M,
    clock: Box<dyn Clock>,
    config: PanelConfig,
    editors: HashMap<NoteId, ChecklistEditor>,
    filter: VisibilityFilter,
    generation: u64,
}

impl<M: DocumentMetadata> NoteService<M> {
    /// Creates a service using the system clock. Nothing is loaded yet.
    pub fn new(meta: M, config: PanelConfig) -> Self {
        Self {
            store: NoteStore::new().with_persist_retries(config.persist_retries),
            meta,
            clock: Box::new(SystemClock),
            config,
            editors: HashMap::new(),
            filter: VisibilityFilter::default(),
            generation: 0,
        }
    }

    /// Replaces the clock used for default `created_date` values.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    pub fn metadata(&self) -> &M {
        &self.meta
    }

    pub fn metadata_mut(&mut self) -> &mut M {
        &mut self.meta
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn editor(&self, id: NoteId) -> Option<&ChecklistEditor> {
        self.editors.get(&id)
    }

    /// Incremented on every reload; the UI rebuilds its rows when it changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loads notes for the currently selected document.
    pub fn load(&mut self) {
        self.editors.clear();
        self.store.load(&self.meta);
        for note in self.store.notes_mut() {
            let mut editor = ChecklistEditor::new();
            editor.attach(&mut note.checklist);
            self.editors.insert(note.id(), editor);
        }
        self.generation += 1;
    }

    /// Handles a host lifecycle event: selects the document and reloads.
    pub fn reload(&mut self, event: &DocumentEvent) {
        self.filter = VisibilityFilter::default();
        self.meta.select_document(event.document());
        self.load();
        info!(
            "event=panel_reload module=service document={} count={} generation={}",
            self.meta.current_document(),
            self.store.len(),
            self.generation
        );
    }

    /// Writes the whole store. Failures are logged and reported as `false`.
    pub fn persist(&mut self) -> bool {
        match self.store.save(&mut self.meta) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=panel_persist module=service status=dropped error={err}");
                false
            }
        }
    }

    /// Creates a note, defaulting fields from the clock and panel config.
    pub fn create_note(&mut self, note: Option<Note>) -> NoteId {
        let mut note = note.unwrap_or_else(|| {
            Note::new(self.clock.now_utc()).with_author(self.config.default_author.clone())
        });
        let mut editor = ChecklistEditor::new();
        editor.attach(&mut note.checklist);

        let id = self.store.insert(note);
        self.editors.insert(id, editor);
        self.persist();
        id
    }

    pub fn delete_note(&mut self, id: NoteId) -> ServiceResult<Note> {
        let removed = self
            .store
            .delete(id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        self.editors.remove(&id);
        self.persist();
        Ok(removed)
    }

    pub fn set_title(&mut self, id: NoteId, title: impl Into<String>) -> ServiceResult<()> {
        let title = title.into();
        self.update_note(id, |note| note.title = title)
    }

    pub fn set_text(&mut self, id: NoteId, text: impl Into<String>) -> ServiceResult<()> {
        let text = text.into();
        self.update_note(id, |note| note.text = text)
    }

    pub fn set_author(&mut self, id: NoteId, author: impl Into<String>) -> ServiceResult<()> {
        let author = author.into();
        self.update_note(id, |note| note.author = author)
    }

    pub fn set_pinned(&mut self, id: NoteId, pinned: bool) -> ServiceResult<()> {
        self.update_note(id, |note| note.pinned = pinned)
    }

    pub fn set_archived(&mut self, id: NoteId, archived: bool) -> ServiceResult<()> {
        self.update_note(id, |note| note.archived = archived)
    }

    pub fn set_linked_objects(&mut self, id: NoteId, objects: Vec<String>) -> ServiceResult<()> {
        self.update_note(id, |note| note.linked_objects = objects)
    }

    pub fn check_text_changed(
        &mut self,
        id: NoteId,
        index: usize,
        text: impl Into<String>,
    ) -> ServiceResult<ChecklistEdit> {
        let text = text.into();
        self.edit_checklist(id, index, |editor, rows| {
            editor.text_changed(rows, index, text)
        })
    }

    pub fn check_focus_gained(&mut self, id: NoteId, index: usize) -> ServiceResult<()> {
        self.edit_checklist(id, index, |editor, rows| editor.focus_gained(rows, index))
            .map(|_| ())
    }

    pub fn check_focus_lost(&mut self, id: NoteId, index: usize) -> ServiceResult<ChecklistEdit> {
        self.edit_checklist(id, index, |editor, rows| editor.focus_lost(rows, index))
    }

    pub fn set_check_checked(
        &mut self,
        id: NoteId,
        index: usize,
        checked: bool,
    ) -> ServiceResult<ChecklistEdit> {
        self.edit_checklist(id, index, |editor, rows| {
            editor.set_checked(rows, index, checked)
        })
    }

    pub fn remove_check(&mut self, id: NoteId, index: usize) -> ServiceResult<ChecklistEdit> {
        self.edit_checklist(id, index, |editor, rows| editor.remove_row(rows, index))
    }

    /// Updates the search query and returns the new visibility flags.
    pub fn set_search(&mut self, query: impl Into<String>) -> Vec<NoteVisibility> {
        self.filter.set_query(query);
        self.visibility()
    }

    pub fn set_show_archived(&mut self, show: bool) -> Vec<NoteVisibility> {
        self.filter.show_archived = show;
        self.visibility()
    }

    pub fn visibility(&self) -> Vec<NoteVisibility> {
        self.filter.apply(&self.store)
    }

    /// Notes passing the current filter, in display order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.store
            .iter()
            .filter(|note| self.filter.is_visible(note))
            .collect()
    }

    fn update_note(&mut self, id: NoteId, apply: impl FnOnce(&mut Note)) -> ServiceResult<()> {
        let note = self
            .store
            .get_mut(id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        apply(note);
        self.persist();
        Ok(())
    }

    fn edit_checklist(
        &mut self,
        id: NoteId,
        index: usize,
        apply: impl FnOnce(&mut ChecklistEditor, &mut Vec<NoteCheck>) -> ChecklistEdit,
    ) -> ServiceResult<ChecklistEdit> {
        let note = self
            .store
            .get_mut(id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        let editor = self.editors.entry(id).or_insert_with(|| {
            let mut editor = ChecklistEditor::new();
            editor.attach(&mut note.checklist);
            editor
        });
        if index >= note.checklist.len() {
            return Err(NoteServiceError::CheckNotFound { note_id: id, index });
        }

        let edit = apply(editor, &mut note.checklist);
        if edit == ChecklistEdit::Emptied {
            info!("event=checklist_hidden module=service note_id={id}");
        }
        if edit.is_mutation() {
            self.persist();
        }
        Ok(edit)
    }
}
