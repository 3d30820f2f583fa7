//! Note collection with load/save against a [`DocumentMetadata`] slot.

use crate::codec::{deserialize_notes, serialize_notes, CodecError};
use crate::host::metadata::{DocumentMetadata, MetadataError};
use crate::model::check::NoteCheck;
use crate::model::note::{Note, NoteId};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Number of extra write attempts after a rejected save.
pub const DEFAULT_PERSIST_RETRIES: u8 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Save failure. Load never fails.
#[derive(Debug)]
pub enum StoreError {
    Encode(CodecError),
    Write(MetadataError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::Write(err) => write!(f, "failed to write notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Write(err) => Some(err),
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Encode(value)
    }
}

impl From<MetadataError> for StoreError {
    fn from(value: MetadataError) -> Self {
        Self::Write(value)
    }
}

/// Ordered collection of the current document's notes.
#[derive(Debug, Clone)]
pub struct NoteStore {
    notes: Vec<Note>,
    persist_retries: u8,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            persist_retries: DEFAULT_PERSIST_RETRIES,
        }
    }

    /// Sets how many times a rejected write is retried.
    pub fn with_persist_retries(mut self, retries: u8) -> Self {
        self.persist_retries = retries;
        self
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub(crate) fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id() == id)
    }

    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id() == id)
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Appends `note`, or a default note stamped `created_date` when `None`.
    ///
    /// Returns the identity of the appended note.
    pub fn create(&mut self, note: Option<Note>, created_date: DateTime<Utc>) -> NoteId {
        self.insert(note.unwrap_or_else(|| Note::new(created_date)))
    }

    /// Appends an already built note.
    pub fn insert(&mut self, note: Note) -> NoteId {
        let id = note.id();
        self.notes.push(note);
        id
    }

    /// Removes a note by identity.
    pub fn delete(&mut self, id: NoteId) -> Option<Note> {
        let index = self.position(id)?;
        Some(self.notes.remove(index))
    }

    /// Replaces the collection with the blob stored for the current document.
    ///
    /// Read or decode failures are logged and leave the store empty.
    pub fn load(&mut self, meta: &dyn DocumentMetadata) {
        let started_at = Instant::now();
        let document = meta.current_document().to_string();
        self.clear();

        let blob = match meta.read_blob() {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!(
                    "event=notes_load module=store status=ok document={document} count=0 reason=no_blob"
                );
                return;
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=recovered document={document} error_code=read_failed error={err}"
                );
                return;
            }
        };

        match deserialize_notes(&blob) {
            Ok(mut notes) => {
                for note in &mut notes {
                    drop_blank_rows(&mut note.checklist);
                }
                self.notes = notes;
                info!(
                    "event=notes_load module=store status=ok document={document} count={} duration_ms={}",
                    self.notes.len(),
                    started_at.elapsed().as_millis()
                );
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=recovered document={document} error_code=decode_failed blob_len={} error={err}",
                    blob.len()
                );
            }
        }
    }

    /// Encodes the whole collection and writes it to the current document.
    ///
    /// A rejected write is retried `persist_retries` times before giving up.
    pub fn save(&self, meta: &mut dyn DocumentMetadata) -> StoreResult<()> {
        let blob = serialize_notes(&self.notes)?;
        let document = meta.current_document().to_string();

        let mut attempt: u8 = 0;
        loop {
            match meta.write_blob(&blob) {
                Ok(()) => {
                    debug!(
                        "event=notes_save module=store status=ok document={document} count={} bytes={} attempt={}",
                        self.notes.len(),
                        blob.len(),
                        attempt + 1
                    );
                    return Ok(());
                }
                Err(err) if attempt < self.persist_retries => {
                    warn!(
                        "event=notes_save module=store status=retry document={document} attempt={} error={err}",
                        attempt + 1
                    );
                    attempt += 1;
                }
                Err(err) => {
                    error!(
                        "event=notes_save module=store status=error document={document} attempts={} error={err}",
                        attempt + 1
                    );
                    return Err(err.into());
                }
            }
        }
    }
}

fn drop_blank_rows(rows: &mut Vec<NoteCheck>) {
    rows.retain(|row| !row.is_blank());
    for row in rows.iter_mut() {
        drop_blank_rows(row.children_mut());
    }
}
