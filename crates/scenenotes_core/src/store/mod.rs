//! Per-document note collection and its persistence.
//!
//! # Responsibility
//! - Own every `Note` loaded for the current document, in display order.
//! - Load from and save to the host metadata slot through the codec.
//!
//! # Invariants
//! - Insertion order is display order; pinning does not reorder.
//! - A corrupt or missing blob loads as an empty store, never an error.
//! - Empty checklist rows never reach the persisted blob.

pub mod note_store;

pub use note_store::{NoteStore, StoreError, StoreResult, DEFAULT_PERSIST_RETRIES};
