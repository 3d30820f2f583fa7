//! Note domain model.
//!
//! # Responsibility
//! - Define the note and checklist records owned by a document's note store.
//! - Keep derived state (group check, checklist presence) computed on read.
//!
//! # Invariants
//! - A `Note` exclusively owns its checklist tree; no shared ownership.
//! - Constructing a `Note` never registers it anywhere.

pub mod check;
pub mod note;
