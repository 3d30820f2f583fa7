//! Note search and visibility filtering.
//!
//! # Responsibility
//! - Decide per-note visibility for the panel's search box.
//! - Keep filtering pure: the note store is never mutated.

pub mod filter;

pub use filter::{matches, NoteVisibility, VisibilityFilter};
