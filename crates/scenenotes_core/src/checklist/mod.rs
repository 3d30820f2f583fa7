//! Checklist editing engine.
//!
//! # Responsibility
//! - Grow the checklist when the trailing open slot receives text.
//! - Prune abandoned empty rows when they lose focus.
//!
//! # Invariants
//! - The checklist always has at least one row.
//! - The last row is the empty open slot.
//! - Rows are edited in the note's own `checklist` vector, so the visible rows
//!   and the model rows never differ in length or order.

pub mod editor;

pub use editor::{ChecklistEdit, ChecklistEditor};
