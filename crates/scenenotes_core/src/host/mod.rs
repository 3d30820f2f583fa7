//! Contracts with the host authoring application.
//!
//! # Responsibility
//! - Define the per-document metadata slot the note blob is stored in.
//! - Provide the clock used for default note timestamps.
//! - Deliver document lifecycle events to subscribed panels.
//!
//! # Invariants
//! - Each document owns exactly one blob slot.
//! - Lifecycle subscriptions are released when their handle is dropped.

pub mod clock;
pub mod events;
pub mod metadata;
pub mod sqlite;

pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{DocumentEvent, DocumentEvents, Subscription};
pub use metadata::{DocumentMetadata, MemoryDocumentStore, MetadataError, UNTITLED_DOCUMENT};
pub use sqlite::SqliteDocumentStore;
