//! Persisted blob codec.
//!
//! # Responsibility
//! - Convert notes and checklist rows to and from the document blob format.
//! - Own the timestamp wire format.
//!
//! # Invariants
//! - Empty-text checklist rows are never written.
//! - `children` is written only for group headers.
//! - Timestamps use `YYYY-MM-DD HH:MM:SS.ffffff` in UTC.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod blob;
pub mod timestamp;

pub use blob::{
    deserialize_check, deserialize_note, deserialize_notes, serialize_check, serialize_note,
    serialize_notes,
};
pub use timestamp::{format_timestamp, parse_timestamp, TIMESTAMP_FORMAT};

pub type CodecResult<T> = Result<T, CodecError>;

/// Decode/encode failure for persisted note data.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    /// `created_date` does not match the fixed wire format.
    Timestamp { value: String },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid note json: {err}"),
            Self::Timestamp { value } => write!(
                f,
                "invalid timestamp `{value}`; expected `YYYY-MM-DD HH:MM:SS.ffffff`"
            ),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Timestamp { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
