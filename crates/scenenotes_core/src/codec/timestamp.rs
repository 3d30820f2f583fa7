//! Timestamp wire format.

use super::{CodecError, CodecResult};
use chrono::{DateTime, NaiveDateTime, Utc};

/// `chrono` pattern for `YYYY-MM-DD HH:MM:SS.ffffff`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Formats a UTC timestamp with exactly six fractional digits.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a UTC timestamp in the fixed wire format.
///
/// Anything else (missing fraction, `T` separator, offsets) is rejected.
pub fn parse_timestamp(value: &str) -> CodecResult<DateTime<Utc>> {
    // `%.6f` also matches an absent fraction, so pin the layout first.
    if !has_wire_shape(value) {
        return Err(CodecError::Timestamp {
            value: value.to_string(),
        });
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| CodecError::Timestamp {
            value: value.to_string(),
        })
}

/// `YYYY-MM-DD HH:MM:SS.ffffff` is always 26 bytes with a dot at 19.
fn has_wire_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 26 && bytes[19] == b'.' && bytes[20..].iter().all(u8::is_ascii_digit)
}
