//! Double-encoded JSON blob codec.
//!
//! The outer blob is a JSON array of strings; every string is itself a JSON
//! document for one note. Checklist rows are nested the same way.

use super::timestamp::{format_timestamp, parse_timestamp};
use super::CodecResult;
use crate::model::check::NoteCheck;
use crate::model::note::Note;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct NoteWire {
    title: String,
    text: String,
    created_date: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    checklist: Vec<String>,
    #[serde(default)]
    linked_objects: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    archived: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct CheckWire {
    checked: bool,
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Encodes one checklist row, recursing into children when present.
///
/// Empty-text children are skipped like top-level rows.
pub fn serialize_check(check: &NoteCheck) -> CodecResult<String> {
    let wire = CheckWire {
        checked: check.stored_checked(),
        text: check.text.clone(),
        children: serialize_rows(check.children())?,
    };
    Ok(serde_json::to_string(&wire)?)
}

/// Decodes one checklist row.
pub fn deserialize_check(raw: &str) -> CodecResult<NoteCheck> {
    let wire: CheckWire = serde_json::from_str(raw)?;
    let children = wire
        .children
        .iter()
        .map(|child| deserialize_check(child))
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(NoteCheck::from_parts(wire.text, wire.checked, children))
}

/// Encodes one note.
///
/// `linked_objects` is always written as an empty list.
pub fn serialize_note(note: &Note) -> CodecResult<String> {
    let wire = NoteWire {
        title: note.title.clone(),
        text: note.text.clone(),
        created_date: format_timestamp(&note.created_date),
        author: note.author.clone(),
        pinned: note.pinned,
        checklist: serialize_rows(&note.checklist)?,
        linked_objects: Vec::new(),
        archived: note.archived,
    };
    Ok(serde_json::to_string(&wire)?)
}

/// Decodes one note with a fresh in-memory identity.
pub fn deserialize_note(raw: &str) -> CodecResult<Note> {
    let wire: NoteWire = serde_json::from_str(raw)?;
    let created_date = parse_timestamp(&wire.created_date)?;
    let checklist = wire
        .checklist
        .iter()
        .map(|row| deserialize_check(row))
        .collect::<CodecResult<Vec<_>>>()?;

    let mut note = Note::new(created_date)
        .with_title(wire.title)
        .with_text(wire.text)
        .with_author(wire.author);
    note.checklist = checklist;
    note.linked_objects = wire.linked_objects;
    note.pinned = wire.pinned;
    note.archived = wire.archived;
    Ok(note)
}

/// Encodes a whole collection into the persisted blob.
pub fn serialize_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> CodecResult<String> {
    let encoded = notes
        .into_iter()
        .map(serialize_note)
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(serde_json::to_string(&encoded)?)
}

/// Decodes a persisted blob. Any malformed entry fails the whole blob.
pub fn deserialize_notes(blob: &str) -> CodecResult<Vec<Note>> {
    let encoded: Vec<String> = serde_json::from_str(blob)?;
    encoded.iter().map(|raw| deserialize_note(raw)).collect()
}

fn serialize_rows(rows: &[NoteCheck]) -> CodecResult<Vec<String>> {
    rows.iter()
        .filter(|row| !row.is_blank())
        .map(serialize_check)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::Value;

    fn sample_note() -> Note {
        let created = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_micro_opt(10, 20, 30, 123_456)
            .unwrap()
            .and_utc();
        let mut note = Note::new(created)
            .with_title("Blocking pass")
            .with_text("Fix the hand pose on frame 40")
            .with_author("anim");
        note.pinned = true;
        note.add_check(NoteCheck::with_checked("Singleton", true));
        note.add_check(
            NoteCheck::new("Group")
                .with_child(NoteCheck::with_checked("child a", true))
                .with_child(NoteCheck::new("child b")),
        );
        note
    }

    #[test]
    fn note_round_trips_every_persisted_field() {
        let original = sample_note();
        let decoded = deserialize_note(&serialize_note(&original).unwrap()).unwrap();

        assert_eq!(decoded.title, original.title);
        assert_eq!(decoded.text, original.text);
        assert_eq!(decoded.author, original.author);
        assert_eq!(decoded.pinned, original.pinned);
        assert_eq!(decoded.created_date, original.created_date);
        assert_eq!(decoded.checklist, original.checklist);
        assert_ne!(decoded.id(), original.id());
    }

    #[test]
    fn empty_rows_are_dropped_on_serialize() {
        let mut note = Note::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        note.checklist = vec![NoteCheck::new("a"), NoteCheck::new(""), NoteCheck::new("b")];

        let value: Value = serde_json::from_str(&serialize_note(&note).unwrap()).unwrap();
        let rows = value["checklist"].as_array().unwrap();
        assert_eq!(rows.len(), 2);

        let texts: Vec<String> = rows
            .iter()
            .map(|row| deserialize_check(row.as_str().unwrap()).unwrap().text)
            .collect();
        assert_eq!(texts, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn check_writes_children_only_for_groups() {
        let leaf: Value = serde_json::from_str(&serialize_check(&NoteCheck::new("leaf")).unwrap())
            .unwrap();
        assert!(leaf.get("children").is_none());
        assert_eq!(leaf["checked"], false);
        assert_eq!(leaf["text"], "leaf");

        let group = NoteCheck::new("g").with_child(NoteCheck::with_checked("c", true));
        let value: Value = serde_json::from_str(&serialize_check(&group).unwrap()).unwrap();
        let children = value["children"].as_array().unwrap();
        assert_eq!(children.len(), 1);
        assert!(children[0].is_string());
    }

    #[test]
    fn note_wire_shape_matches_blob_contract() {
        let value: Value = serde_json::from_str(&serialize_note(&sample_note()).unwrap()).unwrap();
        assert_eq!(value["created_date"], "2024-03-05 10:20:30.123456");
        assert_eq!(value["pinned"], true);
        assert_eq!(value["linked_objects"], serde_json::json!([]));
        assert!(value.get("archived").is_none());
        assert!(value["checklist"][0].is_string());
    }

    #[test]
    fn archived_flag_round_trips() {
        let mut note = sample_note();
        note.archived = true;
        let raw = serialize_note(&note).unwrap();
        assert!(raw.contains("\"archived\":true"));
        assert!(deserialize_note(&raw).unwrap().archived);
    }

    #[test]
    fn collection_is_double_encoded() {
        let blob = serialize_notes([&sample_note(), &sample_note()]).unwrap();
        let outer: Vec<String> = serde_json::from_str(&blob).unwrap();
        assert_eq!(outer.len(), 2);

        let decoded = deserialize_notes(&blob).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].title, "Blocking pass");
    }

    #[test]
    fn bad_timestamp_fails_decode() {
        let raw = r#"{"title":"t","text":"","created_date":"32m ago","author":"","pinned":false,"checklist":[],"linked_objects":[]}"#;
        let err = deserialize_note(raw).unwrap_err();
        assert!(matches!(err, CodecError::Timestamp { .. }));
    }

    #[test]
    fn non_json_blob_fails_decode() {
        assert!(matches!(
            deserialize_notes("not json").unwrap_err(),
            CodecError::Json(_)
        ));
        assert!(deserialize_notes("[\"{broken\"]").is_err());
    }
}
