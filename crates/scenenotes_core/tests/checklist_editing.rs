use chrono::{TimeZone, Utc};
use scenenotes_core::{
    ChecklistEdit, FixedClock, MemoryDocumentStore, NoteId, NoteService, NoteStore, PanelConfig,
};

fn service() -> NoteService<MemoryDocumentStore> {
    NoteService::new(MemoryDocumentStore::new(), PanelConfig::default())
        .with_clock(FixedClock(Utc.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap()))
}

fn row_texts(svc: &NoteService<MemoryDocumentStore>, id: NoteId) -> Vec<String> {
    svc.note(id)
        .unwrap()
        .checklist
        .iter()
        .map(|row| row.text.clone())
        .collect()
}

fn persisted(svc: &NoteService<MemoryDocumentStore>) -> NoteStore {
    let mut store = NoteStore::new();
    store.load(svc.metadata());
    store
}

#[test]
fn typing_a_list_keeps_one_open_slot_and_persists_filled_rows() {
    let mut svc = service();
    let id = svc.create_note(None);

    for (n, item) in ["rough layout", "camera pass", "lighting"].iter().enumerate() {
        let slot = svc.note(id).unwrap().checklist.len() - 1;
        assert_eq!(slot, n);
        svc.check_focus_gained(id, slot).unwrap();
        assert_eq!(
            svc.check_text_changed(id, slot, *item).unwrap(),
            ChecklistEdit::Grew
        );
    }

    assert_eq!(
        row_texts(&svc, id),
        vec!["rough layout", "camera pass", "lighting", ""]
    );
    let saved = persisted(&svc);
    assert_eq!(saved.notes()[0].checklist.len(), 3);
    assert!(saved.notes()[0].has_checklist());
}

#[test]
fn clearing_and_leaving_a_row_prunes_it_everywhere() {
    let mut svc = service();
    let id = svc.create_note(None);
    svc.check_text_changed(id, 0, "a").unwrap();
    svc.check_text_changed(id, 1, "b").unwrap();
    svc.check_text_changed(id, 2, "c").unwrap();

    svc.check_focus_gained(id, 0).unwrap();
    assert_eq!(
        svc.check_text_changed(id, 0, "").unwrap(),
        ChecklistEdit::Updated
    );
    assert_eq!(
        svc.check_focus_lost(id, 0).unwrap(),
        ChecklistEdit::Pruned { index: 0 }
    );

    assert_eq!(row_texts(&svc, id), vec!["b", "c", ""]);
    let saved: Vec<String> = persisted(&svc).notes()[0]
        .checklist
        .iter()
        .map(|row| row.text.clone())
        .collect();
    assert_eq!(saved, vec!["b", "c"]);
}

#[test]
fn backspacing_last_item_merges_into_open_slot() {
    let mut svc = service();
    let id = svc.create_note(None);
    svc.check_text_changed(id, 0, "a").unwrap();
    svc.check_text_changed(id, 1, "b").unwrap();

    assert_eq!(
        svc.check_text_changed(id, 1, "").unwrap(),
        ChecklistEdit::Pruned { index: 2 }
    );
    assert_eq!(row_texts(&svc, id), vec!["a", ""]);
}

#[test]
fn toggling_rows_persists_check_state() {
    let mut svc = service();
    let id = svc.create_note(None);
    svc.check_text_changed(id, 0, "render").unwrap();
    svc.set_check_checked(id, 0, true).unwrap();

    let saved = persisted(&svc);
    assert!(saved.notes()[0].checklist[0].is_checked());
}

#[test]
fn emptying_checklist_reseeds_and_hides_section() {
    let mut svc = service();
    let id = svc.create_note(None);

    assert_eq!(svc.remove_check(id, 0).unwrap(), ChecklistEdit::Emptied);
    let note = svc.note(id).unwrap();
    assert_eq!(note.checklist.len(), 1);
    assert!(note.checklist[0].is_blank());
    assert!(!note.has_checklist());
}

#[test]
fn loaded_checklists_get_an_open_slot() {
    let mut svc = service();
    let id = svc.create_note(None);
    svc.check_text_changed(id, 0, "from disk").unwrap();

    svc.load();
    let note = &svc.store().notes()[0];
    let texts: Vec<&str> = note.checklist.iter().map(|row| row.text.as_str()).collect();
    assert_eq!(texts, vec!["from disk", ""]);
}
