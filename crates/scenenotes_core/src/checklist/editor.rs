//! Row-level state machine driven by text, focus and checkbox events.

use crate::model::check::NoteCheck;
use log::debug;

/// Result of one editing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistEdit {
    /// A row changed in place.
    Updated,
    /// The open slot received text and a new open slot was appended.
    Grew,
    /// The row at `index` was removed.
    Pruned { index: usize },
    /// The only row was removed and a fresh open slot was seeded.
    Emptied,
    /// Event did not change anything.
    Ignored,
}

impl ChecklistEdit {
    /// Whether the owning note must be persisted.
    pub fn is_mutation(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Focus bookkeeping for one note's checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistEditor {
    focused: Option<usize>,
}

impl ChecklistEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row that currently holds input focus.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Normalizes a freshly loaded checklist so it ends in one open slot.
    pub fn attach(&mut self, rows: &mut Vec<NoteCheck>) -> ChecklistEdit {
        self.focused = None;
        let edit = if rows.last().map_or(true, |row| !row.is_blank()) {
            rows.push(NoteCheck::open_slot());
            ChecklistEdit::Grew
        } else {
            ChecklistEdit::Ignored
        };
        assert_invariants(rows);
        edit
    }

    pub fn focus_gained(&mut self, rows: &[NoteCheck], index: usize) -> ChecklistEdit {
        if index >= rows.len() {
            return ChecklistEdit::Ignored;
        }
        self.focused = Some(index);
        ChecklistEdit::Ignored
    }

    /// Applies new text to row `index`.
    ///
    /// - Filling the open slot appends a new open slot.
    /// - Clearing the row just above the open slot collapses the two trailing
    ///   empty rows into one. The same applies to any cleared row whose next
    ///   row is empty, as long as the row before the open slot is empty too.
    pub fn text_changed(
        &mut self,
        rows: &mut Vec<NoteCheck>,
        index: usize,
        text: impl Into<String>,
    ) -> ChecklistEdit {
        let len = rows.len();
        if index >= len {
            return ChecklistEdit::Ignored;
        }
        rows[index].text = text.into();
        let last = len - 1;

        let edit = if index == last {
            if rows[index].is_blank() {
                ChecklistEdit::Updated
            } else {
                rows.push(NoteCheck::open_slot());
                debug!("event=checklist_grow module=checklist rows={}", rows.len());
                ChecklistEdit::Grew
            }
        } else if rows[index].is_blank() && rows[index + 1].is_blank() && rows[last - 1].is_blank()
        {
            self.remove_at(rows, last)
        } else {
            ChecklistEdit::Updated
        };

        assert_invariants(rows);
        edit
    }

    /// Handles row `index` losing focus.
    ///
    /// An empty row other than the open slot is removed.
    pub fn focus_lost(&mut self, rows: &mut Vec<NoteCheck>, index: usize) -> ChecklistEdit {
        let len = rows.len();
        if index >= len {
            return ChecklistEdit::Ignored;
        }
        if self.focused == Some(index) {
            self.focused = None;
        }

        let edit = if rows[index].is_blank() && index != len - 1 {
            self.remove_at(rows, index)
        } else {
            ChecklistEdit::Ignored
        };

        assert_invariants(rows);
        edit
    }

    /// Sets the check state of row `index`.
    pub fn set_checked(
        &mut self,
        rows: &mut [NoteCheck],
        index: usize,
        checked: bool,
    ) -> ChecklistEdit {
        match rows.get_mut(index) {
            Some(row) => {
                row.set_checked(checked);
                ChecklistEdit::Updated
            }
            None => ChecklistEdit::Ignored,
        }
    }

    /// Deletes row `index` on explicit user request.
    ///
    /// The open slot cannot be deleted while other rows exist. Deleting the
    /// only row re-seeds a fresh open slot and reports [`ChecklistEdit::Emptied`].
    pub fn remove_row(&mut self, rows: &mut Vec<NoteCheck>, index: usize) -> ChecklistEdit {
        let len = rows.len();
        if index >= len || (index == len - 1 && len > 1) {
            return ChecklistEdit::Ignored;
        }
        let edit = self.remove_at(rows, index);
        assert_invariants(rows);
        edit
    }

    fn remove_at(&mut self, rows: &mut Vec<NoteCheck>, index: usize) -> ChecklistEdit {
        rows.remove(index);
        self.focused = match self.focused {
            Some(focused) if focused == index => None,
            Some(focused) if focused > index => Some(focused - 1),
            other => other,
        };

        if rows.is_empty() {
            rows.push(NoteCheck::open_slot());
            debug!("event=checklist_emptied module=checklist");
            return ChecklistEdit::Emptied;
        }
        debug!(
            "event=checklist_prune module=checklist index={index} rows={}",
            rows.len()
        );
        ChecklistEdit::Pruned { index }
    }
}

fn assert_invariants(rows: &[NoteCheck]) {
    debug_assert!(!rows.is_empty(), "checklist must keep at least one row");
    debug_assert!(
        rows.last().is_some_and(NoteCheck::is_blank),
        "checklist must end with an empty open slot"
    );
}

#[cfg(test)]
mod tests {
    use super::{ChecklistEdit, ChecklistEditor};
    use crate::model::check::NoteCheck;

    fn texts(rows: &[NoteCheck]) -> Vec<&str> {
        rows.iter().map(|row| row.text.as_str()).collect()
    }

    fn seeded() -> (ChecklistEditor, Vec<NoteCheck>) {
        let mut editor = ChecklistEditor::new();
        let mut rows = Vec::new();
        assert_eq!(editor.attach(&mut rows), ChecklistEdit::Grew);
        (editor, rows)
    }

    #[test]
    fn attach_appends_open_slot_after_loaded_rows() {
        let mut editor = ChecklistEditor::new();
        let mut rows = vec![NoteCheck::new("a"), NoteCheck::new("b")];
        assert_eq!(editor.attach(&mut rows), ChecklistEdit::Grew);
        assert_eq!(texts(&rows), vec!["a", "b", ""]);

        assert_eq!(editor.attach(&mut rows), ChecklistEdit::Ignored);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn typing_into_successive_open_slots_keeps_one_trailing_slot() {
        let (mut editor, mut rows) = seeded();
        for n in 1..=6 {
            let slot = rows.len() - 1;
            let edit = editor.text_changed(&mut rows, slot, format!("item {n}"));
            assert_eq!(edit, ChecklistEdit::Grew);
            assert_eq!(rows.len(), n + 1);
            assert!(rows[..n].iter().all(|row| !row.is_blank()));
            assert!(rows[n].is_blank());
        }
    }

    #[test]
    fn further_typing_in_filled_row_does_not_grow() {
        let (mut editor, mut rows) = seeded();
        editor.text_changed(&mut rows, 0, "b");
        assert_eq!(editor.text_changed(&mut rows, 0, "bu"), ChecklistEdit::Updated);
        assert_eq!(texts(&rows), vec!["bu", ""]);
    }

    #[test]
    fn clearing_row_above_open_slot_collapses_trailing_empties() {
        let (mut editor, mut rows) = seeded();
        editor.text_changed(&mut rows, 0, "a");
        editor.text_changed(&mut rows, 1, "b");
        assert_eq!(texts(&rows), vec!["a", "b", ""]);

        let edit = editor.text_changed(&mut rows, 1, "");
        assert_eq!(edit, ChecklistEdit::Pruned { index: 2 });
        assert_eq!(texts(&rows), vec!["a", ""]);
    }

    #[test]
    fn adjacent_empty_rows_far_from_open_slot_wait_for_focus_loss() {
        let mut editor = ChecklistEditor::new();
        let mut rows = vec![NoteCheck::new("a"), NoteCheck::new("x"), NoteCheck::new("b")];
        editor.attach(&mut rows);
        assert_eq!(editor.text_changed(&mut rows, 1, ""), ChecklistEdit::Updated);
        assert_eq!(texts(&rows), vec!["a", "", "b", ""]);

        assert_eq!(editor.text_changed(&mut rows, 0, ""), ChecklistEdit::Updated);
        assert_eq!(texts(&rows), vec!["", "", "b", ""]);

        assert_eq!(
            editor.focus_lost(&mut rows, 1),
            ChecklistEdit::Pruned { index: 1 }
        );
        assert_eq!(
            editor.focus_lost(&mut rows, 0),
            ChecklistEdit::Pruned { index: 0 }
        );
        assert_eq!(texts(&rows), vec!["b", ""]);
    }

    #[test]
    fn clearing_mid_row_keeps_it_until_focus_is_lost() {
        let mut editor = ChecklistEditor::new();
        let mut rows = vec![NoteCheck::new("a"), NoteCheck::new("b")];
        editor.attach(&mut rows);
        editor.focus_gained(&rows, 0);

        assert_eq!(editor.text_changed(&mut rows, 0, ""), ChecklistEdit::Updated);
        assert_eq!(texts(&rows), vec!["", "b", ""]);

        assert_eq!(
            editor.focus_lost(&mut rows, 0),
            ChecklistEdit::Pruned { index: 0 }
        );
        assert_eq!(texts(&rows), vec!["b", ""]);
        assert_eq!(editor.focused(), None);
    }

    #[test]
    fn sole_empty_row_survives_focus_loss() {
        let (mut editor, mut rows) = seeded();
        editor.focus_gained(&rows, 0);
        assert_eq!(editor.focus_lost(&mut rows, 0), ChecklistEdit::Ignored);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_blank());
    }

    #[test]
    fn open_slot_survives_focus_loss_with_rows_above() {
        let (mut editor, mut rows) = seeded();
        editor.text_changed(&mut rows, 0, "a");
        assert_eq!(editor.focus_lost(&mut rows, 1), ChecklistEdit::Ignored);
        assert_eq!(texts(&rows), vec!["a", ""]);
    }

    #[test]
    fn filled_row_survives_focus_loss() {
        let (mut editor, mut rows) = seeded();
        editor.text_changed(&mut rows, 0, "keep");
        assert_eq!(editor.focus_lost(&mut rows, 0), ChecklistEdit::Ignored);
        assert_eq!(texts(&rows), vec!["keep", ""]);
    }

    #[test]
    fn removing_only_row_reseeds_and_reports_emptied_once() {
        let (mut editor, mut rows) = seeded();
        let edit = editor.remove_row(&mut rows, 0);
        assert_eq!(edit, ChecklistEdit::Emptied);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_blank());
    }

    #[test]
    fn open_slot_cannot_be_removed_while_rows_exist() {
        let (mut editor, mut rows) = seeded();
        editor.text_changed(&mut rows, 0, "a");
        assert_eq!(editor.remove_row(&mut rows, 1), ChecklistEdit::Ignored);
        assert_eq!(
            editor.remove_row(&mut rows, 0),
            ChecklistEdit::Pruned { index: 0 }
        );
        assert_eq!(texts(&rows), vec![""]);
    }

    #[test]
    fn focus_index_follows_removed_rows() {
        let mut editor = ChecklistEditor::new();
        let mut rows = vec![NoteCheck::new("a"), NoteCheck::new("b"), NoteCheck::new("c")];
        editor.attach(&mut rows);
        editor.focus_gained(&rows, 2);

        editor.remove_row(&mut rows, 0);
        assert_eq!(editor.focused(), Some(1));
        assert_eq!(rows[1].text, "c");
    }

    #[test]
    fn set_checked_updates_row() {
        let (mut editor, mut rows) = seeded();
        editor.text_changed(&mut rows, 0, "a");
        assert_eq!(editor.set_checked(&mut rows, 0, true), ChecklistEdit::Updated);
        assert!(rows[0].is_checked());
        assert_eq!(editor.set_checked(&mut rows, 9, true), ChecklistEdit::Ignored);
    }

    #[test]
    fn out_of_range_events_are_ignored() {
        let (mut editor, mut rows) = seeded();
        assert_eq!(editor.text_changed(&mut rows, 5, "x"), ChecklistEdit::Ignored);
        assert_eq!(editor.focus_lost(&mut rows, 5), ChecklistEdit::Ignored);
        assert_eq!(editor.remove_row(&mut rows, 5), ChecklistEdit::Ignored);
        assert_eq!(rows.len(), 1);
    }
}
