//! Operation log backing undo and redo.
//!
//! Every primitive insert or delete appends an [`Op`] to a staged entry.
//! Entries are closed either by a checkpoint (inserted on mode transitions)
//! or by an explicit begin/commit pair wrapping a compound action. Explicit
//! pairs nest; only the outermost pair delimits an entry and checkpoints
//! are ignored while one is open.
//!
//! Undo applies the inverse of an entry's ops in reverse order, redo
//! re-applies them in order. Neither is logged again.

use crate::EditorState;
use crate::cursor::CursorState;
use core_text::locate;
use tracing::{error, trace, warn};

/// A single logged change. Each op carries the text it affected so it can
/// produce its own inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Insert { pos: usize, text: String },
    Delete { pos: usize, text: String },
}

impl Op {
    pub fn inverse(&self) -> Op {
        match self {
            Op::Insert { pos, text } => Op::Delete {
                pos: *pos,
                text: text.clone(),
            },
            Op::Delete { pos, text } => Op::Insert {
                pos: *pos,
                text: text.clone(),
            },
        }
    }
}

/// Ops undone together, with the cursor before and after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub ops: Vec<Op>,
    pub cursor_begin: usize,
    pub cursor_end: usize,
}

impl Entry {
    fn begin(cursor_pos: usize) -> Self {
        Self {
            ops: Vec::new(),
            cursor_begin: cursor_pos,
            cursor_end: cursor_pos,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UndoLog {
    entries: Vec<Entry>,
    /// Entries currently applied; entries past this index are redoable.
    undo_idx: usize,
    staged: Entry,
    explicit_depth: usize,
    /// `undo_idx` at the last save. `None` once that state is unreachable.
    save_point: Option<usize>,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            undo_idx: 0,
            staged: Entry::begin(0),
            explicit_depth: 0,
            save_point: Some(0),
        }
    }

    pub fn track_op(&mut self, op: Op) {
        self.staged.ops.push(op);
    }

    /// Close the staged entry and open a new one. Ignored inside an explicit
    /// entry.
    pub fn checkpoint(&mut self, cursor_pos: usize) {
        if self.explicit_depth > 0 {
            trace!(target: "state.undo", depth = self.explicit_depth, "checkpoint_ignored_in_entry");
            return;
        }
        self.commit_staged(cursor_pos);
    }

    pub fn begin_entry(&mut self, cursor_pos: usize) {
        if self.explicit_depth == 0 {
            self.commit_staged(cursor_pos);
        }
        self.explicit_depth += 1;
        trace!(target: "state.undo", depth = self.explicit_depth, "begin_entry");
    }

    pub fn commit_entry(&mut self, cursor_pos: usize) {
        if self.explicit_depth == 0 {
            warn!(target: "state.undo", "commit_without_begin");
            return;
        }
        self.explicit_depth -= 1;
        trace!(target: "state.undo", depth = self.explicit_depth, "commit_entry");
        if self.explicit_depth == 0 {
            self.commit_staged(cursor_pos);
        }
    }

    fn commit_staged(&mut self, cursor_pos: usize) {
        if self.staged.ops.is_empty() {
            self.staged = Entry::begin(cursor_pos);
            return;
        }
        if self.entries.len() > self.undo_idx {
            self.entries.truncate(self.undo_idx);
            trace!(target: "state.undo", kept = self.undo_idx, "redo_tail_discarded");
        }
        if self.save_point.is_some_and(|save| save > self.undo_idx) {
            self.save_point = None;
        }
        let mut entry = std::mem::replace(&mut self.staged, Entry::begin(cursor_pos));
        entry.cursor_end = cursor_pos;
        trace!(target: "state.undo", ops = entry.ops.len(), undo_depth = self.undo_idx + 1, "entry_committed");
        self.entries.push(entry);
        self.undo_idx += 1;
    }

    /// Inverse ops of the most recent applied entry, in application order,
    /// and the cursor to restore.
    ///
    /// Inside an explicit entry the ops staged so far are the most recent
    /// change, so they are reverted and dropped from the entry instead.
    pub fn undo(&mut self, cursor_pos: usize) -> Option<(Vec<Op>, usize)> {
        if self.explicit_depth > 0 && !self.staged.ops.is_empty() {
            let staged = std::mem::take(&mut self.staged.ops);
            let ops = staged.iter().rev().map(Op::inverse).collect();
            trace!(target: "state.undo", ops = staged.len(), depth = self.explicit_depth, "undo_staged");
            return Some((ops, self.staged.cursor_begin));
        }
        if self.explicit_depth == 0 {
            self.commit_staged(cursor_pos);
        }
        if self.undo_idx == 0 {
            return None;
        }
        self.undo_idx -= 1;
        let entry = &self.entries[self.undo_idx];
        let ops = entry.ops.iter().rev().map(Op::inverse).collect();
        trace!(target: "state.undo", undo_depth = self.undo_idx, redo_depth = self.redo_depth(), "undo_pop");
        Some((ops, entry.cursor_begin))
    }

    /// Ops of the next undone entry and the cursor after them. Pending ops
    /// are a newer change than anything undone, so they leave nothing to
    /// redo.
    pub fn redo(&mut self, cursor_pos: usize) -> Option<(Vec<Op>, usize)> {
        if !self.staged.ops.is_empty() {
            if self.explicit_depth == 0 {
                self.commit_staged(cursor_pos);
            }
            trace!(target: "state.undo", "redo_blocked_by_staged_ops");
            return None;
        }
        let entry = self.entries.get(self.undo_idx)?;
        let result = (entry.ops.clone(), entry.cursor_end);
        self.undo_idx += 1;
        trace!(target: "state.undo", undo_depth = self.undo_idx, redo_depth = self.redo_depth(), "redo_pop");
        Some(result)
    }

    /// Record the current state as saved. Pending ops are committed first
    /// unless an explicit entry is open.
    pub fn track_save(&mut self, cursor_pos: usize) {
        if self.explicit_depth == 0 {
            self.commit_staged(cursor_pos);
        }
        self.save_point = Some(self.undo_idx);
    }

    // After undo or redo moves the cursor, an empty staged entry should
    // start from where the cursor now is.
    pub(crate) fn rebase_staged(&mut self, cursor_pos: usize) {
        if self.staged.ops.is_empty() {
            self.staged = Entry::begin(cursor_pos);
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.save_point != Some(self.undo_idx) || !self.staged.ops.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_idx
    }

    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.undo_idx
    }

    pub fn in_explicit_entry(&self) -> bool {
        self.explicit_depth > 0
    }

    pub fn staged_ops(&self) -> &[Op] {
        &self.staged.ops
    }
}

impl EditorState {
    /// Close the current undo entry. Ignored while a user macro replays so
    /// the replay undoes as one unit.
    pub fn checkpoint_undo_log(&mut self) {
        if self.macros.is_replaying_user {
            return;
        }
        let cursor = self.buffer.cursor.position;
        self.buffer.undo_log.checkpoint(cursor);
    }

    pub fn begin_undo_entry(&mut self) {
        let cursor = self.buffer.cursor.position;
        self.buffer.undo_log.begin_entry(cursor);
    }

    pub fn commit_undo_entry(&mut self) {
        let cursor = self.buffer.cursor.position;
        self.buffer.undo_log.commit_entry(cursor);
    }

    pub fn undo(&mut self) {
        let cursor = self.buffer.cursor.position;
        let Some((ops, cursor_pos)) = self.buffer.undo_log.undo(cursor) else {
            return;
        };
        self.apply_logged_ops(&ops, cursor_pos, "undo");
    }

    pub fn redo(&mut self) {
        let cursor = self.buffer.cursor.position;
        let Some((ops, cursor_pos)) = self.buffer.undo_log.redo(cursor) else {
            return;
        };
        self.apply_logged_ops(&ops, cursor_pos, "redo");
    }

    /// Mark the document as saved, e.g. after the caller wrote it to disk.
    pub fn mark_saved(&mut self) {
        let cursor = self.buffer.cursor.position;
        self.buffer.undo_log.track_save(cursor);
    }

    fn apply_logged_ops(&mut self, ops: &[Op], cursor_pos: usize, kind: &'static str) {
        for op in ops {
            match op {
                Op::Insert { pos, text } => {
                    if let Err(e) = self.insert_text_at_position(text, *pos, false) {
                        // A logged op replays against the text it was recorded on.
                        error!(target: "state.undo", kind, pos = *pos, error = %e, "logged_op_failed");
                        debug_assert!(false, "{kind} insert failed at {pos}: {e}");
                    }
                }
                Op::Delete { pos, text } => {
                    let count = text.chars().count();
                    let removed = self.delete_chars(*pos, count, false);
                    if removed.chars().count() != count {
                        error!(target: "state.undo", kind, pos = *pos, expected = count, "logged_op_short_delete");
                        debug_assert!(false, "{kind} delete at {pos} removed fewer chars than logged");
                    }
                }
            }
        }
        let pos = locate::closest_char_on_line(&self.buffer.document, cursor_pos);
        self.buffer.cursor = CursorState::at(pos);
        self.buffer.undo_log.rebase_staged(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insert(pos: usize, text: &str) -> Op {
        Op::Insert {
            pos,
            text: text.to_string(),
        }
    }

    #[test]
    fn inverse_swaps_kind() {
        assert_eq!(
            insert(2, "ab").inverse(),
            Op::Delete {
                pos: 2,
                text: "ab".into()
            }
        );
        assert_eq!(insert(2, "ab").inverse().inverse(), insert(2, "ab"));
    }

    #[test]
    fn checkpoint_commits_non_empty_entries_only() {
        let mut log = UndoLog::new();
        log.checkpoint(0);
        assert_eq!(log.undo_depth(), 0);
        log.track_op(insert(0, "a"));
        log.checkpoint(1);
        assert_eq!(log.undo_depth(), 1);
        let (ops, cursor) = log.undo(1).unwrap();
        assert_eq!(ops, vec![insert(0, "a").inverse()]);
        assert_eq!(cursor, 0);
        assert!(log.undo(0).is_none());
    }

    #[test]
    fn undo_returns_ops_in_reverse() {
        let mut log = UndoLog::new();
        log.track_op(insert(0, "a"));
        log.track_op(insert(1, "b"));
        log.checkpoint(2);
        let (ops, _) = log.undo(2).unwrap();
        assert_eq!(ops, vec![insert(1, "b").inverse(), insert(0, "a").inverse()]);
        let (ops, cursor) = log.redo(2).unwrap();
        assert_eq!(ops, vec![insert(0, "a"), insert(1, "b")]);
        assert_eq!(cursor, 2);
        assert!(log.redo(2).is_none());
    }

    #[test]
    fn nested_entries_commit_once() {
        let mut log = UndoLog::new();
        log.begin_entry(0);
        log.track_op(insert(0, "a"));
        log.begin_entry(1);
        log.track_op(insert(1, "b"));
        log.checkpoint(2);
        log.commit_entry(2);
        assert_eq!(log.undo_depth(), 0);
        log.track_op(insert(2, "c"));
        log.commit_entry(3);
        assert_eq!(log.undo_depth(), 1);
        let (ops, cursor) = log.undo(3).unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn begin_flushes_pending_checkpoint_content() {
        let mut log = UndoLog::new();
        log.track_op(insert(0, "x"));
        log.begin_entry(1);
        log.track_op(insert(1, "y"));
        log.commit_entry(2);
        assert_eq!(log.undo_depth(), 2);
    }

    #[test]
    fn new_ops_discard_redo_tail() {
        let mut log = UndoLog::new();
        log.track_op(insert(0, "a"));
        log.checkpoint(1);
        log.track_op(insert(1, "b"));
        log.checkpoint(2);
        log.undo(2).unwrap();
        assert_eq!(log.redo_depth(), 1);
        log.track_op(insert(1, "c"));
        log.checkpoint(2);
        assert_eq!(log.redo_depth(), 0);
        assert_eq!(log.undo_depth(), 2);
    }

    #[test]
    fn save_point_tracking() {
        let mut log = UndoLog::new();
        assert!(!log.has_unsaved_changes());
        log.track_op(insert(0, "a"));
        assert!(log.has_unsaved_changes());
        log.track_save(1);
        assert!(!log.has_unsaved_changes());
        log.undo(1).unwrap();
        assert!(log.has_unsaved_changes());
        log.redo(2).unwrap();
        assert!(!log.has_unsaved_changes());
    }

    #[test]
    fn save_point_in_discarded_tail_is_lost() {
        let mut log = UndoLog::new();
        log.track_op(insert(0, "a"));
        log.track_save(1);
        log.undo(1).unwrap();
        log.track_op(insert(0, "b"));
        log.checkpoint(1);
        log.undo(1).unwrap();
        // Back at the empty document, but the saved text is unreachable.
        assert!(log.has_unsaved_changes());
        log.redo(2).unwrap();
        assert!(log.has_unsaved_changes());
    }

    #[test]
    fn undo_inside_entry_reverts_staged_ops_only() {
        let mut log = UndoLog::new();
        log.track_op(insert(0, "a"));
        log.checkpoint(1);
        log.begin_entry(1);
        log.track_op(insert(1, "b"));
        let (ops, cursor) = log.undo(2).unwrap();
        assert_eq!(ops, vec![insert(1, "b").inverse()]);
        assert_eq!(cursor, 1);
        assert!(log.staged_ops().is_empty());
        log.commit_entry(1);
        assert_eq!(log.undo_depth(), 1);
        assert_eq!(log.redo_depth(), 0);
    }

    #[test]
    fn pending_ops_leave_nothing_to_redo() {
        let mut log = UndoLog::new();
        log.track_op(insert(0, "a"));
        log.checkpoint(1);
        log.track_op(insert(1, "b"));
        log.checkpoint(2);
        log.undo(2).unwrap();
        log.track_op(insert(0, "X"));
        assert!(log.redo(1).is_none());
        assert_eq!(log.redo_depth(), 0);
        assert_eq!(log.undo_depth(), 2);
    }

    #[test]
    fn stray_commit_is_ignored() {
        let mut log = UndoLog::new();
        log.commit_entry(0);
        assert!(!log.in_explicit_entry());
        log.track_op(insert(0, "a"));
        log.checkpoint(1);
        assert_eq!(log.undo_depth(), 1);
    }
}
