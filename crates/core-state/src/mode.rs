//! Input modes and the side effects of switching between them.

use crate::EditorState;
use crate::selection::SelectionMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
    Visual,
    Search,
    /// A background task owns the editor until it finishes or is cancelled.
    Task,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputMode::Normal => "normal",
            InputMode::Insert => "insert",
            InputMode::Visual => "visual",
            InputMode::Search => "search",
            InputMode::Task => "task",
        })
    }
}

impl EditorState {
    /// Switch modes.
    ///
    /// Returning to normal mode checkpoints the undo log, so an insert run
    /// undoes separately from whatever follows it. Leaving visual mode drops
    /// the selection unless the target is search. Entering insert, visual
    /// or search clears the status message.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        let prev = self.input_mode;
        if prev == mode {
            return;
        }
        if mode == InputMode::Normal {
            self.checkpoint_undo_log();
        }
        if prev == InputMode::Visual && matches!(mode, InputMode::Normal | InputMode::Insert) {
            self.buffer.selector.clear();
        }
        if matches!(mode, InputMode::Insert | InputMode::Visual | InputMode::Search) {
            self.status = None;
        }
        trace!(target: "state.mode", from = %prev, to = %mode, "input_mode_changed");
        self.input_mode = mode;
    }

    /// Enter visual mode with a new selection, switch the kind of an active
    /// selection, or leave visual mode when the kind is already active.
    pub fn toggle_visual_mode(&mut self, selection_mode: SelectionMode) {
        let cursor = self.buffer.cursor.position;
        let selector = &mut self.buffer.selector;
        if selector.mode() == selection_mode {
            self.set_input_mode(InputMode::Normal);
        } else if selector.mode() == SelectionMode::None {
            selector.start(selection_mode, cursor);
            self.set_input_mode(InputMode::Visual);
        } else {
            selector.set_mode(selection_mode);
        }
    }

    // Task bookkeeping bypasses the transition side effects.
    pub(crate) fn set_input_mode_raw(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }
}
