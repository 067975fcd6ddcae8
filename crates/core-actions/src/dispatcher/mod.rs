//! Dispatcher applying an `Action` to the editor state.
//!
//! Each action is first turned into a [`Command`] by one of the sub-modules:
//! * `motion` - cursor movement and scrolling
//! * `mode`   - entering and leaving insert and visual mode
//! * `edit`   - normal and insert mode text changes
//! * `visual` - operators over the active selection
//! * `search` - incremental search keystrokes
//! * `undo`   - undo / redo
//! * `file`   - saving and the document timeline
//!
//! The command then runs under a recording policy that decides whether it
//! closes an undo entry, replaces the last-action macro and is appended to
//! a user macro being recorded. What gets recorded is the command wrapped
//! together with its follow-up (scrolling, clearing the status), so a
//! replay behaves like the original keystroke.

use crate::Action;
use core_state::{Command, EditorState};
use tracing::{debug, trace};

mod edit;
mod file;
mod mode;
mod motion;
mod search;
mod undo;
mod visual;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// How a command is recorded once applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Recording {
    /// Checkpoint first, then scroll and clear the status. User macro only.
    Cursor,
    /// Like `Cursor`; `last_action` also makes it the action "repeat" replays.
    NormalOrVisual { last_action: bool },
    /// Scroll after, and extend both the last action and the user macro.
    Insert,
    /// User macro only.
    Search,
}

/// Apply an action to editor state. Returns `DispatchResult` describing
/// whether anything may have changed (`dirty`) or the caller should exit
/// (`quit`).
pub fn dispatch(state: &mut EditorState, action: &Action) -> DispatchResult {
    let mode = state.input_mode();
    if !action.accepts_mode(mode) {
        debug!(target: "actions.dispatch", ?action, %mode, "action_ignored_in_mode");
        return DispatchResult::clean();
    }

    if let Some(result) = dispatch_unrecorded(state, action) {
        return result;
    }

    let Some((command, recording)) = plan(state, action) else {
        trace!(target: "actions.dispatch", ?action, "action_no_op");
        return DispatchResult::clean();
    };
    apply_recorded(state, command, recording);
    DispatchResult::dirty()
}

// Actions applied directly, outside every macro.
fn dispatch_unrecorded(state: &mut EditorState, action: &Action) -> Option<DispatchResult> {
    let result = match action {
        Action::RepeatLastAction { count } => {
            state.replay_last_action_macro(*count);
            state.scroll_view_to_cursor();
            DispatchResult::dirty()
        }
        Action::ToggleMacroRecording => {
            state.toggle_user_macro_recording();
            DispatchResult::dirty()
        }
        Action::ReplayMacro { count } => {
            state.replay_recorded_user_macro(*count);
            state.scroll_view_to_cursor();
            DispatchResult::dirty()
        }
        Action::CancelTask => {
            state.cancel_task_if_running();
            DispatchResult::dirty()
        }
        Action::Resize { width, height } => {
            state.set_view_size(*width, *height);
            DispatchResult::dirty()
        }
        Action::SaveDocument | Action::OpenPrevDocument | Action::OpenNextDocument => {
            file::handle_file_action(action, state)
        }
        Action::Quit => DispatchResult::quit(),
        _ => return None,
    };
    trace!(target: "actions.dispatch", ?action, "unrecorded");
    Some(result)
}

// The command an action stands for, or `None` when it has nothing to do
// in the current state.
fn plan(state: &EditorState, action: &Action) -> Option<(Command, Recording)> {
    motion::command_for(state, action)
        .map(|c| (c, Recording::Cursor))
        .or_else(|| mode::command_for(action))
        .or_else(|| edit::command_for(action))
        .or_else(|| visual::command_for(state, action))
        .or_else(|| search::command_for(action))
        .or_else(|| undo::command_for(action))
}

pub(crate) fn apply_recorded(state: &mut EditorState, command: Command, recording: Recording) {
    match recording {
        Recording::Cursor | Recording::NormalOrVisual { .. } => {
            let wrapped = Command::Sequence(vec![
                command,
                Command::ScrollViewToCursor,
                Command::ClearStatus,
            ]);
            state.checkpoint_undo_log();
            wrapped.apply(state);
            if recording == (Recording::NormalOrVisual { last_action: true }) {
                state.clear_last_action_macro();
                state.add_to_last_action_macro(wrapped.clone());
            }
            state.add_to_recording_user_macro(wrapped);
        }
        Recording::Insert => {
            let wrapped = Command::Sequence(vec![command, Command::ScrollViewToCursor]);
            wrapped.apply(state);
            state.add_to_last_action_macro(wrapped.clone());
            state.add_to_recording_user_macro(wrapped);
        }
        Recording::Search => {
            command.apply(state);
            state.add_to_recording_user_macro(command);
        }
    }
}
