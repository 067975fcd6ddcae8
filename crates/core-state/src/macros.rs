//! Last-action and user macros.
//!
//! Both macros hold [`Command`] values rather than closures so a recording
//! can be inspected, serialized and replayed against whatever the buffer
//! looks like at replay time. Each replay is one undo entry.

use crate::EditorState;
use crate::command::Command;
use crate::status::{StatusMsg, StatusStyle};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub(crate) struct MacroState {
    last_actions: Vec<Command>,
    is_recording_user: bool,
    user_actions: Vec<Command>,
    staged_user_actions: Vec<Command>,
    pub(crate) is_replaying_user: bool,
    pub(crate) is_replaying_last: bool,
}

impl EditorState {
    pub fn add_to_last_action_macro(&mut self, command: Command) {
        self.macros.last_actions.push(command);
    }

    pub fn clear_last_action_macro(&mut self) {
        self.macros.last_actions.clear();
    }

    pub fn last_action_macro(&self) -> &[Command] {
        &self.macros.last_actions
    }

    /// Repeat the last action `count` times as a single undo entry.
    pub fn replay_last_action_macro(&mut self, count: usize) {
        if self.macros.is_recording_user {
            self.set_status_msg(StatusMsg::error(
                "Cannot repeat the last action while recording a macro",
            ));
            return;
        }
        // Replayed commands may rewrite the macro they come from.
        let actions = self.macros.last_actions.clone();
        debug!(target: "state.macro", actions = actions.len(), count, "replay_last_action");
        self.begin_undo_entry();
        self.macros.is_replaying_last = true;
        for _ in 0..count.max(1) {
            for command in &actions {
                command.apply(self);
            }
        }
        self.macros.is_replaying_last = false;
        self.commit_undo_entry();
    }

    pub fn is_recording_user_macro(&self) -> bool {
        self.macros.is_recording_user
    }

    pub fn toggle_user_macro_recording(&mut self) {
        let macros = &mut self.macros;
        if !macros.is_recording_user {
            macros.is_recording_user = true;
            macros.staged_user_actions.clear();
            debug!(target: "state.macro", "user_recording_started");
            self.set_status_msg(StatusMsg::success("Started recording macro"));
            return;
        }
        macros.is_recording_user = false;
        if macros.staged_user_actions.is_empty() {
            // The previously recorded macro stays replayable.
            self.set_status_msg(StatusMsg::success("Cancelled macro recording"));
            return;
        }
        macros.user_actions = std::mem::take(&mut macros.staged_user_actions);
        debug!(target: "state.macro", actions = macros.user_actions.len(), "user_recording_finished");
        self.set_status_msg(StatusMsg::success("Recorded macro"));
    }

    /// Append to the macro being recorded; ignored when not recording.
    pub fn add_to_recording_user_macro(&mut self, command: Command) {
        if self.macros.is_recording_user {
            self.macros.staged_user_actions.push(command);
        }
    }

    pub fn replay_recorded_user_macro(&mut self, count: usize) {
        let macros = &self.macros;
        let rejection = if macros.is_recording_user {
            Some("Cannot replay a macro while recording a macro")
        } else if macros.is_replaying_user {
            Some("Cannot replay a macro while replaying a macro")
        } else if macros.user_actions.is_empty() {
            Some("No macro has been recorded")
        } else {
            None
        };
        if let Some(text) = rejection {
            warn!(target: "state.macro", reason = text, "user_replay_rejected");
            self.set_status_msg(StatusMsg::error(text));
            return;
        }

        let actions = macros.user_actions.clone();
        debug!(target: "state.macro", actions = actions.len(), count, "replay_user_macro");
        self.begin_undo_entry();
        self.macros.is_replaying_user = true;
        for _ in 0..count.max(1) {
            for command in &actions {
                command.apply(self);
            }
        }
        self.macros.is_replaying_user = false;
        self.commit_undo_entry();

        self.clear_last_action_macro();
        self.add_to_last_action_macro(Command::ReplayRecordedUserMacro { count });

        // A rejection raised inside the replay stays visible.
        let failed = self
            .status
            .as_ref()
            .is_some_and(|s| s.style == StatusStyle::Error);
        if !failed {
            self.set_status_msg(StatusMsg::success("Replayed macro"));
        }
    }
}
