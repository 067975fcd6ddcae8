mod common;
use common::*;

use core_actions::Action;
use core_state::{InputMode, StatusMsg};
use pretty_assertions::assert_eq;

#[test]
fn recorded_macro_replays_keystrokes() {
    let mut st = state_with_text("a\nb\nc");
    run_actions(&mut st, &[Action::ToggleMacroRecording]);
    assert!(st.is_recording_user_macro());
    run_actions(&mut st, &insert_session("- "));
    run_actions(
        &mut st,
        &[
            Action::CursorNextLine { count: 1 },
            Action::ToggleMacroRecording,
            Action::ReplayMacro { count: 2 },
        ],
    );
    assert_eq!(st.buffer().text(), "- a\n- b\n- c");
    assert_eq!(st.input_mode(), InputMode::Normal);

    run_actions(&mut st, &[Action::Undo]);
    assert_eq!(st.buffer().text(), "- a\nb\nc");
}

#[test]
fn macro_control_is_never_recorded() {
    let mut st = state_with_text("abc");
    run_actions(
        &mut st,
        &[
            Action::ToggleMacroRecording,
            Action::DeleteNextCharInLine {
                count: 1,
                page: Default::default(),
            },
            Action::ToggleMacroRecording,
            Action::ReplayMacro { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "c");
    assert_eq!(st.status_msg(), Some(&StatusMsg::success("Replayed macro")));
}

#[test]
fn replayed_undo_reverts_the_replayed_edit() {
    let mut st = state_with_text("abc");
    run_actions(
        &mut st,
        &[
            Action::ToggleMacroRecording,
            Action::DeleteNextCharInLine {
                count: 1,
                page: Default::default(),
            },
            Action::Undo,
            Action::ToggleMacroRecording,
        ],
    );
    assert_eq!(st.buffer().text(), "abc");

    run_actions(&mut st, &[Action::ReplayMacro { count: 1 }]);
    assert_eq!(st.buffer().text(), "abc");
    assert_eq!(st.buffer().cursor_position(), 0);

    run_actions(&mut st, &[Action::Undo]);
    assert_eq!(st.buffer().text(), "abc");
}

#[test]
fn replay_without_recording_is_an_error() {
    let mut st = state_with_text("abc");
    run_actions(&mut st, &[Action::ReplayMacro { count: 1 }]);
    assert_eq!(st.buffer().text(), "abc");
    assert!(matches!(st.status_msg(), Some(msg) if msg.style == core_state::StatusStyle::Error));
}

#[test]
fn repeat_while_recording_is_rejected() {
    let mut st = state_with_text("abc");
    run_actions(
        &mut st,
        &[
            Action::DeleteNextCharInLine {
                count: 1,
                page: Default::default(),
            },
            Action::ToggleMacroRecording,
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "bc");
    assert_eq!(
        st.status_msg(),
        Some(&StatusMsg::error(
            "Cannot repeat the last action while recording a macro"
        ))
    );
}
