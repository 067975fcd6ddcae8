#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, dispatch};
use core_state::{ClipboardPage, EditorState, Locator, Settings};

pub fn state_with_text(text: &str) -> EditorState {
    let mut st = EditorState::new(Settings::default());
    st.load_document("", text, &Locator::Position(0));
    st
}

pub fn state_at(text: &str, cursor: usize) -> EditorState {
    let mut st = state_with_text(text);
    st.move_cursor(&Locator::Position(cursor));
    st
}

/// Dispatch each action in order, returning the last result.
pub fn run_actions(st: &mut EditorState, actions: &[Action]) -> DispatchResult {
    let mut last = DispatchResult::clean();
    for action in actions {
        last = dispatch(st, action);
    }
    last
}

/// Parse a JSON array of actions and dispatch it.
pub fn run_script(st: &mut EditorState, json: &str) -> DispatchResult {
    let actions: Vec<Action> = serde_json::from_str(json).expect("valid action script");
    run_actions(st, &actions)
}

/// Keystrokes of an insert session: enter, type `text`, exit.
pub fn insert_session(text: &str) -> Vec<Action> {
    let mut actions = vec![Action::EnterInsertMode];
    actions.extend(text.chars().map(|c| match c {
        '\n' => Action::InsertNewline,
        c => Action::InsertRune(c),
    }));
    actions.push(Action::ExitInsertMode);
    actions
}

pub fn default_clipboard_text(st: &EditorState) -> String {
    st.clipboard().get(ClipboardPage::Default).text
}
