//! Operators over the active selection.
//!
//! The selection is captured as a locator relative to its start, and the
//! operator runs from the start of the selection. Replaying the recorded
//! command at another cursor covers a region of the same shape.

use super::Recording;
use crate::Action;
use core_state::{ClipboardPage, Command, EditorState, InputMode, Locator, SelectionMode};

pub(crate) fn command_for(state: &EditorState, action: &Action) -> Option<(Command, Recording)> {
    if let Action::CopySelection { page } = *action {
        let command = Command::Sequence(vec![
            Command::CopySelection { page },
            Command::SetInputMode(InputMode::Normal),
        ]);
        return Some((command, Recording::NormalOrVisual { last_action: false }));
    }

    let mode = state.buffer().selection_mode();
    let end = state.buffer().selection_end_locator()?;
    let (operator, next_mode) = match *action {
        Action::DeleteSelection { page } => (delete(mode, end, false, page), InputMode::Normal),
        Action::ChangeSelection { page } => (delete(mode, end, true, page), InputMode::Insert),
        Action::ToggleCaseInSelection => (Command::ToggleCaseInSelection(end), InputMode::Normal),
        Action::IndentSelection => (Command::IndentSelection(end), InputMode::Normal),
        Action::OutdentSelection => (Command::OutdentSelection(end), InputMode::Normal),
        _ => return None,
    };
    let command = Command::Sequence(vec![
        Command::MoveCursorToStartOfSelection,
        operator,
        Command::SetInputMode(next_mode),
    ]);
    Some((command, Recording::NormalOrVisual { last_action: true }))
}

// Linewise changes keep an empty line to type into.
fn delete(mode: SelectionMode, end: Locator, change: bool, page: ClipboardPage) -> Command {
    match mode {
        SelectionMode::Line => Command::DeleteLines {
            target: end,
            abort_if_same_line: false,
            replace_with_empty_line: change,
            page,
        },
        _ => Command::DeleteToPos { locator: end, page },
    }
}

#[cfg(test)]
mod tests {
    use crate::{Action, dispatch};
    use core_state::{ClipboardPage, EditorState, InputMode, Locator, SelectionMode, Settings};
    use pretty_assertions::assert_eq;

    fn state_with_text(text: &str) -> EditorState {
        let mut st = EditorState::new(Settings::default());
        st.load_document("", text, &Locator::Position(0));
        st
    }

    #[test]
    fn linewise_change_leaves_empty_line() {
        let mut st = state_with_text("a\nb\nc");
        dispatch(&mut st, &Action::CursorDown { count: 1 });
        dispatch(&mut st, &Action::ToggleVisualMode { mode: SelectionMode::Line });
        dispatch(
            &mut st,
            &Action::ChangeSelection {
                page: ClipboardPage::Default,
            },
        );
        assert_eq!(st.buffer().text(), "a\n\nc");
        assert_eq!(st.input_mode(), InputMode::Insert);
        assert_eq!(st.buffer().cursor_position(), 2);
    }

    #[test]
    fn copy_selection_returns_to_normal() {
        let mut st = state_with_text("hello world");
        dispatch(&mut st, &Action::ToggleVisualMode { mode: SelectionMode::Char });
        dispatch(&mut st, &Action::CursorNextWordEnd { count: 1 });
        dispatch(
            &mut st,
            &Action::CopySelection {
                page: ClipboardPage::Default,
            },
        );
        assert_eq!(st.input_mode(), InputMode::Normal);
        assert_eq!(st.clipboard().get(ClipboardPage::Default).text, "hello");
        assert_eq!(st.buffer().text(), "hello world");
    }

    #[test]
    fn indent_selection_then_repeat() {
        let mut st = state_with_text("a\nb\nc");
        dispatch(&mut st, &Action::ToggleVisualMode { mode: SelectionMode::Line });
        dispatch(&mut st, &Action::CursorDown { count: 1 });
        dispatch(&mut st, &Action::IndentSelection);
        assert_eq!(st.buffer().text(), "\ta\n\tb\nc");
        dispatch(&mut st, &Action::RepeatLastAction { count: 1 });
        assert_eq!(st.buffer().text(), "\t\ta\n\t\tb\nc");
    }
}
