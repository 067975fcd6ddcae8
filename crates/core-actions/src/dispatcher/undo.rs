//! Undo / redo.
//!
//! Neither becomes the last action, so "repeat" after an undo still replays
//! the edit that was undone.

use super::Recording;
use crate::Action;
use core_state::Command;

pub(crate) fn command_for(action: &Action) -> Option<(Command, Recording)> {
    let command = match action {
        Action::Undo => Command::Undo,
        Action::Redo => Command::Redo,
        _ => return None,
    };
    Some((command, Recording::NormalOrVisual { last_action: false }))
}

#[cfg(test)]
mod tests {
    use crate::{Action, dispatch};
    use core_state::{ClipboardPage, EditorState, Locator, Settings};
    use pretty_assertions::assert_eq;

    #[test]
    fn repeat_after_undo_replays_undone_edit() {
        let mut st = EditorState::new(Settings::default());
        st.load_document("", "abc", &Locator::Position(0));
        let delete = Action::DeleteNextCharInLine {
            count: 1,
            page: ClipboardPage::Default,
        };
        dispatch(&mut st, &delete);
        assert_eq!(st.buffer().text(), "bc");
        dispatch(&mut st, &Action::Undo);
        assert_eq!(st.buffer().text(), "abc");
        dispatch(&mut st, &Action::Redo);
        assert_eq!(st.buffer().text(), "bc");
        dispatch(&mut st, &Action::RepeatLastAction { count: 1 });
        assert_eq!(st.buffer().text(), "c");
    }
}
