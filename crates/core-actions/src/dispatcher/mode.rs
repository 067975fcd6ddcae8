//! Mode transitions (Normal <-> Insert, Normal <-> Visual).
//!
//! Entering insert mode starts the last action over, so the keystrokes typed
//! until `ExitInsertMode` are replayed together by "repeat". Visual toggles
//! only reach the user macro.

use super::Recording;
use crate::Action;
use core_state::{Command, InputMode, Locator};

pub(crate) fn command_for(action: &Action) -> Option<(Command, Recording)> {
    const STARTS_LAST_ACTION: Recording = Recording::NormalOrVisual { last_action: true };
    const USER_MACRO_ONLY: Recording = Recording::NormalOrVisual { last_action: false };

    let planned = match action {
        Action::EnterInsertMode => (Command::SetInputMode(InputMode::Insert), STARTS_LAST_ACTION),
        Action::EnterInsertModeAtStartOfLine => (
            Command::Sequence(vec![
                Command::SetInputMode(InputMode::Insert),
                Command::MoveCursor(Locator::LineStartNonWhitespace),
            ]),
            STARTS_LAST_ACTION,
        ),
        Action::EnterInsertModeAtNextPos => (
            Command::Sequence(vec![
                Command::SetInputMode(InputMode::Insert),
                Command::MoveCursor(Locator::NextCharInLine {
                    count: 1,
                    include_end_of_line_or_file: true,
                }),
            ]),
            STARTS_LAST_ACTION,
        ),
        Action::EnterInsertModeAtEndOfLine => (
            Command::Sequence(vec![
                Command::SetInputMode(InputMode::Insert),
                Command::MoveCursor(Locator::NextLineBoundary {
                    include_end_of_line_or_file: true,
                }),
            ]),
            STARTS_LAST_ACTION,
        ),
        Action::BeginNewLineBelow => (
            Command::Sequence(vec![
                Command::MoveCursor(Locator::NextLineBoundary {
                    include_end_of_line_or_file: true,
                }),
                Command::InsertNewline,
                Command::SetInputMode(InputMode::Insert),
            ]),
            STARTS_LAST_ACTION,
        ),
        // The new line above starts unindented.
        Action::BeginNewLineAbove => (
            Command::Sequence(vec![
                Command::MoveCursor(Locator::StartOfLineAtCursor),
                Command::InsertRune('\n'),
                Command::MoveCursor(Locator::PrevChar { count: 1 }),
                Command::SetInputMode(InputMode::Insert),
            ]),
            STARTS_LAST_ACTION,
        ),
        Action::ToggleVisualMode { mode } => (Command::ToggleVisualMode(*mode), USER_MACRO_ONLY),
        Action::ReturnToNormalMode => (Command::SetInputMode(InputMode::Normal), USER_MACRO_ONLY),
        Action::ExitInsertMode => (
            Command::Sequence(vec![
                Command::MoveCursor(Locator::PrevCharInLine {
                    count: 1,
                    include_end_of_line_or_file: false,
                }),
                Command::SetInputMode(InputMode::Normal),
            ]),
            Recording::Insert,
        ),
        _ => return None,
    };
    Some(planned)
}
