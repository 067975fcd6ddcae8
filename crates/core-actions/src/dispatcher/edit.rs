//! Text changes: normal mode operators and insert mode keystrokes.
//!
//! Normal mode edits replace the last action. Insert mode keystrokes extend
//! it, so the whole run since entering insert mode repeats as one unit.

use super::Recording;
use crate::Action;
use core_state::{ClipboardPage, Command, InputMode, Locator, RangeLocator};

const EDIT: Recording = Recording::NormalOrVisual { last_action: true };

pub(crate) fn command_for(action: &Action) -> Option<(Command, Recording)> {
    if let Some(command) = insert_mode_command(action) {
        return Some((command, Recording::Insert));
    }
    normal_mode_command(action).map(|command| (command, EDIT))
}

fn normal_mode_command(action: &Action) -> Option<Command> {
    let command = match *action {
        Action::JoinLines => Command::JoinLines,
        Action::DeleteLines { count, page } => Command::Sequence(vec![
            Command::DeleteLines {
                target: Locator::StartOfLineBelow {
                    count: count.saturating_sub(1),
                },
                abort_if_same_line: false,
                replace_with_empty_line: false,
                page,
            },
            Command::MoveCursor(Locator::LineStartNonWhitespace),
        ]),
        Action::DeletePrevCharInLine { page } => Command::DeleteToPos {
            locator: Locator::PrevCharInLine {
                count: 1,
                include_end_of_line_or_file: false,
            },
            page,
        },
        Action::DeleteNextCharInLine { count, page } => Command::Sequence(vec![
            Command::DeleteToPos {
                locator: Locator::NextCharInLine {
                    count,
                    include_end_of_line_or_file: true,
                },
                page,
            },
            Command::MoveCursor(Locator::ClosestCharOnLine),
        ]),
        Action::DeleteDown { page } => delete_adjacent_line(Locator::StartOfLineBelow { count: 1 }, page),
        Action::DeleteUp { page } => delete_adjacent_line(Locator::StartOfLineAbove { count: 1 }, page),
        Action::DeleteToEndOfLine { page } => Command::Sequence(vec![
            Command::DeleteToPos {
                locator: Locator::NextLineBoundary {
                    include_end_of_line_or_file: true,
                },
                page,
            },
            Command::MoveCursor(Locator::ClosestCharOnLine),
        ]),
        Action::DeleteToStartOfLine { page } => Command::DeleteToPos {
            locator: Locator::PrevLineBoundary,
            page,
        },
        Action::DeleteToStartOfLineNonWhitespace { page } => Command::DeleteToPos {
            locator: Locator::LineStartNonWhitespace,
            page,
        },
        Action::DeleteToNextWordStart { count, page } => Command::Sequence(vec![
            Command::DeleteToPos {
                locator: Locator::NextWordStart { count },
                page,
            },
            Command::MoveCursor(Locator::NextNonWhitespaceOrNewline),
            Command::MoveCursor(Locator::ClosestCharOnLine),
        ]),
        Action::DeleteToNextMatchingChar {
            target,
            count,
            include_char,
            page,
        } => delete_to_next_matching_char(target, count, include_char, page),
        Action::DeleteToPrevMatchingChar {
            target,
            count,
            include_char,
            page,
        } => delete_to_prev_matching_char(target, count, include_char, page),
        Action::ChangeToNextMatchingChar {
            target,
            count,
            include_char,
            page,
        } => then_insert(delete_to_next_matching_char(target, count, include_char, page)),
        Action::ChangeToPrevMatchingChar {
            target,
            count,
            include_char,
            page,
        } => then_insert(delete_to_prev_matching_char(target, count, include_char, page)),
        Action::ReplaceChar { replacement } => Command::ReplaceChar(replacement.to_string()),
        Action::ToggleCaseAtCursor => Command::ToggleCaseAtCursor,
        Action::IndentLine => Command::IndentLineAtCursor,
        Action::OutdentLine => Command::OutdentLineAtCursor,
        Action::CopyToNextWordStart { count, page } => Command::CopyRange {
            range: RangeLocator::ToCursor(Locator::NextWordStart { count }),
            page,
        },
        Action::CopyLine { page } => Command::CopyLine { page },
        Action::PasteAfterCursor { page } => Command::PasteAfterCursor { page },
        Action::PasteBeforeCursor { page } => Command::PasteBeforeCursor { page },
        _ => return None,
    };
    Some(command)
}

fn insert_mode_command(action: &Action) -> Option<Command> {
    let command = match action {
        Action::InsertRune(c) => Command::InsertRune(*c),
        Action::InsertText(text) => Command::InsertText(text.clone()),
        Action::DeletePrevChar => Command::DeleteToPos {
            locator: Locator::PrevCharOrAutoIndent,
            page: ClipboardPage::Default,
        },
        Action::InsertNewline => Command::InsertNewline,
        Action::InsertTab => Command::InsertTab,
        Action::InsertCursorLeft => Command::MoveCursor(Locator::PrevCharInLine {
            count: 1,
            include_end_of_line_or_file: false,
        }),
        Action::InsertCursorRight => Command::MoveCursor(Locator::NextCharInLine {
            count: 1,
            include_end_of_line_or_file: true,
        }),
        Action::InsertCursorUp => Command::MoveCursorToLineAbove(1),
        Action::InsertCursorDown => Command::MoveCursorToLineBelow(1),
        _ => return None,
    };
    Some(command)
}

// Only when the located line differs from the cursor's.
fn delete_adjacent_line(target: Locator, page: ClipboardPage) -> Command {
    Command::Sequence(vec![
        Command::DeleteLines {
            target,
            abort_if_same_line: true,
            replace_with_empty_line: false,
            page,
        },
        Command::MoveCursor(Locator::LineStartNonWhitespace),
    ])
}

fn delete_to_next_matching_char(
    target: char,
    count: usize,
    include_char: bool,
    page: ClipboardPage,
) -> Command {
    Command::Sequence(vec![
        Command::DeleteToPos {
            locator: Locator::ThroughNextMatchingCharInLine {
                target,
                count,
                include_char,
            },
            page,
        },
        Command::MoveCursor(Locator::ClosestCharOnLine),
    ])
}

fn delete_to_prev_matching_char(
    target: char,
    count: usize,
    include_char: bool,
    page: ClipboardPage,
) -> Command {
    Command::DeleteToPos {
        locator: Locator::PrevMatchingCharInLine {
            target,
            count,
            include_char,
        },
        page,
    }
}

fn then_insert(delete: Command) -> Command {
    let mut commands = match delete {
        Command::Sequence(commands) => commands,
        other => vec![other],
    };
    commands.push(Command::SetInputMode(InputMode::Insert));
    Command::Sequence(commands)
}
