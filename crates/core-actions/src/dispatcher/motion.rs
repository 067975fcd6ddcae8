//! Motion sub-dispatch (cursor movement and scrolling).
//!
//! Every motion is a single `MoveCursor` or a short sequence of them, so a
//! recorded motion replays relative to wherever the cursor is at replay
//! time. Vertical motions go through the engine's line-above/below moves,
//! which keep the remembered column across short lines.

use crate::Action;
use core_state::{Command, EditorState, Locator, ScrollDirection};

pub(crate) fn command_for(state: &EditorState, action: &Action) -> Option<Command> {
    let command = match *action {
        Action::CursorLeft { count } => Command::MoveCursor(Locator::PrevCharInLine {
            count,
            include_end_of_line_or_file: false,
        }),
        Action::CursorRight { count } => Command::MoveCursor(Locator::NextCharInLine {
            count,
            include_end_of_line_or_file: false,
        }),
        Action::CursorBack { count } => Command::MoveCursor(Locator::PrevChar { count }),
        Action::CursorUp { count } => Command::MoveCursorToLineAbove(count),
        Action::CursorDown { count } => Command::MoveCursorToLineBelow(count),
        Action::CursorNextLine { count } => Command::Sequence(vec![
            Command::MoveCursorToLineBelow(count),
            Command::MoveCursor(Locator::LineStartNonWhitespace),
        ]),
        Action::CursorNextWordStart { count } => {
            Command::MoveCursor(Locator::NextWordStart { count })
        }
        Action::CursorPrevWordStart { count } => {
            Command::MoveCursor(Locator::PrevWordStart { count })
        }
        Action::CursorNextWordEnd { count } => Command::MoveCursor(Locator::NextWordEnd { count }),
        Action::CursorToNextMatchingChar {
            target,
            count,
            include_char,
        } => Command::MoveCursor(Locator::NextMatchingCharInLine {
            target,
            count,
            include_char,
        }),
        Action::CursorToPrevMatchingChar {
            target,
            count,
            include_char,
        } => Command::MoveCursor(Locator::PrevMatchingCharInLine {
            target,
            count,
            include_char,
        }),
        Action::CursorLineStart => Command::MoveCursor(Locator::PrevLineBoundary),
        Action::CursorLineStartNonWhitespace => {
            Command::MoveCursor(Locator::LineStartNonWhitespace)
        }
        Action::CursorLineEnd => Command::MoveCursor(Locator::NextLineBoundary {
            include_end_of_line_or_file: false,
        }),
        Action::CursorStartOfLineNum { line } => Command::Sequence(vec![
            Command::MoveCursor(Locator::StartOfLineNum(line.saturating_sub(1))),
            Command::MoveCursor(Locator::LineStartNonWhitespace),
        ]),
        Action::CursorStartOfLastLine => Command::Sequence(vec![
            Command::MoveCursor(Locator::StartOfLastLine),
            Command::MoveCursor(Locator::LineStartNonWhitespace),
        ]),
        Action::ScrollUp { half } => {
            let count = scroll_lines(state, half);
            Command::Sequence(vec![
                Command::MoveCursor(Locator::StartOfLineAbove { count }),
                Command::ScrollViewByNumLines {
                    direction: ScrollDirection::Backward,
                    count,
                },
            ])
        }
        Action::ScrollDown { half } => {
            let count = scroll_lines(state, half);
            Command::Sequence(vec![
                Command::MoveCursor(Locator::StartOfLineBelow { count }),
                Command::ScrollViewByNumLines {
                    direction: ScrollDirection::Forward,
                    count,
                },
            ])
        }
        _ => return None,
    };
    Some(command)
}

// A full or half view height, never less than one line.
fn scroll_lines(state: &EditorState, half: bool) -> usize {
    let (_, height) = state.buffer().view_size();
    let lines = if half { height / 2 } else { height };
    lines.max(1)
}

#[cfg(test)]
mod tests {
    use crate::{Action, dispatch};
    use core_state::{EditorState, Locator, Settings};
    use pretty_assertions::assert_eq;

    fn state_with_text(text: &str) -> EditorState {
        let mut st = EditorState::new(Settings::default());
        st.load_document("", text, &Locator::Position(0));
        st
    }

    #[test]
    fn line_number_is_one_based_and_skips_indent() {
        let mut st = state_with_text("a\n  b\nc");
        dispatch(&mut st, &Action::CursorStartOfLineNum { line: 2 });
        assert_eq!(st.buffer().cursor_position(), 4);
        dispatch(&mut st, &Action::CursorStartOfLineNum { line: 0 });
        assert_eq!(st.buffer().cursor_position(), 0);
    }

    #[test]
    fn line_end_rests_on_last_char() {
        let mut st = state_with_text("abc\nde");
        dispatch(&mut st, &Action::CursorLineEnd);
        assert_eq!(st.buffer().cursor_position(), 2);
        dispatch(&mut st, &Action::CursorLineStart);
        assert_eq!(st.buffer().cursor_position(), 0);
    }

    #[test]
    fn scroll_down_moves_cursor_and_view() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut st = state_with_text(&text);
        dispatch(&mut st, &Action::Resize { width: 80, height: 10 });
        dispatch(&mut st, &Action::ScrollDown { half: true });
        let doc = st.buffer().document();
        assert_eq!(doc.line_num_for_pos(st.buffer().cursor_position()), 5);
        // The view follows by half a page, then backs off to keep the
        // scroll margin above the cursor.
        assert_eq!(doc.line_num_for_pos(st.buffer().view_text_origin()), 2);
    }
}
