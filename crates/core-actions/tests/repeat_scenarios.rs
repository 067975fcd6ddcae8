mod common;
use common::*;

use core_actions::Action;
use core_state::{
    ClipboardPage, InputMode, SearchCompleteAction, SearchDirection, SelectionMode,
};
use pretty_assertions::assert_eq;

const PAGE: ClipboardPage = ClipboardPage::Default;

#[test]
fn repeat_delete_lines_with_count() {
    let mut st = state_with_text("a\nb\nc\nd\ne");
    run_actions(
        &mut st,
        &[
            Action::DeleteLines { count: 2, page: PAGE },
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "e");
    assert_eq!(default_clipboard_text(&st), "c\nd");
}

#[test]
fn motions_do_not_replace_last_action() {
    let mut st = state_with_text("abc\ndef");
    run_actions(
        &mut st,
        &[
            Action::DeleteNextCharInLine { count: 1, page: PAGE },
            Action::CursorDown { count: 1 },
            Action::CursorRight { count: 1 },
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "bc\ndf");
}

#[test]
fn repeat_char_selection_delete_at_new_cursor() {
    let mut st = state_with_text("abcdef\nabcdef");
    run_actions(
        &mut st,
        &[
            Action::ToggleVisualMode { mode: SelectionMode::Char },
            Action::CursorRight { count: 2 },
            Action::DeleteSelection { page: PAGE },
        ],
    );
    assert_eq!(st.buffer().text(), "def\nabcdef");
    assert_eq!(st.input_mode(), InputMode::Normal);

    run_actions(
        &mut st,
        &[
            Action::CursorDown { count: 1 },
            Action::CursorRight { count: 1 },
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "def\naef");
}

#[test]
fn repeat_linewise_selection_delete() {
    let mut st = state_with_text("1\n2\n3\n4\n5");
    run_actions(
        &mut st,
        &[
            Action::ToggleVisualMode { mode: SelectionMode::Line },
            Action::CursorDown { count: 1 },
            Action::DeleteSelection { page: PAGE },
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "5");
}

#[test]
fn repeat_insert_session() {
    let mut st = state_with_text("x\ny");
    run_actions(&mut st, &insert_session("ab"));
    assert_eq!(st.buffer().text(), "abx\ny");
    run_actions(
        &mut st,
        &[
            Action::CursorDown { count: 1 },
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "abx\naby");
}

#[test]
fn repeat_search_delete_reuses_query() {
    let mut st = state_with_text("one; two; three");
    run_actions(
        &mut st,
        &[
            Action::StartSearch {
                direction: SearchDirection::Forward,
                complete_action: SearchCompleteAction::DeleteToMatch { page: PAGE },
            },
            Action::AppendRuneToSearchQuery(';'),
            Action::CommitSearch,
        ],
    );
    assert_eq!(st.buffer().text(), "; two; three");

    // A plain search in between does not change what repeat replays.
    run_actions(
        &mut st,
        &[
            Action::StartSearch {
                direction: SearchDirection::Forward,
                complete_action: SearchCompleteAction::MoveCursorToMatch,
            },
            Action::AppendRuneToSearchQuery('t'),
            Action::CommitSearch,
            Action::RepeatLastAction { count: 1 },
        ],
    );
    assert_eq!(st.buffer().text(), "; ; three");
}

#[test]
fn repeat_with_count_is_one_undo_entry() {
    let mut st = state_with_text("abcdef");
    run_actions(
        &mut st,
        &[
            Action::DeleteNextCharInLine { count: 1, page: PAGE },
            Action::RepeatLastAction { count: 3 },
        ],
    );
    assert_eq!(st.buffer().text(), "ef");
    run_actions(&mut st, &[Action::Undo]);
    assert_eq!(st.buffer().text(), "bcdef");
}
