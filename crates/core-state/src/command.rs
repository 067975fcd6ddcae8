//! Serializable editor commands.
//!
//! A [`Command`] names one engine operation with its arguments. Macros and
//! task results are lists of commands, which keeps recordings inspectable
//! and lets a worker thread describe edits without touching the state.

use crate::EditorState;
use crate::clipboard::ClipboardPage;
use crate::locator::{Locator, RangeLocator};
use crate::mode::InputMode;
use crate::search::{SearchCompleteAction, SearchDirection};
use crate::selection::SelectionMode;
use crate::status::StatusMsg;
use crate::view::ScrollDirection;
use core_syntax::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveCursor(Locator),
    MoveCursorToLineAbove(usize),
    MoveCursorToLineBelow(usize),
    MoveCursorToStartOfSelection,
    SelectRange(RangeLocator),

    InsertRune(char),
    InsertText(String),
    InsertNewline,
    InsertTab,
    DeleteToPos {
        locator: Locator,
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteLines {
        target: Locator,
        #[serde(default)]
        abort_if_same_line: bool,
        #[serde(default)]
        replace_with_empty_line: bool,
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteSelection {
        #[serde(default)]
        replace_with_empty_line: bool,
        #[serde(default)]
        page: ClipboardPage,
    },
    ReplaceChar(String),
    JoinLines,
    ToggleCaseAtCursor,
    /// Selection commands run from the start of the selection up to the
    /// given end, so a repeat reproduces the extent at a new cursor.
    ToggleCaseInSelection(Locator),
    IndentLineAtCursor,
    OutdentLineAtCursor,
    IndentSelection(Locator),
    OutdentSelection(Locator),

    CopyLine {
        #[serde(default)]
        page: ClipboardPage,
    },
    CopySelection {
        #[serde(default)]
        page: ClipboardPage,
    },
    CopyRange {
        range: RangeLocator,
        #[serde(default)]
        page: ClipboardPage,
    },
    PasteAfterCursor {
        #[serde(default)]
        page: ClipboardPage,
    },
    PasteBeforeCursor {
        #[serde(default)]
        page: ClipboardPage,
    },

    SetInputMode(InputMode),
    ToggleVisualMode(SelectionMode),

    CheckpointUndoLog,
    BeginUndoEntry,
    CommitUndoEntry,
    Undo,
    Redo,

    StartSearch {
        direction: SearchDirection,
        #[serde(default)]
        complete_action: SearchCompleteAction,
    },
    AppendRuneToSearchQuery(char),
    DeleteRuneFromSearchQuery,
    CompleteSearch {
        commit: bool,
    },
    FindNextMatch {
        #[serde(default)]
        reverse: bool,
    },
    SetSearchQueryToPrevInHistory,
    SetSearchQueryToNextInHistory,
    SearchWordUnderCursor {
        direction: SearchDirection,
        #[serde(default)]
        complete_action: SearchCompleteAction,
        count: usize,
    },

    ScrollViewToCursor,
    ScrollViewByNumLines {
        direction: ScrollDirection,
        count: usize,
    },
    SetStatus(StatusMsg),
    ClearStatus,
    SetSyntax(Language),

    ReplayRecordedUserMacro {
        count: usize,
    },
    /// Several commands applied in order as one action.
    Sequence(Vec<Command>),
}

impl Command {
    pub fn apply(&self, state: &mut EditorState) {
        match self {
            Command::MoveCursor(loc) => state.move_cursor(loc),
            Command::MoveCursorToLineAbove(count) => state.move_cursor_to_line_above(*count),
            Command::MoveCursorToLineBelow(count) => state.move_cursor_to_line_below(*count),
            Command::MoveCursorToStartOfSelection => state.move_cursor_to_start_of_selection(),
            Command::SelectRange(range) => state.select_range(range),

            Command::InsertRune(c) => state.insert_rune(*c),
            Command::InsertText(text) => state.insert_text(text),
            Command::InsertNewline => state.insert_newline(),
            Command::InsertTab => state.insert_tab(),
            Command::DeleteToPos { locator, page } => state.delete_to_pos(locator, *page),
            Command::DeleteLines {
                target,
                abort_if_same_line,
                replace_with_empty_line,
                page,
            } => state.delete_lines(target, *abort_if_same_line, *replace_with_empty_line, *page),
            Command::DeleteSelection {
                replace_with_empty_line,
                page,
            } => state.delete_selection(*replace_with_empty_line, *page),
            Command::ReplaceChar(text) => state.replace_char(text),
            Command::JoinLines => state.join_lines(),
            Command::ToggleCaseAtCursor => state.toggle_case_at_cursor(),
            Command::ToggleCaseInSelection(end) => state.toggle_case_in_selection(end),
            Command::IndentLineAtCursor => state.indent_line_at_cursor(),
            Command::OutdentLineAtCursor => state.outdent_line_at_cursor(),
            Command::IndentSelection(end) => state.indent_selection(end),
            Command::OutdentSelection(end) => state.outdent_selection(end),

            Command::CopyLine { page } => state.copy_line(*page),
            Command::CopySelection { page } => state.copy_selection(*page),
            Command::CopyRange { range, page } => state.copy_range(*page, range),
            Command::PasteAfterCursor { page } => state.paste_after_cursor(*page),
            Command::PasteBeforeCursor { page } => state.paste_before_cursor(*page),

            Command::SetInputMode(mode) => state.set_input_mode(*mode),
            Command::ToggleVisualMode(mode) => state.toggle_visual_mode(*mode),

            Command::CheckpointUndoLog => state.checkpoint_undo_log(),
            Command::BeginUndoEntry => state.begin_undo_entry(),
            Command::CommitUndoEntry => state.commit_undo_entry(),
            Command::Undo => state.undo(),
            Command::Redo => state.redo(),

            Command::StartSearch {
                direction,
                complete_action,
            } => state.start_search(*direction, *complete_action),
            Command::AppendRuneToSearchQuery(c) => state.append_rune_to_search_query(*c),
            Command::DeleteRuneFromSearchQuery => state.delete_rune_from_search_query(),
            Command::CompleteSearch { commit } => state.complete_search(*commit),
            Command::FindNextMatch { reverse } => state.find_next_match(*reverse),
            Command::SetSearchQueryToPrevInHistory => state.set_search_query_to_prev_in_history(),
            Command::SetSearchQueryToNextInHistory => state.set_search_query_to_next_in_history(),
            Command::SearchWordUnderCursor {
                direction,
                complete_action,
                count,
            } => state.search_word_under_cursor(*direction, *complete_action, *count),

            Command::ScrollViewToCursor => state.scroll_view_to_cursor(),
            Command::ScrollViewByNumLines { direction, count } => {
                state.scroll_view_by_num_lines(*direction, *count)
            }
            Command::SetStatus(msg) => state.set_status_msg(msg.clone()),
            Command::ClearStatus => state.clear_status_msg(),
            Command::SetSyntax(language) => state.set_syntax(*language),

            Command::ReplayRecordedUserMacro { count } => state.replay_recorded_user_macro(*count),
            Command::Sequence(commands) => {
                for command in commands {
                    command.apply(state);
                }
            }
        }
    }
}
