//! User-facing actions and the dispatcher that applies them to an
//! [`EditorState`](core_state::EditorState).
//!
//! An [`Action`] is what a key binding or a script step resolves to. The
//! dispatcher turns it into engine [`Command`](core_state::Command)s and
//! decides how the result is recorded: whether it closes an undo entry,
//! becomes the action that "repeat" replays, and lands in a user macro.

pub mod dispatcher;
pub mod io_ops;

pub use dispatcher::{DispatchResult, dispatch};

use core_state::{ClipboardPage, InputMode, SearchCompleteAction, SearchDirection, SelectionMode};
use serde::{Deserialize, Serialize};

fn one() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Cursor motions (normal and visual mode).
    CursorLeft {
        #[serde(default = "one")]
        count: usize,
    },
    CursorRight {
        #[serde(default = "one")]
        count: usize,
    },
    /// Back one cluster, crossing line boundaries.
    CursorBack {
        #[serde(default = "one")]
        count: usize,
    },
    CursorUp {
        #[serde(default = "one")]
        count: usize,
    },
    CursorDown {
        #[serde(default = "one")]
        count: usize,
    },
    /// Down `count` lines, onto the first non-whitespace cluster.
    CursorNextLine {
        #[serde(default = "one")]
        count: usize,
    },
    CursorNextWordStart {
        #[serde(default = "one")]
        count: usize,
    },
    CursorPrevWordStart {
        #[serde(default = "one")]
        count: usize,
    },
    CursorNextWordEnd {
        #[serde(default = "one")]
        count: usize,
    },
    CursorToNextMatchingChar {
        target: char,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        include_char: bool,
    },
    CursorToPrevMatchingChar {
        target: char,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        include_char: bool,
    },
    CursorLineStart,
    CursorLineStartNonWhitespace,
    CursorLineEnd,
    /// One-based line number, like a `gg` count.
    CursorStartOfLineNum {
        #[serde(default = "one")]
        line: usize,
    },
    CursorStartOfLastLine,
    ScrollUp {
        #[serde(default)]
        half: bool,
    },
    ScrollDown {
        #[serde(default)]
        half: bool,
    },

    // Normal mode edits.
    EnterInsertMode,
    EnterInsertModeAtStartOfLine,
    EnterInsertModeAtNextPos,
    EnterInsertModeAtEndOfLine,
    BeginNewLineBelow,
    BeginNewLineAbove,
    JoinLines,
    DeleteLines {
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        page: ClipboardPage,
    },
    DeletePrevCharInLine {
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteNextCharInLine {
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteDown {
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteUp {
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteToEndOfLine {
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteToStartOfLine {
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteToStartOfLineNonWhitespace {
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteToNextWordStart {
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteToNextMatchingChar {
        target: char,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        include_char: bool,
        #[serde(default)]
        page: ClipboardPage,
    },
    DeleteToPrevMatchingChar {
        target: char,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        include_char: bool,
        #[serde(default)]
        page: ClipboardPage,
    },
    ChangeToNextMatchingChar {
        target: char,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        include_char: bool,
        #[serde(default)]
        page: ClipboardPage,
    },
    ChangeToPrevMatchingChar {
        target: char,
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        include_char: bool,
        #[serde(default)]
        page: ClipboardPage,
    },
    ReplaceChar {
        replacement: char,
    },
    ToggleCaseAtCursor,
    IndentLine,
    OutdentLine,
    CopyToNextWordStart {
        #[serde(default = "one")]
        count: usize,
        #[serde(default)]
        page: ClipboardPage,
    },
    CopyLine {
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
    Undo,
    Redo,

    // Visual mode.
    ToggleVisualMode {
        mode: SelectionMode,
    },
    ReturnToNormalMode,
    DeleteSelection {
        #[serde(default)]
        page: ClipboardPage,
    },
    ChangeSelection {
        #[serde(default)]
        page: ClipboardPage,
    },
    ToggleCaseInSelection,
    IndentSelection,
    OutdentSelection,
    CopySelection {
        #[serde(default)]
        page: ClipboardPage,
    },

    // Insert mode.
    InsertRune(char),
    /// Text arriving in one piece, e.g. a bracketed paste.
    InsertText(String),
    DeletePrevChar,
    InsertNewline,
    InsertTab,
    InsertCursorLeft,
    InsertCursorRight,
    InsertCursorUp,
    InsertCursorDown,
    ExitInsertMode,

    // Search.
    StartSearch {
        #[serde(default)]
        direction: SearchDirection,
        #[serde(default)]
        complete_action: SearchCompleteAction,
    },
    AppendRuneToSearchQuery(char),
    DeleteRuneFromSearchQuery,
    CommitSearch,
    AbortSearch,
    SearchHistoryPrev,
    SearchHistoryNext,
    FindNextMatch,
    FindPrevMatch,
    /// Search for the word under the cursor, matching case exactly.
    SearchWordUnderCursor {
        #[serde(default)]
        direction: SearchDirection,
        #[serde(default)]
        complete_action: SearchCompleteAction,
        #[serde(default = "one")]
        count: usize,
    },

    // Macros. Never recorded themselves.
    RepeatLastAction {
        #[serde(default = "one")]
        count: usize,
    },
    ToggleMacroRecording,
    ReplayMacro {
        #[serde(default = "one")]
        count: usize,
    },

    // Session.
    CancelTask,
    SaveDocument,
    OpenPrevDocument,
    OpenNextDocument,
    Resize {
        width: usize,
        height: usize,
    },
    Quit,
}

impl Action {
    /// Whether the action means anything in `mode`. The dispatcher ignores
    /// actions arriving in the wrong mode.
    pub fn accepts_mode(&self, mode: InputMode) -> bool {
        use Action::*;
        use InputMode::{Insert, Normal, Search, Task, Visual};
        match self {
            CursorLeft { .. }
            | CursorRight { .. }
            | CursorBack { .. }
            | CursorUp { .. }
            | CursorDown { .. }
            | CursorNextLine { .. }
            | CursorNextWordStart { .. }
            | CursorPrevWordStart { .. }
            | CursorNextWordEnd { .. }
            | CursorToNextMatchingChar { .. }
            | CursorToPrevMatchingChar { .. }
            | CursorLineStart
            | CursorLineStartNonWhitespace
            | CursorLineEnd
            | CursorStartOfLineNum { .. }
            | CursorStartOfLastLine
            | ScrollUp { .. }
            | ScrollDown { .. }
            | ToggleVisualMode { .. }
            | StartSearch { .. }
            | SearchWordUnderCursor { .. } => matches!(mode, Normal | Visual),

            ReturnToNormalMode
            | DeleteSelection { .. }
            | ChangeSelection { .. }
            | ToggleCaseInSelection
            | IndentSelection
            | OutdentSelection
            | CopySelection { .. } => mode == Visual,

            InsertRune(_)
            | InsertText(_)
            | DeletePrevChar
            | InsertNewline
            | InsertTab
            | InsertCursorLeft
            | InsertCursorRight
            | InsertCursorUp
            | InsertCursorDown
            | ExitInsertMode => mode == Insert,

            AppendRuneToSearchQuery(_)
            | DeleteRuneFromSearchQuery
            | CommitSearch
            | AbortSearch
            | SearchHistoryPrev
            | SearchHistoryNext => mode == Search,

            CancelTask => mode == Task,
            Resize { .. } | Quit => true,

            _ => mode == Normal,
        }
    }
}
