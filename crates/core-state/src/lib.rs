//! Editor state and the operations that transform it.
//!
//! [`EditorState`] owns a single [`BufferState`] plus everything that
//! outlives a document: clipboard, macros, the running task and the file
//! timeline. Operations are inherent methods spread over the modules below,
//! each module owning one concern:
//!
//! - `cursor` / `selection` / `locator`: positions and how to reach them.
//! - `edit`: the two logged mutation primitives and the commands built on them.
//! - `undo`: the op log.
//! - `search`, `macros`, `task`, `mode`, `view`: the interactive machinery.
//! - `command`: a serializable name for every operation, used by macros and
//!   task results.
//!
//! Positions are codepoint offsets into the document throughout.

pub mod clipboard;
pub mod command;
pub mod cursor;
pub mod document;
pub mod edit;
pub mod locator;
pub mod macros;
pub mod mode;
pub mod search;
pub mod selection;
pub mod status;
pub mod syntax;
pub mod task;
pub mod timeline;
pub mod undo;
pub mod view;

pub use clipboard::{Clipboard, ClipboardPage, PageContent};
pub use command::Command;
pub use cursor::CursorState;
pub use locator::{Locator, LocatorParams, RangeLocator, selection_end_locator};
pub use mode::InputMode;
pub use search::{SearchCompleteAction, SearchDirection, SearchMatch};
pub use selection::{Region, SelectionMode, Selector};
pub use status::{StatusMsg, StatusStyle};
pub use task::{CancelToken, TaskError, TaskResult};
pub use timeline::{FileTimeline, TimelineState};
pub use undo::{Entry, Op, UndoLog};
pub use view::{ScrollDirection, ViewState};

use core_syntax::{Language, Tokenizer};
use core_text::Document;
use macros::MacroState;
use search::SearchState;
use std::fmt;
use task::TaskState;

/// Per-document settings, resolved by the caller from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tab_size: usize,
    pub tab_expand: bool,
    pub auto_indent: bool,
    /// Forces a language instead of detecting it from the document name.
    pub language: Option<Language>,
    pub search_history_limit: usize,
}

impl Settings {
    pub const DEFAULT_TAB_SIZE: usize = 4;
    pub const DEFAULT_SEARCH_HISTORY_LIMIT: usize = 100;
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_size: Self::DEFAULT_TAB_SIZE,
            tab_expand: false,
            auto_indent: true,
            language: None,
            search_history_limit: Self::DEFAULT_SEARCH_HISTORY_LIMIT,
        }
    }
}

pub struct EditorState {
    buffer: BufferState,
    input_mode: InputMode,
    status: Option<StatusMsg>,
    clipboard: Clipboard,
    macros: MacroState,
    task: Option<TaskState>,
    timeline: FileTimeline,
    document_name: String,
    settings: Settings,
    next_task_id: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl EditorState {
    /// An editor holding an empty, unnamed document.
    pub fn new(settings: Settings) -> Self {
        Self {
            buffer: BufferState::new(Document::new(), &settings),
            input_mode: InputMode::Normal,
            status: None,
            clipboard: Clipboard::new(),
            macros: MacroState::default(),
            task: None,
            timeline: FileTimeline::new(),
            document_name: String::new(),
            settings,
            next_task_id: 0,
        }
    }

    pub fn buffer(&self) -> &BufferState {
        &self.buffer
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn status_msg(&self) -> Option<&StatusMsg> {
        self.status.as_ref()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn timeline(&self) -> &FileTimeline {
        &self.timeline
    }

    /// Name the current document was loaded under; empty when unnamed.
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("buffer", &self.buffer)
            .field("input_mode", &self.input_mode)
            .field("status", &self.status)
            .field("task_running", &self.task.is_some())
            .finish_non_exhaustive()
    }
}

/// The document being edited and everything derived from it.
pub struct BufferState {
    pub(crate) document: Document,
    pub(crate) cursor: CursorState,
    pub(crate) selector: Selector,
    pub(crate) view: ViewState,
    pub(crate) search: SearchState,
    pub(crate) undo_log: UndoLog,
    pub(crate) language: Language,
    pub(crate) tokenizer: Option<Box<dyn Tokenizer>>,
    pub(crate) tab_size: usize,
    pub(crate) tab_expand: bool,
    pub(crate) auto_indent: bool,
}

impl BufferState {
    pub(crate) fn new(document: Document, settings: &Settings) -> Self {
        Self {
            document,
            cursor: CursorState::default(),
            selector: Selector::default(),
            view: ViewState::default(),
            search: SearchState::default(),
            undo_log: UndoLog::new(),
            language: Language::Plaintext,
            tokenizer: None,
            tab_size: settings.tab_size.max(1),
            tab_expand: settings.tab_expand,
            auto_indent: settings.auto_indent,
        }
    }

    pub(crate) fn locator_params(&self) -> LocatorParams<'_> {
        LocatorParams {
            document: &self.document,
            cursor_pos: self.cursor.position,
            tab_size: self.tab_size,
            auto_indent: self.auto_indent,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> String {
        self.document.to_string()
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor.position
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selector.mode()
    }

    pub fn selected_region(&self) -> Region {
        self.selector.region(&self.document, self.cursor.position)
    }

    /// Locator reproducing the current selection's extent from another
    /// cursor position; `None` without a selection.
    pub fn selection_end_locator(&self) -> Option<Locator> {
        selection_end_locator(&self.document, self.cursor.position, &self.selector)
    }

    pub fn view_text_origin(&self) -> usize {
        self.view.text_origin
    }

    pub fn view_size(&self) -> (usize, usize) {
        (self.view.width, self.view.height)
    }

    pub fn search_query_and_direction(&self) -> (&str, SearchDirection) {
        (&self.search.query, self.search.direction)
    }

    pub fn search_match(&self) -> Option<SearchMatch> {
        self.search.current_match
    }

    pub fn search_history(&self) -> &[String] {
        &self.search.history
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn undo_log(&self) -> &UndoLog {
        &self.undo_log
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.undo_log.has_unsaved_changes()
    }
}

// The tokenizer is opaque and document text is never printed.
impl fmt::Debug for BufferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferState")
            .field("document", &self.document)
            .field("cursor", &self.cursor)
            .field("selector", &self.selector)
            .field("view", &self.view)
            .field("language", &self.language)
            .field("undo_depth", &self.undo_log.undo_depth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) fn state_with_text(text: &str) -> EditorState {
        state_with_settings(Settings::default(), text)
    }

    pub(crate) fn state_with_settings(settings: Settings, text: &str) -> EditorState {
        let mut st = EditorState::new(settings);
        st.load_document("", text, &Locator::Position(0));
        st
    }
}
