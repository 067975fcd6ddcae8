//! Loading documents into the buffer.
//!
//! The engine never touches the file system. Callers hand over text (or a
//! loader closure for timeline navigation) and the buffer is rebuilt from it.

use crate::cursor::CursorState;
use crate::locator::Locator;
use crate::mode::InputMode;
use crate::search::SearchState;
use crate::status::StatusMsg;
use crate::timeline::TimelineState;
use crate::{BufferState, EditorState};
use core_syntax::Language;
use core_text::{Document, locate};
use std::io;
use tracing::{info, warn};

impl EditorState {
    /// Replace the buffer with `text`, remembering where the previous
    /// document was left, and place the cursor at `cursor_loc`.
    pub fn load_document(&mut self, name: &str, text: &str, cursor_loc: &Locator) {
        let from = self.current_timeline_state();
        self.reset_buffer(name, text);
        if !from.is_empty() {
            self.timeline.transition_from(from);
        }
        self.set_cursor_after_load(cursor_loc);
        info!(target: "state.document", chars = self.buffer.document.num_chars(), "document_loaded");
    }

    /// Replace the text of the current document, keeping the cursor's line
    /// and column, the scroll position and the search query.
    pub fn reload_document(&mut self, text: &str) {
        let doc = &self.buffer.document;
        let (line, col) = locate::pos_to_line_and_col(doc, self.buffer.cursor.position);
        let origin_line = doc.line_num_for_pos(self.buffer.view.text_origin);
        let old_search = std::mem::take(&mut self.buffer.search);

        let name = self.document_name.clone();
        self.reset_buffer(&name, text);

        let doc = &self.buffer.document;
        self.buffer.cursor = CursorState::at(locate::line_and_col_to_pos(doc, line, col));
        self.buffer.view.text_origin = locate::start_of_line_num(doc, origin_line);
        self.scroll_view_to_cursor();

        self.buffer.search = SearchState {
            query: old_search.query,
            direction: old_search.direction,
            history_idx: old_search.history.len(),
            history: old_search.history,
            ..SearchState::default()
        };
        self.mark_saved();
        info!(target: "state.document", chars = self.buffer.document.num_chars(), "document_reloaded");
    }

    /// Reopen the document before the current one in the timeline, at the
    /// line and column it was left at.
    pub fn load_prev_document(&mut self, load: impl FnOnce(&str) -> io::Result<String>) {
        let Some(prev) = self.timeline.peek_backward().cloned() else {
            self.set_status_msg(StatusMsg::error("No previous document to open"));
            return;
        };
        let Some(text) = self.load_with(&prev.name, load) else {
            return;
        };
        let from = self.current_timeline_state();
        self.reset_buffer(&prev.name, &text);
        self.timeline.transition_backward_from(from);
        self.finish_timeline_load(&prev);
    }

    pub fn load_next_document(&mut self, load: impl FnOnce(&str) -> io::Result<String>) {
        let Some(next) = self.timeline.peek_forward().cloned() else {
            self.set_status_msg(StatusMsg::error("No next document to open"));
            return;
        };
        let Some(text) = self.load_with(&next.name, load) else {
            return;
        };
        let from = self.current_timeline_state();
        self.reset_buffer(&next.name, &text);
        self.timeline.transition_forward_from(from);
        self.finish_timeline_load(&next);
    }

    fn load_with(&mut self, name: &str, load: impl FnOnce(&str) -> io::Result<String>) -> Option<String> {
        match load(name) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(target: "state.document", error = %e, "document_load_failed");
                self.set_status_msg(StatusMsg::error(format!("Could not open {name}: {e}")));
                None
            }
        }
    }

    fn finish_timeline_load(&mut self, target: &TimelineState) {
        self.set_cursor_after_load(&Locator::LineAndCol {
            line: target.line,
            col: target.col,
        });
        self.set_status_msg(StatusMsg::success(format!("Opened {}", target.name)));
    }

    fn current_timeline_state(&self) -> TimelineState {
        let (line, col) =
            locate::pos_to_line_and_col(&self.buffer.document, self.buffer.cursor.position);
        TimelineState {
            name: self.document_name.clone(),
            line,
            col,
        }
    }

    fn reset_buffer(&mut self, name: &str, text: &str) {
        self.cancel_task_if_running();
        self.set_input_mode_raw(InputMode::Normal);
        self.document_name = name.to_string();

        let (width, height) = (self.buffer.view.width, self.buffer.view.height);
        self.buffer = BufferState::new(Document::from_text(text), &self.settings);
        self.buffer.view.width = width;
        self.buffer.view.height = height;

        let language = self
            .settings
            .language
            .unwrap_or_else(|| Language::from_name(name));
        self.set_syntax(language);
    }

    // Visit the last line first so the target ends up near the top of the
    // view rather than the bottom.
    fn set_cursor_after_load(&mut self, cursor_loc: &Locator) {
        self.move_cursor(&Locator::StartOfLastLine);
        self.scroll_view_to_cursor();
        self.move_cursor(cursor_loc);
        self.scroll_view_to_cursor();
        self.mark_saved();
    }
}
