//! Document mutation.
//!
//! Every change funnels through [`EditorState::insert_text_at_position`] and
//! [`EditorState::delete_chars`]. Those two apply the change, hand an
//! [`Edit`] to the tokenizer and, unless replaying undo history, log an
//! [`Op`]. The commands above them only decide where to insert or delete and
//! where the cursor ends up.

use crate::EditorState;
use crate::clipboard::{ClipboardPage, PageContent};
use crate::cursor::CursorState;
use crate::locator::Locator;
use crate::selection::SelectionMode;
use crate::undo::Op;
use core_syntax::Edit;
use core_text::{DocumentError, cell_width, locate};
use tracing::{error, trace, warn};

impl EditorState {
    pub(crate) fn insert_text_at_position(
        &mut self,
        text: &str,
        pos: usize,
        update_undo_log: bool,
    ) -> Result<(), DocumentError> {
        let buffer = &mut self.buffer;
        let pending = Edit::begin(&buffer.document, pos, 0);
        buffer.document.insert_str(pos, text)?;
        let num_inserted = text.chars().count();
        let edit = pending.finish(&buffer.document, num_inserted);
        buffer.retokenize_after_edit(&edit);
        if update_undo_log && !text.is_empty() {
            buffer.undo_log.track_op(Op::Insert {
                pos,
                text: text.to_string(),
            });
        }
        trace!(target: "state.edit", pos, num_inserted, "insert");
        Ok(())
    }

    /// Delete up to `count` codepoints at `pos`, returning what was removed.
    pub(crate) fn delete_chars(&mut self, pos: usize, count: usize, update_undo_log: bool) -> String {
        let buffer = &mut self.buffer;
        let count = count.min(buffer.document.num_chars().saturating_sub(pos));
        if count == 0 {
            return String::new();
        }
        let pending = Edit::begin(&buffer.document, pos, count);
        let deleted = buffer.document.delete_range(pos, count);
        if deleted.is_empty() {
            return deleted;
        }
        let edit = pending.finish(&buffer.document, 0);
        buffer.retokenize_after_edit(&edit);
        if update_undo_log {
            buffer.undo_log.track_op(Op::Delete {
                pos,
                text: deleted.clone(),
            });
        }
        trace!(target: "state.edit", pos, num_deleted = deleted.chars().count(), "delete");
        deleted
    }

    // Inserts at positions derived from the current document cannot fail;
    // a failure is logged and the command stops.
    fn insert_or_log(&mut self, text: &str, pos: usize) -> bool {
        match self.insert_text_at_position(text, pos, true) {
            Ok(()) => true,
            Err(e) => {
                error!(target: "state.edit", pos, error = %e, "insert_failed");
                false
            }
        }
    }

    pub fn insert_rune(&mut self, c: char) {
        let start = self.buffer.cursor.position;
        let mut buf = [0u8; 4];
        if let Err(e) = self.insert_text_at_position(c.encode_utf8(&mut buf), start, true) {
            warn!(target: "state.edit", pos = start, error = %e, "insert_rune_skipped");
            return;
        }
        self.buffer.cursor = CursorState::at(start + 1);
    }

    /// Insert text at the cursor and place the cursor after it.
    pub fn insert_text(&mut self, text: &str) {
        let start = self.buffer.cursor.position;
        if let Err(e) = self.insert_text_at_position(text, start, true) {
            warn!(target: "state.edit", pos = start, error = %e, "insert_text_skipped");
            return;
        }
        self.buffer.cursor = CursorState::at(start + text.chars().count());
    }

    /// Insert raw bytes at the cursor. Malformed UTF-8 is logged and dropped
    /// without touching the document.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.insert_text(text),
            Err(e) => {
                warn!(target: "state.edit", len = bytes.len(), error = %e, "invalid_utf8_skipped");
            }
        }
    }

    /// Break the line at the cursor. With auto-indent the new line copies the
    /// previous line's indentation, replacing any whitespace carried over.
    pub fn insert_newline(&mut self) {
        let mut pos = self.buffer.cursor.position;
        if !self.insert_or_log("\n", pos) {
            return;
        }
        pos += 1;
        if self.buffer.auto_indent {
            let end = locate::next_non_whitespace_or_newline(&self.buffer.document, pos);
            self.delete_chars(pos, end - pos, true);
            let num_cols = self.indent_of_prev_line(pos);
            pos = self.indent_from_pos(pos, num_cols);
        }
        self.buffer.cursor = CursorState::at(pos);
    }

    fn indent_of_prev_line(&self, pos: usize) -> usize {
        let doc = &self.buffer.document;
        let line = doc.line_num_for_pos(pos);
        if line == 0 {
            return 0;
        }
        let tab_size = self.buffer.tab_size;
        let mut num_cols = 0;
        for c in doc.forward_clusters(doc.line_start_pos(line - 1)) {
            if !matches!(c.first_char(), Some(' ' | '\t')) {
                break;
            }
            num_cols += cell_width(c.as_str(), num_cols, tab_size);
        }
        num_cols
    }

    fn indent_from_pos(&mut self, mut pos: usize, num_cols: usize) -> usize {
        let (tab_size, tab_expand) = (self.buffer.tab_size, self.buffer.tab_expand);
        let mut i = 0;
        while i < num_cols {
            let (text, width) = if !tab_expand && num_cols - i >= tab_size {
                ("\t", tab_size)
            } else {
                (" ", 1)
            };
            if !self.insert_or_log(text, pos) {
                break;
            }
            i += width;
            pos += 1;
        }
        pos
    }

    pub fn insert_tab(&mut self) {
        let pos = self.buffer.cursor.position;
        let new_pos = self.insert_tab_at_pos(pos);
        self.buffer.cursor = CursorState::at(new_pos);
    }

    // A tab character, or spaces up to the next tab stop when expanding.
    fn insert_tab_at_pos(&mut self, pos: usize) -> usize {
        if !self.buffer.tab_expand {
            return if self.insert_or_log("\t", pos) { pos + 1 } else { pos };
        }
        let tab_size = self.buffer.tab_size;
        let offset = locate::offset_in_line(&self.buffer.document, tab_size, pos);
        let num_spaces = tab_size - offset % tab_size;
        if self.insert_or_log(&" ".repeat(num_spaces), pos) {
            pos + num_spaces
        } else {
            pos
        }
    }

    /// Delete between the cursor and the located position, in either
    /// direction. The cursor lands at the start of the deleted span.
    pub fn delete_to_pos(&mut self, loc: &Locator, page: ClipboardPage) {
        let start = self.buffer.cursor.position;
        let target = loc.locate(&self.buffer.locator_params());
        let deleted = if start < target {
            let deleted = self.delete_chars(start, target - start, true);
            self.buffer.cursor = CursorState::at(start);
            deleted
        } else if start > target {
            let deleted = self.delete_chars(target, start - target, true);
            self.buffer.cursor = CursorState::at(target);
            deleted
        } else {
            String::new()
        };
        if !deleted.is_empty() {
            self.clipboard.set(
                page,
                PageContent {
                    text: deleted,
                    linewise: false,
                },
            );
        }
    }

    pub fn delete_selection(&mut self, replace_with_empty_line: bool, page: ClipboardPage) {
        let mode = self.buffer.selector.mode();
        if mode == SelectionMode::None {
            return;
        }
        let region = self.buffer.selected_region();
        self.move_cursor_to(region.start);
        let end = Locator::Position(region.end);
        match mode {
            SelectionMode::Char => self.delete_to_pos(&end, page),
            SelectionMode::Line => self.delete_lines(&end, false, replace_with_empty_line, page),
            SelectionMode::None => {}
        }
    }

    /// Delete every line from the cursor's line through the located line.
    pub fn delete_lines(
        &mut self,
        target: &Locator,
        abort_if_same_line: bool,
        replace_with_empty_line: bool,
        page: ClipboardPage,
    ) {
        let doc = &self.buffer.document;
        let mut current_line = doc.line_num_for_pos(self.buffer.cursor.position);
        let target_pos = target.locate(&self.buffer.locator_params());
        let mut target_line = doc.line_num_for_pos(target_pos);
        if target_line == current_line && abort_if_same_line {
            return;
        }
        if target_line < current_line {
            std::mem::swap(&mut current_line, &mut target_line);
        }

        let mut deleted_lines = Vec::with_capacity(target_line - current_line + 1);
        let mut deleted_last_line = false;
        for _ in current_line..=target_line {
            let (text, is_last_line) = self.delete_line(current_line);
            deleted_last_line |= is_last_line;
            if !text.is_empty() {
                deleted_lines.push(strip_newlines(&text).to_string());
            }
        }

        if replace_with_empty_line {
            let cursor = self.buffer.cursor.position;
            if deleted_last_line {
                let pos = locate::next_line_boundary(&self.buffer.document, true, cursor);
                if pos > 0 && self.insert_or_log("\n", pos) {
                    self.move_cursor_to(pos + 1);
                }
            } else {
                self.insert_or_log("\n", cursor);
            }
        }

        if !deleted_lines.is_empty() {
            self.clipboard.set(
                page,
                PageContent {
                    text: deleted_lines.join("\n"),
                    linewise: true,
                },
            );
        }
    }

    fn delete_line(&mut self, line: usize) -> (String, bool) {
        let doc = &self.buffer.document;
        let mut start = doc.line_start_pos(line);
        let next_start = doc.line_start_pos(line + 1);
        let is_last_line = line + 1 >= doc.num_lines();
        // The last line has no terminator of its own; take the one before it.
        if is_last_line && start > 0 {
            start -= 1;
        }
        let deleted = self.delete_chars(start, next_start - start, true);
        let doc = &self.buffer.document;
        self.buffer.cursor = if start >= doc.num_chars() {
            CursorState::at(locate::start_of_last_line(doc))
        } else {
            CursorState::at(start)
        };
        (deleted, is_last_line)
    }

    /// Replace the cluster under the cursor. Nothing happens on an empty line.
    pub fn replace_char(&mut self, text: &str) {
        let cursor = self.buffer.cursor.position;
        let next = locate::next_char_in_line(&self.buffer.document, 1, true, cursor);
        if next == cursor {
            return;
        }
        self.delete_chars(cursor, next - cursor, true);
        if let Err(e) = self.insert_text_at_position(text, cursor, true) {
            warn!(target: "state.edit", pos = cursor, error = %e, "replace_char_skipped");
        }
        // Replacing with a line break moves onto the new line.
        self.buffer.cursor.position = if text == "\n" {
            cursor + text.chars().count()
        } else {
            cursor
        };
    }

    /// Join the next line onto the cursor's line with a single space,
    /// dropping the next line's indentation.
    pub fn join_lines(&mut self) {
        let cursor = self.buffer.cursor.position;
        let Some((nl_pos, nl_len)) = locate::next_newline(&self.buffer.document, cursor) else {
            return;
        };
        let indent_end = locate::next_non_whitespace_or_newline(&self.buffer.document, nl_pos + nl_len);
        self.delete_chars(nl_pos, indent_end - nl_pos, true);
        if !self.insert_or_log(" ", nl_pos) {
            return;
        }
        self.move_cursor_to(nl_pos);
        if self.is_adjacent_to_newline_or_eof(nl_pos) {
            self.delete_chars(nl_pos, 1, true);
        }
        let pos = locate::closest_char_on_line(&self.buffer.document, self.buffer.cursor.position);
        self.move_cursor_to(pos);
    }

    fn is_adjacent_to_newline_or_eof(&self, pos: usize) -> bool {
        let doc = &self.buffer.document;
        let mut forward = doc.forward_clusters(pos);
        forward.next();
        match forward.next() {
            None => return true,
            Some(c) if c.has_newline() => return true,
            Some(_) => {}
        }
        match doc.backward_clusters(pos).next() {
            None => true,
            Some(c) => c.has_newline(),
        }
    }

    /// Toggle the case of the cluster under the cursor and step past it.
    pub fn toggle_case_at_cursor(&mut self) {
        let start = self.buffer.cursor.position;
        let end = locate::next_char_in_line(&self.buffer.document, 1, true, start);
        self.toggle_case_for_range(start, end);
        let next = locate::next_char_in_line(&self.buffer.document, 1, false, start);
        self.move_cursor_to(next);
    }

    /// Toggle case from the cursor to `selection_end`. The caller moves the
    /// cursor to the start of the selection first, which lets a repeat
    /// apply the same extent from wherever the cursor is then.
    pub fn toggle_case_in_selection(&mut self, selection_end: &Locator) {
        let cursor = self.buffer.cursor.position;
        let end = selection_end.locate(&self.buffer.locator_params());
        let (start, end) = (cursor.min(end), cursor.max(end));
        self.toggle_case_for_range(start, end);
        self.move_cursor_to(start);
    }

    fn toggle_case_for_range(&mut self, start: usize, end: usize) {
        let toggled: String = self
            .buffer
            .document
            .chars_at(start)
            .take(end.saturating_sub(start))
            .map(toggle_char_case)
            .collect();
        if toggled.is_empty() {
            return;
        }
        self.delete_chars(start, toggled.chars().count(), true);
        self.insert_or_log(&toggled, start);
    }

    pub fn indent_line_at_cursor(&mut self) {
        let line_start = self.indent_line_at_pos(self.buffer.cursor.position);
        let pos = locate::next_non_whitespace_or_newline(&self.buffer.document, line_start);
        self.buffer.cursor = CursorState::at(pos);
    }

    fn indent_line_at_pos(&mut self, pos: usize) -> usize {
        let doc = &self.buffer.document;
        let line_start = locate::start_of_line_at_pos(doc, pos);
        let line_end = locate::next_line_boundary(doc, false, line_start);
        // Empty lines stay empty.
        if line_start < line_end {
            self.insert_tab_at_pos(line_start);
        }
        line_start
    }

    pub fn outdent_line_at_cursor(&mut self) {
        let line_start = self.outdent_line_at_pos(self.buffer.cursor.position);
        let pos = locate::next_non_whitespace_or_newline(&self.buffer.document, line_start);
        self.buffer.cursor = CursorState::at(pos);
    }

    fn outdent_line_at_pos(&mut self, pos: usize) -> usize {
        let line_start = locate::start_of_line_at_pos(&self.buffer.document, pos);
        let count = self.num_chars_in_first_indent(line_start);
        self.delete_chars(line_start, count, true);
        line_start
    }

    // Leading whitespace up to one tab stop wide.
    fn num_chars_in_first_indent(&self, line_start: usize) -> usize {
        let doc = &self.buffer.document;
        let tab_size = self.buffer.tab_size;
        let indent_end = locate::next_non_whitespace_or_newline(doc, line_start);
        let (mut pos, mut offset) = (line_start, 0);
        for c in doc.forward_clusters(line_start) {
            if pos >= indent_end || offset >= tab_size {
                break;
            }
            offset += cell_width(c.as_str(), offset, tab_size);
            pos += c.num_chars();
        }
        pos - line_start
    }

    pub fn indent_selection(&mut self, selection_end: &Locator) {
        self.change_indentation_for_lines(selection_end, |st, pos| {
            st.indent_line_at_pos(pos);
        });
    }

    pub fn outdent_selection(&mut self, selection_end: &Locator) {
        self.change_indentation_for_lines(selection_end, |st, pos| {
            st.outdent_line_at_pos(pos);
        });
    }

    // Every line between the cursor and `selection_end`, inclusive.
    fn change_indentation_for_lines(
        &mut self,
        selection_end: &Locator,
        f: impl Fn(&mut EditorState, usize),
    ) {
        let cursor = self.buffer.cursor.position;
        let end = selection_end.locate(&self.buffer.locator_params());
        let doc = &self.buffer.document;
        let (first, last) = (cursor.min(end), cursor.max(end));
        let start_line = doc.line_num_for_pos(first);
        let end_line = doc.line_num_for_pos(last);
        for line in start_line..=end_line {
            let pos = locate::start_of_line_num(&self.buffer.document, line);
            f(self, pos);
        }
        let doc = &self.buffer.document;
        let first_line_start = locate::start_of_line_num(doc, start_line);
        let pos = locate::next_non_whitespace_or_newline(doc, first_line_start);
        self.buffer.cursor = CursorState::at(pos);
    }
}

fn strip_newlines(s: &str) -> &str {
    let s = s.strip_prefix('\n').unwrap_or(s);
    s.strip_suffix('\n').unwrap_or(s)
}

// Case mappings that change the number of codepoints leave the char as is.
fn toggle_char_case(c: char) -> char {
    if c.is_lowercase() {
        single_char(c.to_uppercase()).unwrap_or(c)
    } else if c.is_uppercase() {
        single_char(c.to_lowercase()).unwrap_or(c)
    } else {
        c
    }
}

fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{state_with_settings, state_with_text};
    use crate::{ClipboardPage, Locator, SelectionMode, Settings};
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_rune_advances_cursor() {
        let mut st = state_with_text("ac");
        st.move_cursor(&Locator::Position(1));
        st.insert_rune('b');
        assert_eq!(st.buffer().text(), "abc");
        assert_eq!(st.buffer().cursor_position(), 2);
    }

    #[test]
    fn insert_bytes_skips_malformed_input() {
        let mut st = state_with_text("ab");
        st.insert_bytes(&[0xc3, 0x28]);
        assert_eq!(st.buffer().text(), "ab");
        assert!(!st.buffer().has_unsaved_changes());
        st.insert_bytes("é".as_bytes());
        assert_eq!(st.buffer().text(), "éab");
        assert_eq!(st.buffer().cursor_position(), 1);
    }

    #[test]
    fn newline_copies_indentation() {
        let mut st = state_with_text("\tfoo");
        st.move_cursor(&Locator::Position(4));
        st.insert_newline();
        assert_eq!(st.buffer().text(), "\tfoo\n\t");
        assert_eq!(st.buffer().cursor_position(), 6);
    }

    #[test]
    fn newline_indents_with_spaces_when_expanding() {
        let settings = Settings {
            tab_expand: true,
            ..Settings::default()
        };
        let mut st = state_with_settings(settings, "      ab  cd");
        st.move_cursor(&Locator::Position(8));
        st.insert_newline();
        assert_eq!(st.buffer().text(), "      ab\n      cd");
        assert_eq!(st.buffer().cursor_position(), 15);
    }

    #[test]
    fn newline_without_auto_indent() {
        let settings = Settings {
            auto_indent: false,
            ..Settings::default()
        };
        let mut st = state_with_settings(settings, "  ab");
        st.move_cursor(&Locator::Position(4));
        st.insert_newline();
        assert_eq!(st.buffer().text(), "  ab\n");
        assert_eq!(st.buffer().cursor_position(), 5);
    }

    #[test]
    fn tab_expands_to_next_stop() {
        let settings = Settings {
            tab_expand: true,
            ..Settings::default()
        };
        let mut st = state_with_settings(settings, "ab");
        st.move_cursor(&Locator::Position(2));
        st.insert_tab();
        assert_eq!(st.buffer().text(), "ab  ");
        assert_eq!(st.buffer().cursor_position(), 4);

        let mut st = state_with_text("ab");
        st.insert_tab();
        assert_eq!(st.buffer().text(), "\tab");
        assert_eq!(st.buffer().cursor_position(), 1);
    }

    #[test]
    fn delete_to_pos_in_both_directions() {
        let mut st = state_with_text("hello world");
        st.move_cursor(&Locator::Position(6));
        st.delete_to_pos(&Locator::Position(11), ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "hello ");
        assert_eq!(st.buffer().cursor_position(), 6);
        assert_eq!(st.clipboard().get(ClipboardPage::Default).text, "world");

        st.delete_to_pos(&Locator::Position(0), ClipboardPage::Named('b'));
        assert_eq!(st.buffer().text(), "");
        assert_eq!(st.buffer().cursor_position(), 0);
        assert_eq!(st.clipboard().get(ClipboardPage::Named('b')).text, "hello ");
    }

    #[test]
    fn delete_lines_across_range() {
        let mut st = state_with_text("a\nb\nc\nd");
        st.move_cursor(&Locator::Position(4));
        st.delete_lines(
            &Locator::StartOfLineAbove { count: 1 },
            false,
            false,
            ClipboardPage::Default,
        );
        assert_eq!(st.buffer().text(), "a\nd");
        assert_eq!(st.buffer().cursor_position(), 2);
        let page = st.clipboard().get(ClipboardPage::Default);
        assert_eq!(page.text, "b\nc");
        assert!(page.linewise);
    }

    #[test]
    fn delete_last_line_takes_preceding_newline() {
        let mut st = state_with_text("a\nb");
        st.move_cursor(&Locator::Position(2));
        st.delete_lines(&Locator::Cursor, false, false, ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "a");
        assert_eq!(st.buffer().cursor_position(), 0);
        assert_eq!(st.clipboard().get(ClipboardPage::Default).text, "b");
    }

    #[test]
    fn delete_lines_can_leave_an_empty_line() {
        let mut st = state_with_text("a\nb\nc");
        st.move_cursor(&Locator::Position(2));
        st.delete_lines(&Locator::Cursor, false, true, ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "a\n\nc");
        assert_eq!(st.buffer().cursor_position(), 2);

        let mut st = state_with_text("a\nb");
        st.move_cursor(&Locator::Position(2));
        st.delete_lines(&Locator::Cursor, false, true, ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "a\n");
        assert_eq!(st.buffer().cursor_position(), 2);
    }

    #[test]
    fn delete_lines_abort_on_same_line() {
        let mut st = state_with_text("a\nb");
        st.delete_lines(&Locator::Cursor, true, false, ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "a\nb");
    }

    #[test]
    fn delete_char_selection() {
        let mut st = state_with_text("abcdef");
        st.move_cursor(&Locator::Position(1));
        st.toggle_visual_mode(SelectionMode::Char);
        st.move_cursor(&Locator::Position(3));
        st.delete_selection(false, ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "aef");
        assert_eq!(st.buffer().cursor_position(), 1);
        assert_eq!(st.clipboard().get(ClipboardPage::Default).text, "bcd");
    }

    #[test]
    fn replace_char_keeps_cursor() {
        let mut st = state_with_text("abc\n\nx");
        st.move_cursor(&Locator::Position(1));
        st.replace_char("Z");
        assert_eq!(st.buffer().text(), "aZc\n\nx");
        assert_eq!(st.buffer().cursor_position(), 1);
        st.replace_char("\n");
        assert_eq!(st.buffer().text(), "a\nc\n\nx");
        assert_eq!(st.buffer().cursor_position(), 2);
        // Empty line: nothing under the cursor to replace.
        st.move_cursor(&Locator::Position(4));
        st.replace_char("Q");
        assert_eq!(st.buffer().text(), "a\nc\n\nx");
    }

    #[test]
    fn join_lines_collapses_indentation() {
        let mut st = state_with_text("abc\n    def");
        st.join_lines();
        assert_eq!(st.buffer().text(), "abc def");
        assert_eq!(st.buffer().cursor_position(), 3);
    }

    #[test]
    fn join_with_empty_line_adds_no_space() {
        let mut st = state_with_text("abc\n\ndef");
        st.join_lines();
        assert_eq!(st.buffer().text(), "abc\ndef");
        assert_eq!(st.buffer().cursor_position(), 2);

        let mut st = state_with_text("abc");
        st.join_lines();
        assert_eq!(st.buffer().text(), "abc");
    }

    #[test]
    fn toggle_case() {
        let mut st = state_with_text("aBc");
        st.toggle_case_at_cursor();
        assert_eq!(st.buffer().text(), "ABc");
        assert_eq!(st.buffer().cursor_position(), 1);
        st.toggle_visual_mode(SelectionMode::Char);
        st.move_cursor(&Locator::Position(2));
        let end = st.buffer().selection_end_locator().unwrap();
        st.move_cursor_to_start_of_selection();
        st.toggle_case_in_selection(&end);
        assert_eq!(st.buffer().text(), "AbC");
        assert_eq!(st.buffer().cursor_position(), 1);
    }

    #[test]
    fn indent_and_outdent() {
        let mut st = state_with_text("ab\n\ncd");
        st.indent_line_at_cursor();
        assert_eq!(st.buffer().text(), "\tab\n\ncd");
        assert_eq!(st.buffer().cursor_position(), 1);
        st.outdent_line_at_cursor();
        assert_eq!(st.buffer().text(), "ab\n\ncd");
        assert_eq!(st.buffer().cursor_position(), 0);

        st.toggle_visual_mode(SelectionMode::Line);
        st.move_cursor(&Locator::Position(4));
        let end = st.buffer().selection_end_locator().unwrap();
        st.move_cursor_to_start_of_selection();
        st.indent_selection(&end);
        assert_eq!(st.buffer().text(), "\tab\n\n\tcd");
        assert_eq!(st.buffer().cursor_position(), 1);
    }

    #[test]
    fn outdent_removes_one_stop_of_spaces() {
        let mut st = state_with_text("      ab");
        st.outdent_line_at_cursor();
        assert_eq!(st.buffer().text(), "  ab");
        assert_eq!(st.buffer().cursor_position(), 2);
    }
}
