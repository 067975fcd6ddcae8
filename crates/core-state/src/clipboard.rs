//! Clipboard pages written by deletes and copies and read by paste.
//!
//! There is one default page plus named pages `a`-`z`. Each page remembers
//! whether its text was cut or copied as whole lines, which decides whether
//! a paste goes onto its own line.

use crate::EditorState;
use crate::locator::RangeLocator;
use crate::selection::SelectionMode;
use core_text::locate;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardPage {
    #[default]
    Default,
    /// Lowercase ASCII letter. Anything else addresses no page.
    Named(char),
}

impl ClipboardPage {
    pub fn for_input_char(c: char) -> Option<Self> {
        c.is_ascii_lowercase().then_some(ClipboardPage::Named(c))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub text: String,
    pub linewise: bool,
}

#[derive(Debug, Clone)]
pub struct Clipboard {
    default: PageContent,
    named: [PageContent; 26],
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self {
            default: PageContent::default(),
            named: std::array::from_fn(|_| PageContent::default()),
        }
    }

    fn named_index(c: char) -> Option<usize> {
        c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
    }

    pub fn set(&mut self, page: ClipboardPage, content: PageContent) {
        match page {
            ClipboardPage::Default => self.default = content,
            ClipboardPage::Named(c) => {
                if let Some(i) = Self::named_index(c) {
                    self.named[i] = content;
                }
            }
        }
    }

    /// Content of a page; empty when nothing was written to it.
    pub fn get(&self, page: ClipboardPage) -> PageContent {
        match page {
            ClipboardPage::Default => self.default.clone(),
            ClipboardPage::Named(c) => Self::named_index(c)
                .map(|i| self.named[i].clone())
                .unwrap_or_default(),
        }
    }
}

impl EditorState {
    /// Copy the cursor's line, without its terminator, as a linewise page.
    pub fn copy_line(&mut self, page: ClipboardPage) {
        let doc = &self.buffer.document;
        let start = locate::start_of_line_at_pos(doc, self.buffer.cursor.position);
        let end = locate::next_line_boundary(doc, true, start);
        let text = doc.slice_to_string(start, end);
        self.clipboard.set(
            page,
            PageContent {
                text,
                linewise: true,
            },
        );
    }

    /// Copy the selection, then move the cursor to its start.
    pub fn copy_selection(&mut self, page: ClipboardPage) {
        let mode = self.buffer.selector.mode();
        if mode == SelectionMode::None {
            return;
        }
        let region = self.buffer.selected_region();
        let text = self.buffer.document.slice_to_string(region.start, region.end);
        if text.is_empty() {
            return;
        }
        self.clipboard.set(
            page,
            PageContent {
                text,
                linewise: mode == SelectionMode::Line,
            },
        );
        self.move_cursor_to(region.start);
    }

    pub fn copy_range(&mut self, page: ClipboardPage, loc: &RangeLocator) {
        let (start, end) = loc.locate(&self.buffer.locator_params());
        let text = self.buffer.document.slice_to_string(start, end);
        if text.is_empty() {
            return;
        }
        self.clipboard.set(
            page,
            PageContent {
                text,
                linewise: false,
            },
        );
    }

    /// Paste after the cursor, or on a new line below it for linewise text.
    pub fn paste_after_cursor(&mut self, page: ClipboardPage) {
        let content = self.clipboard.get(page);
        let doc = &self.buffer.document;
        let mut pos = self.buffer.cursor.position;
        if content.linewise {
            pos = locate::next_line_boundary(doc, true, pos);
            if let Err(e) = self.insert_text_at_position("\n", pos, true) {
                warn!(target: "state.edit", error = %e, "paste_failed");
                return;
            }
            pos += 1;
        } else {
            pos = locate::next_char_in_line(doc, 1, true, pos);
        }
        if let Err(e) = self.insert_text_at_position(&content.text, pos, true) {
            warn!(target: "state.edit", error = %e, "paste_failed");
            return;
        }
        if content.linewise {
            self.move_cursor_to(pos);
        } else {
            let after = pos + content.text.chars().count();
            let target = locate::prev_char(&self.buffer.document, 1, after);
            self.move_cursor_to(target);
        }
    }

    /// Paste at the cursor, or on a new line above it for linewise text.
    pub fn paste_before_cursor(&mut self, page: ClipboardPage) {
        let content = self.clipboard.get(page);
        if content.text.is_empty() {
            return;
        }
        let cursor = self.buffer.cursor.position;
        if content.linewise {
            let line_start = locate::start_of_line_at_pos(&self.buffer.document, cursor);
            let text = format!("{}\n", content.text);
            if let Err(e) = self.insert_text_at_position(&text, line_start, true) {
                warn!(target: "state.edit", error = %e, "paste_failed");
                return;
            }
            self.move_cursor_to(line_start);
        } else {
            if let Err(e) = self.insert_text_at_position(&content.text, cursor, true) {
                warn!(target: "state.edit", error = %e, "paste_failed");
                return;
            }
            let after = cursor + content.text.chars().count();
            let target = locate::prev_char(&self.buffer.document, 1, after);
            self.move_cursor_to(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state_with_text;
    use crate::{Locator, SelectionMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn pages_are_independent() {
        let mut cb = Clipboard::new();
        cb.set(
            ClipboardPage::Named('q'),
            PageContent {
                text: "q".into(),
                linewise: true,
            },
        );
        assert_eq!(cb.get(ClipboardPage::Default), PageContent::default());
        assert_eq!(cb.get(ClipboardPage::Named('q')).text, "q");
        cb.set(
            ClipboardPage::Named('!'),
            PageContent {
                text: "x".into(),
                linewise: false,
            },
        );
        assert_eq!(cb.get(ClipboardPage::Named('!')), PageContent::default());
        assert_eq!(ClipboardPage::for_input_char('A'), None);
    }

    #[test]
    fn copy_line_then_paste_below() {
        let mut st = state_with_text("ab\ncd");
        st.copy_line(ClipboardPage::Default);
        assert_eq!(
            st.clipboard().get(ClipboardPage::Default),
            PageContent {
                text: "ab".into(),
                linewise: true
            }
        );
        st.paste_after_cursor(ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "ab\nab\ncd");
        assert_eq!(st.buffer().cursor_position(), 3);
    }

    #[test]
    fn charwise_paste_after_and_before() {
        let mut st = state_with_text("abc");
        st.move_cursor(&Locator::Position(1));
        st.select_range(&RangeLocator::Span { start: 1, end: 2 });
        st.copy_selection(ClipboardPage::Default);
        st.paste_after_cursor(ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "abbc");
        assert_eq!(st.buffer().cursor_position(), 2);
        st.paste_before_cursor(ClipboardPage::Default);
        assert_eq!(st.buffer().text(), "abbbc");
        assert_eq!(st.buffer().cursor_position(), 2);
    }

    #[test]
    fn linewise_paste_before_opens_line_above() {
        let mut st = state_with_text("one\ntwo");
        st.move_cursor(&Locator::Position(5));
        st.toggle_visual_mode(SelectionMode::Line);
        st.copy_selection(ClipboardPage::Named('a'));
        st.paste_before_cursor(ClipboardPage::Named('a'));
        assert_eq!(st.buffer().text(), "one\ntwo\ntwo");
        assert_eq!(st.buffer().cursor_position(), 4);
    }
}
