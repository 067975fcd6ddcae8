//! Viewport origin tracking.
//!
//! Scrolling is line-granular: the origin is always the start of a line and
//! long lines are assumed not to wrap.

use crate::EditorState;
use core_text::{Document, locate};
use serde::{Deserialize, Serialize};

/// Lines kept visible between the target and the edge of the view.
pub const SCROLL_MARGIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Position of the first character in the view.
    pub text_origin: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl EditorState {
    pub fn set_view_size(&mut self, width: usize, height: usize) {
        let view = &mut self.buffer.view;
        view.width = width;
        view.height = height;
        self.scroll_view_to_cursor();
    }

    pub fn scroll_view_to_cursor(&mut self) {
        let pos = self.buffer.cursor.position;
        self.scroll_view_to_position(pos);
    }

    pub(crate) fn scroll_view_to_position(&mut self, pos: usize) {
        let buffer = &mut self.buffer;
        buffer.view.text_origin = view_origin_after_scroll(
            &buffer.document,
            pos,
            buffer.view.text_origin,
            buffer.view.height,
        );
    }

    /// Move the view by whole lines without moving the cursor. Scrolling
    /// toward the end stops once the last line sits a margin above the
    /// bottom of the view.
    pub fn scroll_view_by_num_lines(&mut self, direction: ScrollDirection, num_lines: usize) {
        let buffer = &mut self.buffer;
        let doc = &buffer.document;
        let height = buffer.view.height;
        let origin_line = doc.line_num_for_pos(buffer.view.text_origin);
        let mut line = match direction {
            ScrollDirection::Forward => origin_line.saturating_add(num_lines),
            ScrollDirection::Backward => origin_line.saturating_sub(num_lines),
        };
        line = locate::closest_valid_line_num(doc, line);

        let last_line = locate::closest_valid_line_num(doc, doc.num_lines());
        if last_line - line < height {
            line = (last_line + SCROLL_MARGIN + 1).saturating_sub(height);
        }
        buffer.view.text_origin = doc.line_start_pos(line);
    }
}

/// Origin that keeps `pos` inside a view of `height` lines, moving the
/// current origin as little as possible.
pub fn view_origin_after_scroll(doc: &Document, pos: usize, origin: usize, height: usize) -> usize {
    if height == 0 {
        return origin;
    }
    let margin = SCROLL_MARGIN.min((height - 1) / 2);
    let origin_line = doc.line_num_for_pos(origin);
    let line = doc.line_num_for_pos(pos);
    let new_origin_line = if line < origin_line + margin {
        line.saturating_sub(margin)
    } else if line + margin >= origin_line + height {
        line + margin + 1 - height
    } else {
        origin_line
    };
    locate::start_of_line_num(doc, new_origin_line)
}
