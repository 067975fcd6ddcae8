//! Cursor motion.
//!
//! Vertical moves remember the column the cursor wanted to be in. When the
//! target line is too short the shortfall is kept in `logical_offset`, so
//! moving through a short line and back restores the original column.

use crate::EditorState;
use crate::locator::{Locator, RangeLocator};
use crate::selection::SelectionMode;
use core_text::{Document, cell_width, locate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub position: usize,
    /// Cells past the end of the current line the cursor would like to be.
    pub logical_offset: usize,
}

impl CursorState {
    pub fn at(position: usize) -> Self {
        Self {
            position,
            logical_offset: 0,
        }
    }
}

impl EditorState {
    /// Move to the located position, clamped to the document.
    ///
    /// The logical offset survives only when the position does not change,
    /// so a motion blocked at the end of a short line keeps the column memory.
    pub fn move_cursor(&mut self, loc: &Locator) {
        let new_pos = loc.locate(&self.buffer.locator_params());
        self.move_cursor_to(new_pos);
    }

    pub(crate) fn move_cursor_to(&mut self, pos: usize) {
        let buffer = &mut self.buffer;
        let n = buffer.document.num_chars();
        let new_pos = if pos > n { n.saturating_sub(1) } else { pos };
        let logical_offset = if new_pos == buffer.cursor.position {
            buffer.cursor.logical_offset
        } else {
            0
        };
        buffer.cursor = CursorState {
            position: new_pos,
            logical_offset,
        };
    }

    pub fn move_cursor_to_line_above(&mut self, count: usize) {
        let doc = &self.buffer.document;
        let target = locate::start_of_line_above(doc, count, self.buffer.cursor.position);
        self.move_cursor_to_line(target);
    }

    pub fn move_cursor_to_line_below(&mut self, count: usize) {
        let doc = &self.buffer.document;
        let target = locate::start_of_line_below(doc, count, self.buffer.cursor.position);
        self.move_cursor_to_line(target);
    }

    fn move_cursor_to_line(&mut self, target_line_start: usize) {
        let buffer = &mut self.buffer;
        let doc = &buffer.document;
        let line_start = locate::start_of_line_at_pos(doc, buffer.cursor.position);
        if target_line_start == line_start {
            return;
        }
        let target_offset = offset_from_line_start(doc, line_start, buffer.cursor, buffer.tab_size);
        let (position, actual_offset) =
            advance_to_offset(doc, target_line_start, target_offset, buffer.tab_size);
        buffer.cursor = CursorState {
            position,
            logical_offset: target_offset - actual_offset,
        };
    }

    /// Jump to the start of the selected region. No-op without a selection.
    pub fn move_cursor_to_start_of_selection(&mut self) {
        if self.buffer.selector.mode() == SelectionMode::None {
            return;
        }
        let region = self.buffer.selected_region();
        self.move_cursor_to(region.start);
    }

    /// Select the located range as a char selection ending under the cursor.
    pub fn select_range(&mut self, loc: &RangeLocator) {
        let (start, end) = loc.locate(&self.buffer.locator_params());
        let selector = &mut self.buffer.selector;
        selector.clear();
        selector.start(SelectionMode::Char, start);
        self.move_cursor_to(end.saturating_sub(1));
    }
}

// Visual column of the cursor plus any remembered overshoot.
fn offset_from_line_start(
    doc: &Document,
    line_start: usize,
    cursor: CursorState,
    tab_size: usize,
) -> usize {
    let (mut pos, mut offset) = (line_start, 0);
    for c in doc.forward_clusters(line_start) {
        if pos >= cursor.position {
            break;
        }
        offset += cell_width(c.as_str(), offset, tab_size);
        pos += c.num_chars();
    }
    offset + cursor.logical_offset
}

// Walk the target line until the next cluster would pass `target_offset`.
// Returns the position reached and the column it sits at.
fn advance_to_offset(
    doc: &Document,
    line_start: usize,
    target_offset: usize,
    tab_size: usize,
) -> (usize, usize) {
    let mut end_of_line_or_file = true;
    let (mut prev_pos_offset, mut pos_offset, mut cell_offset) = (0, 0, 0);
    for c in doc.forward_clusters(line_start) {
        if c.has_newline() {
            break;
        }
        let width = cell_width(c.as_str(), cell_offset, tab_size);
        if cell_offset + width > target_offset {
            end_of_line_or_file = false;
            break;
        }
        cell_offset += width;
        prev_pos_offset = pos_offset;
        pos_offset += c.num_chars();
    }
    if end_of_line_or_file {
        // Rest on the last cluster rather than the terminator.
        if cell_offset > 0 {
            cell_offset -= 1;
        }
        return (line_start + prev_pos_offset, cell_offset);
    }
    (line_start + pos_offset, cell_offset)
}

#[cfg(test)]
mod tests {
    use crate::test_support::state_with_text;
    use crate::{Locator, RangeLocator, SelectionMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn move_cursor_clamps_past_end() {
        let mut st = state_with_text("abc");
        st.move_cursor(&Locator::Position(10));
        assert_eq!(st.buffer().cursor_position(), 2);
        // The end of the document itself is a valid insertion point.
        st.move_cursor(&Locator::Position(3));
        assert_eq!(st.buffer().cursor_position(), 3);

        let mut empty = state_with_text("");
        empty.move_cursor(&Locator::Position(5));
        assert_eq!(empty.buffer().cursor_position(), 0);
    }

    #[test]
    fn vertical_moves_remember_column() {
        let mut st = state_with_text("abcdefgh\n\nijkl");
        st.move_cursor(&Locator::Position(7));
        st.move_cursor_to_line_below(1);
        assert_eq!(st.buffer().cursor_position(), 9);
        st.move_cursor_to_line_below(1);
        assert_eq!(st.buffer().cursor_position(), 13);
        st.move_cursor_to_line_above(1);
        assert_eq!(st.buffer().cursor_position(), 9);
        st.move_cursor_to_line_above(1);
        assert_eq!(st.buffer().cursor_position(), 7);
    }

    #[test]
    fn blocked_motion_keeps_logical_offset() {
        let mut st = state_with_text("abcdefgh\nij\nabcdefgh");
        st.move_cursor(&Locator::Position(6));
        st.move_cursor_to_line_below(1);
        assert_eq!(st.buffer().cursor_position(), 10);
        assert_eq!(st.buffer().cursor().logical_offset, 5);
        st.move_cursor(&Locator::NextCharInLine {
            count: 1,
            include_end_of_line_or_file: false,
        });
        assert_eq!(st.buffer().cursor().logical_offset, 5);
        st.move_cursor_to_line_below(1);
        assert_eq!(st.buffer().cursor_position(), 18);
    }

    #[test]
    fn vertical_moves_account_for_tabs() {
        let mut st = state_with_text("\tx\nabcdefgh");
        st.move_cursor(&Locator::Position(1));
        st.move_cursor_to_line_below(1);
        assert_eq!(st.buffer().cursor_position(), 7);
        st.move_cursor_to_line_above(1);
        assert_eq!(st.buffer().cursor_position(), 1);
    }

    #[test]
    fn vertical_move_on_same_line_is_noop() {
        let mut st = state_with_text("abc");
        st.move_cursor(&Locator::Position(2));
        st.move_cursor_to_line_below(3);
        assert_eq!(st.buffer().cursor_position(), 2);
    }

    #[test]
    fn select_range_puts_cursor_on_last_char() {
        let mut st = state_with_text("hello world");
        st.select_range(&RangeLocator::Span { start: 6, end: 11 });
        assert_eq!(st.buffer().selection_mode(), SelectionMode::Char);
        assert_eq!(st.buffer().cursor_position(), 10);
        let region = st.buffer().selected_region();
        assert_eq!((region.start, region.end), (6, 11));
        st.move_cursor_to_start_of_selection();
        assert_eq!(st.buffer().cursor_position(), 6);
    }
}
