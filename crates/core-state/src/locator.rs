//! Locators: pure position computations evaluated against the current buffer.
//!
//! A [`Locator`] names a target position relative to the cursor and the
//! document; a [`RangeLocator`] names a half-open span. Both are plain data so
//! recorded macros and task results can carry them and replay them later at
//! a different cursor.

use crate::search::SearchDirection;
use crate::selection::{SelectionMode, Selector};
use core_text::{Document, locate};
use serde::{Deserialize, Serialize};

/// Inputs every locator is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct LocatorParams<'a> {
    pub document: &'a Document,
    pub cursor_pos: usize,
    pub tab_size: usize,
    pub auto_indent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    Position(usize),
    Cursor,
    NextCharInLine {
        count: usize,
        include_end_of_line_or_file: bool,
    },
    PrevCharInLine {
        count: usize,
        include_end_of_line_or_file: bool,
    },
    PrevChar {
        count: usize,
    },
    NextMatchingCharInLine {
        target: char,
        count: usize,
        include_char: bool,
    },
    PrevMatchingCharInLine {
        target: char,
        count: usize,
        include_char: bool,
    },
    /// Just past the next matching char, so a delete takes the match with
    /// it. The cursor when the line has no match.
    ThroughNextMatchingCharInLine {
        target: char,
        count: usize,
        include_char: bool,
    },
    /// Backspace target in insert mode: one cluster back, or further back to
    /// the previous indent stop.
    PrevCharOrAutoIndent,
    StartOfLineAtCursor,
    /// First non-whitespace cluster on the cursor's line.
    LineStartNonWhitespace,
    StartOfLineNum(usize),
    StartOfLastLine,
    StartOfLineAbove {
        count: usize,
    },
    StartOfLineBelow {
        count: usize,
    },
    NextLineBoundary {
        include_end_of_line_or_file: bool,
    },
    PrevLineBoundary,
    ClosestCharOnLine,
    NextNonWhitespaceOrNewline,
    PrevAutoIndent,
    NextWordStart {
        count: usize,
    },
    PrevWordStart {
        count: usize,
    },
    NextWordEnd {
        count: usize,
    },
    LineAndCol {
        line: usize,
        col: usize,
    },
    /// Char selection that stayed on one line: the same number of clusters.
    CharSelectionEndSingleLine {
        num_clusters: usize,
    },
    /// Char selection spanning lines: the same line delta and the same
    /// cluster offset into the last line.
    CharSelectionEndMultiLine {
        lines_down: usize,
        clusters_past_line_start: usize,
    },
    LineSelectionEnd {
        lines_down: usize,
    },
    /// Boundary of a search match that a delete or change runs up to.
    SearchMatchBoundary {
        direction: SearchDirection,
        start: usize,
        end: usize,
    },
}

impl Locator {
    pub fn locate(&self, p: &LocatorParams<'_>) -> usize {
        let doc = p.document;
        let cursor = p.cursor_pos;
        match *self {
            Locator::Position(pos) => pos,
            Locator::Cursor => cursor,
            Locator::NextCharInLine {
                count,
                include_end_of_line_or_file,
            } => locate::next_char_in_line(doc, count, include_end_of_line_or_file, cursor),
            Locator::PrevCharInLine {
                count,
                include_end_of_line_or_file,
            } => locate::prev_char_in_line(doc, count, include_end_of_line_or_file, cursor),
            Locator::PrevChar { count } => locate::prev_char(doc, count, cursor),
            Locator::NextMatchingCharInLine {
                target,
                count,
                include_char,
            } => {
                // The cluster under the cursor never counts as a match.
                let from = locate::next_char_in_line(doc, 1, true, cursor);
                locate::next_matching_char_in_line(doc, target, count, include_char, from)
                    .unwrap_or(cursor)
            }
            Locator::PrevMatchingCharInLine {
                target,
                count,
                include_char,
            } => locate::prev_matching_char_in_line(doc, target, count, include_char, cursor)
                .unwrap_or(cursor),
            Locator::ThroughNextMatchingCharInLine {
                target,
                count,
                include_char,
            } => {
                let from = locate::next_char_in_line(doc, 1, true, cursor);
                match locate::next_matching_char_in_line(doc, target, count, include_char, from) {
                    Some(pos) => locate::next_char_in_line(doc, 1, true, pos),
                    None => cursor,
                }
            }
            Locator::PrevCharOrAutoIndent => {
                let prev = locate::prev_char_in_line(doc, 1, true, cursor);
                let indent = locate::prev_auto_indent(doc, p.auto_indent, p.tab_size, cursor);
                prev.min(indent)
            }
            Locator::StartOfLineAtCursor => locate::start_of_line_at_pos(doc, cursor),
            Locator::LineStartNonWhitespace => {
                let line_start = locate::prev_line_boundary(doc, cursor);
                locate::next_non_whitespace_or_newline(doc, line_start)
            }
            Locator::StartOfLineNum(line) => locate::start_of_line_num(doc, line),
            Locator::StartOfLastLine => locate::start_of_last_line(doc),
            Locator::StartOfLineAbove { count } => locate::start_of_line_above(doc, count, cursor),
            Locator::StartOfLineBelow { count } => locate::start_of_line_below(doc, count, cursor),
            Locator::NextLineBoundary {
                include_end_of_line_or_file,
            } => locate::next_line_boundary(doc, include_end_of_line_or_file, cursor),
            Locator::PrevLineBoundary => locate::prev_line_boundary(doc, cursor),
            Locator::ClosestCharOnLine => locate::closest_char_on_line(doc, cursor),
            Locator::NextNonWhitespaceOrNewline => {
                locate::next_non_whitespace_or_newline(doc, cursor)
            }
            Locator::PrevAutoIndent => {
                locate::prev_auto_indent(doc, p.auto_indent, p.tab_size, cursor)
            }
            Locator::NextWordStart { count } => {
                repeat(count, cursor, |pos| locate::next_word_start(doc, pos))
            }
            Locator::PrevWordStart { count } => {
                repeat(count, cursor, |pos| locate::prev_word_start(doc, pos))
            }
            Locator::NextWordEnd { count } => {
                repeat(count, cursor, |pos| locate::next_word_end(doc, pos))
            }
            Locator::LineAndCol { line, col } => locate::line_and_col_to_pos(doc, line, col),
            Locator::CharSelectionEndSingleLine { num_clusters } => {
                locate::next_char_in_line(doc, num_clusters, true, cursor)
            }
            Locator::CharSelectionEndMultiLine {
                lines_down,
                clusters_past_line_start,
            } => {
                let below = locate::start_of_line_below(doc, lines_down, cursor);
                if below > cursor {
                    locate::next_char_in_line(doc, clusters_past_line_start, true, below)
                } else {
                    // Not enough lines below the cursor: select to the end of
                    // the current line.
                    locate::next_line_boundary(doc, true, cursor)
                }
            }
            Locator::LineSelectionEnd { lines_down } => {
                let below = locate::start_of_line_below(doc, lines_down, cursor);
                locate::next_line_boundary(doc, true, below)
            }
            Locator::SearchMatchBoundary {
                direction,
                start,
                end,
            } => match direction {
                SearchDirection::Forward => start,
                SearchDirection::Backward if cursor > end => end,
                SearchDirection::Backward => start,
            },
        }
    }
}

// Word motions step from the previous result; a motion that stops moving
// ends the repetition early.
fn repeat(count: usize, start: usize, step: impl Fn(usize) -> usize) -> usize {
    let mut pos = start;
    for _ in 0..count.max(1) {
        let next = step(pos);
        if next == pos {
            break;
        }
        pos = next;
    }
    pos
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeLocator {
    Span { start: usize, end: usize },
    /// The cursor's line, including its terminator.
    CurrentLine,
    /// Between the cursor and a located position, in document order.
    ToCursor(Locator),
}

impl RangeLocator {
    pub fn locate(&self, p: &LocatorParams<'_>) -> (usize, usize) {
        match self {
            RangeLocator::Span { start, end } => (*start, *end),
            RangeLocator::CurrentLine => {
                let start = locate::start_of_line_at_pos(p.document, p.cursor_pos);
                let end = locate::next_line_boundary(p.document, true, start);
                let end = match p.document.char_at(end) {
                    Some('\n') => end + 1,
                    _ => end,
                };
                (start, end)
            }
            RangeLocator::ToCursor(loc) => {
                let pos = loc.locate(p);
                (pos.min(p.cursor_pos), pos.max(p.cursor_pos))
            }
        }
    }
}

/// A locator that recreates the shape of the current selection from a new
/// cursor position, used to repeat selection commands. `None` without a
/// selection.
pub fn selection_end_locator(
    doc: &Document,
    cursor_pos: usize,
    selector: &Selector,
) -> Option<Locator> {
    let r = selector.region(doc, cursor_pos);
    let start_line = doc.line_num_for_pos(r.start);
    let end_line = doc.line_num_for_pos(r.end);
    match selector.mode() {
        SelectionMode::None => None,
        SelectionMode::Char if start_line == end_line => {
            Some(Locator::CharSelectionEndSingleLine {
                num_clusters: locate::num_clusters_in_range(doc, r.start, r.end),
            })
        }
        SelectionMode::Char => {
            let line_start = locate::start_of_line_at_pos(doc, r.end);
            Some(Locator::CharSelectionEndMultiLine {
                lines_down: end_line - start_line,
                clusters_past_line_start: locate::num_clusters_in_range(doc, line_start, r.end),
            })
        }
        SelectionMode::Line => Some(Locator::LineSelectionEnd {
            lines_down: end_line - start_line,
        }),
    }
}
