//! Selection anchor and derived regions.
//!
//! Only the anchor and the mode are stored. The selected region is always
//! recomputed from the anchor and the current cursor, so edits that move the
//! cursor never leave a stale span behind.

use core_text::{Document, locate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    None,
    Char,
    Line,
}

/// Half-open span of codepoint positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub const EMPTY: Region = Region { start: 0, end: 0 };

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Clamp both ends to a document of `n` codepoints.
    pub fn clip(self, n: usize) -> Region {
        if n == 0 {
            return Region::EMPTY;
        }
        Region {
            start: self.start.min(n),
            end: self.end.min(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selector {
    mode: SelectionMode,
    anchor: usize,
}

impl Selector {
    pub fn start(&mut self, mode: SelectionMode, cursor_pos: usize) {
        self.mode = mode;
        self.anchor = cursor_pos;
    }

    pub fn clear(&mut self) {
        self.mode = SelectionMode::None;
        self.anchor = 0;
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Switch between char and line selection without moving the anchor.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    pub fn region(&self, doc: &Document, cursor_pos: usize) -> Region {
        let (min, max) = if cursor_pos < self.anchor {
            (cursor_pos, self.anchor)
        } else {
            (self.anchor, cursor_pos)
        };
        let region = match self.mode {
            SelectionMode::None => return Region::EMPTY,
            // The character under the later endpoint is part of the selection.
            SelectionMode::Char => Region {
                start: min,
                end: max + 1,
            },
            SelectionMode::Line => Region {
                start: locate::start_of_line_at_pos(doc, min),
                end: locate::next_line_boundary(doc, true, max),
            },
        };
        region.clip(doc.num_chars())
    }
}
