//! Rope-backed document addressed by codepoint position.
//!
//! Positions throughout the workspace are codepoint indices, never bytes.
//! Only `\n` terminates a line (a `\r\n` pair ends its line at the `\n`).
//! Byte and row/column conversions exist for the syntax layer, which speaks
//! tree-sitter's byte-oriented coordinates.

use ropey::Rope;
use std::fmt;
use thiserror::Error;

pub mod locate;
pub mod search;
pub mod segment;
pub mod width;

pub use segment::{BackwardClusters, Cluster, ForwardClusters};
pub use width::{cell_width, egc_width};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("position {pos} is past the end of the document ({len} chars)")]
    PositionOutOfBounds { pos: usize, len: usize },
    #[error("invalid UTF-8 input")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Text storage for a single buffer.
#[derive(Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl Document {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn num_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn num_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Number of lines, which is always the newline count plus one.
    pub fn num_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Position of the first codepoint of `line`; the end of the document when
    /// `line` is past the last line.
    pub fn line_start_pos(&self, line: usize) -> usize {
        if line >= self.num_lines() {
            self.num_chars()
        } else {
            self.rope.line_to_char(line)
        }
    }

    /// Line containing `pos`; positions past the end map to the last line.
    pub fn line_num_for_pos(&self, pos: usize) -> usize {
        self.rope.char_to_line(pos.min(self.num_chars()))
    }

    /// Full text of a line including its terminator.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.num_lines() {
            return String::new();
        }
        self.rope.line(line).to_string()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.rope.get_char(pos)
    }

    /// Codepoints from `pos` to the end of the document.
    pub fn chars_at(&self, pos: usize) -> ropey::iter::Chars<'_> {
        self.rope.chars_at(pos.min(self.num_chars()))
    }

    pub fn forward_clusters(&self, pos: usize) -> ForwardClusters<'_> {
        ForwardClusters::new(self, pos)
    }

    pub fn backward_clusters(&self, pos: usize) -> BackwardClusters<'_> {
        BackwardClusters::new(self, pos)
    }

    /// Text in the half-open codepoint range `[start, end)`, clamped to the document.
    pub fn slice_to_string(&self, start: usize, end: usize) -> String {
        let n = self.num_chars();
        let (s, e) = (start.min(n), end.min(n));
        if s >= e {
            return String::new();
        }
        self.rope.slice(s..e).to_string()
    }

    pub fn insert_char(&mut self, pos: usize, c: char) -> Result<(), DocumentError> {
        self.check_insert_pos(pos)?;
        self.rope.insert_char(pos, c);
        Ok(())
    }

    pub fn insert_str(&mut self, pos: usize, s: &str) -> Result<(), DocumentError> {
        self.check_insert_pos(pos)?;
        self.rope.insert(pos, s);
        Ok(())
    }

    /// Validate and insert raw bytes. Returns the number of codepoints inserted.
    pub fn insert_bytes(&mut self, pos: usize, bytes: &[u8]) -> Result<usize, DocumentError> {
        let s = std::str::from_utf8(bytes)?;
        self.insert_str(pos, s)?;
        Ok(s.chars().count())
    }

    /// Remove up to `count` codepoints starting at `pos` and return them.
    pub fn delete_range(&mut self, pos: usize, count: usize) -> String {
        let n = self.num_chars();
        let start = pos.min(n);
        let end = pos.saturating_add(count).min(n);
        if start >= end {
            return String::new();
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }

    pub fn char_to_byte(&self, pos: usize) -> usize {
        self.rope.char_to_byte(pos.min(self.num_chars()))
    }

    pub fn byte_to_char(&self, byte: usize) -> usize {
        self.rope.byte_to_char(byte.min(self.num_bytes()))
    }

    /// Row and byte column of a position.
    pub fn point_at(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.num_chars());
        let line = self.rope.char_to_line(pos);
        let line_start_byte = self.rope.line_to_byte(line);
        (line, self.rope.char_to_byte(pos) - line_start_byte)
    }

    fn check_insert_pos(&self, pos: usize) -> Result<(), DocumentError> {
        let len = self.num_chars();
        if pos > len {
            return Err(DocumentError::PositionOutOfBounds { pos, len });
        }
        Ok(())
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

// Never print document contents in debug output.
impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("num_chars", &self.num_chars())
            .field("num_lines", &self.num_lines())
            .finish()
    }
}
