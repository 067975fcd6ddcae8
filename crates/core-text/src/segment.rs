//! Grapheme cluster readers over a [`Document`].
//!
//! Contract:
//! - Clusters are produced in document order (forward) or reverse document
//!   order (backward) starting at an arbitrary codepoint position.
//! - Segmentation runs one line at a time. A cluster never spans a line
//!   break; the `\r\n` pair is a single cluster at the end of its line.
//! - Starting in the middle of a multi-codepoint cluster segments from that
//!   codepoint, exactly as if the text began there.
//! - Safety: clusters carry document text; callers must not log them.

use crate::Document;
use std::collections::VecDeque;
use unicode_segmentation::UnicodeSegmentation;

/// A single user-perceived character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    text: String,
    num_chars: usize,
}

impl Cluster {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            num_chars: text.chars().count(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of codepoints in the cluster.
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// True for the `\n` and `\r\n` clusters.
    pub fn has_newline(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// True if every codepoint is whitespace (line terminators included).
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }
}

fn segment_into(text: &str, out: &mut impl Extend<Cluster>) {
    out.extend(text.graphemes(true).map(Cluster::new));
}

/// Clusters from a position to the end of the document.
pub struct ForwardClusters<'a> {
    doc: &'a Document,
    next_line: usize,
    pending: VecDeque<Cluster>,
}

impl<'a> ForwardClusters<'a> {
    pub(crate) fn new(doc: &'a Document, pos: usize) -> Self {
        let pos = pos.min(doc.num_chars());
        let line = doc.line_num_for_pos(pos);
        let line_end = doc.line_start_pos(line + 1);
        let mut pending = VecDeque::new();
        segment_into(&doc.slice_to_string(pos, line_end), &mut pending);
        Self {
            doc,
            next_line: line + 1,
            pending,
        }
    }
}

impl Iterator for ForwardClusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        loop {
            if let Some(cluster) = self.pending.pop_front() {
                return Some(cluster);
            }
            if self.next_line >= self.doc.num_lines() {
                return None;
            }
            let text = self.doc.line_text(self.next_line);
            self.next_line += 1;
            segment_into(&text, &mut self.pending);
        }
    }
}

/// Clusters before a position, nearest first, back to the start of the document.
pub struct BackwardClusters<'a> {
    doc: &'a Document,
    prev_line: Option<usize>,
    // Stack in document order; popping yields reverse order.
    pending: Vec<Cluster>,
}

impl<'a> BackwardClusters<'a> {
    pub(crate) fn new(doc: &'a Document, pos: usize) -> Self {
        let pos = pos.min(doc.num_chars());
        let line = doc.line_num_for_pos(pos);
        let line_start = doc.line_start_pos(line);
        let mut pending = Vec::new();
        segment_into(&doc.slice_to_string(line_start, pos), &mut pending);
        Self {
            doc,
            prev_line: line.checked_sub(1),
            pending,
        }
    }
}

impl Iterator for BackwardClusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        loop {
            if let Some(cluster) = self.pending.pop() {
                return Some(cluster);
            }
            let line = self.prev_line?;
            self.prev_line = line.checked_sub(1);
            segment_into(&self.doc.line_text(line), &mut self.pending);
        }
    }
}
