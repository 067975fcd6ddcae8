//! Pure position computations over a [`Document`].
//!
//! Every function takes a codepoint position and returns a codepoint
//! position; none of them mutate the document. Positions past the end are
//! tolerated and treated as the end of the document.

use crate::{Cluster, Document, cell_width};

/// Start of the cluster `count` clusters after `pos` on the same line.
///
/// Stops at the line terminator or the end of the document. When it stops
/// there, `include_end_of_line_or_file` selects whether the result is the
/// terminator position itself or the last cluster before it.
pub fn next_char_in_line(
    doc: &Document,
    count: usize,
    include_end_of_line_or_file: bool,
    pos: usize,
) -> usize {
    let mut clusters = doc.forward_clusters(pos);
    let mut end_of_line_or_file = false;
    let (mut prev_offset, mut offset) = (0, 0);
    for _ in 0..=count {
        match clusters.next() {
            Some(c) if !c.has_newline() => {
                prev_offset = offset;
                offset += c.num_chars();
            }
            _ => {
                end_of_line_or_file = true;
                break;
            }
        }
    }
    if end_of_line_or_file && include_end_of_line_or_file {
        pos + offset
    } else {
        pos + prev_offset
    }
}

/// Start of the cluster `count` clusters before `pos` on the same line.
///
/// With `include_end_of_line_or_file` the walk may step onto the previous
/// line's terminator.
pub fn prev_char_in_line(
    doc: &Document,
    count: usize,
    include_end_of_line_or_file: bool,
    pos: usize,
) -> usize {
    let pos = pos.min(doc.num_chars());
    let mut offset = 0;
    for c in doc.backward_clusters(pos).take(count) {
        if offset + c.num_chars() > pos {
            return 0;
        }
        if c.has_newline() {
            if include_end_of_line_or_file {
                offset += c.num_chars();
            }
            break;
        }
        offset += c.num_chars();
    }
    pos - offset
}

/// Start of the cluster `count` clusters before `pos`, crossing lines.
pub fn prev_char(doc: &Document, count: usize, pos: usize) -> usize {
    let pos = pos.min(doc.num_chars());
    let back: usize = doc
        .backward_clusters(pos)
        .take(count)
        .map(|c| c.num_chars())
        .sum();
    pos - back
}

/// The `count`th occurrence of `target` at or after `pos` on the current line.
///
/// The cluster under `pos` takes part in the scan. With `include_char` the
/// result is the matching cluster; otherwise it is the cluster just before
/// it. `None` when the line ends first.
pub fn next_matching_char_in_line(
    doc: &Document,
    target: char,
    count: usize,
    include_char: bool,
    pos: usize,
) -> Option<usize> {
    let mut matches = 0;
    let (mut prev_offset, mut offset) = (0, 0);
    for c in doc.forward_clusters(pos) {
        if c.has_newline() {
            return None;
        }
        for ch in c.chars() {
            if ch == target {
                matches += 1;
                if matches == count {
                    return Some(if include_char {
                        pos + offset
                    } else {
                        pos + prev_offset
                    });
                }
            }
        }
        prev_offset = offset;
        offset += c.num_chars();
    }
    None
}

/// The `count`th occurrence of `target` before `pos` on the current line.
///
/// Without `include_char` the result is the cluster just after the match.
pub fn prev_matching_char_in_line(
    doc: &Document,
    target: char,
    count: usize,
    include_char: bool,
    pos: usize,
) -> Option<usize> {
    let pos = pos.min(doc.num_chars());
    let mut matches = 0;
    let (mut prev_offset, mut offset) = (0, 0);
    for c in doc.backward_clusters(pos) {
        if c.has_newline() {
            return None;
        }
        prev_offset = offset;
        offset += c.num_chars();
        for ch in c.chars() {
            if ch == target {
                matches += 1;
                if matches == count {
                    return Some(if include_char {
                        pos - offset
                    } else {
                        pos - prev_offset
                    });
                }
            }
        }
    }
    None
}

/// Where a backspace in insert mode should delete back to when auto-indent
/// is on: the nearest tab stop, but never past the start of the run of
/// spaces and tabs before `pos`.
pub fn prev_auto_indent(doc: &Document, auto_indent: bool, tab_size: usize, pos: usize) -> usize {
    if !auto_indent {
        return pos;
    }
    let pos = pos.min(doc.num_chars());
    prev_tab_aligned_pos(doc, tab_size, pos).max(prev_whitespace_start_pos(doc, pos))
}

fn prev_tab_aligned_pos(doc: &Document, tab_size: usize, start_pos: usize) -> usize {
    let tab_size = tab_size.max(1);
    let mut pos = start_of_line_at_pos(doc, start_pos);
    let mut last_aligned = pos;
    let mut offset = 0;
    let mut clusters = doc.forward_clusters(pos);
    while pos < start_pos {
        if offset % tab_size == 0 {
            last_aligned = pos;
        }
        let Some(c) = clusters.next() else {
            break;
        };
        offset += cell_width(c.as_str(), offset, tab_size);
        pos += c.num_chars();
    }
    last_aligned
}

fn prev_whitespace_start_pos(doc: &Document, mut pos: usize) -> usize {
    for c in doc.backward_clusters(pos) {
        if !matches!(c.first_char(), Some(' ' | '\t')) {
            break;
        }
        pos -= c.num_chars();
    }
    pos
}

/// First non-whitespace cluster or line terminator at or after `pos`.
pub fn next_non_whitespace_or_newline(doc: &Document, pos: usize) -> usize {
    let skipped: usize = doc
        .forward_clusters(pos)
        .take_while(|c| c.is_whitespace() && !c.has_newline())
        .map(|c| c.num_chars())
        .sum();
    pos + skipped
}

/// Position and codepoint length of the next line terminator at or after `pos`.
pub fn next_newline(doc: &Document, pos: usize) -> Option<(usize, usize)> {
    let mut offset = 0;
    for c in doc.forward_clusters(pos) {
        if c.has_newline() {
            return Some((pos + offset, c.num_chars()));
        }
        offset += c.num_chars();
    }
    None
}

/// Pull a position back onto a real cluster of its line.
///
/// A position past the end moves to the last cluster; a position on a line
/// terminator moves to the cluster before it unless the line is empty.
pub fn closest_char_on_line(doc: &Document, pos: usize) -> usize {
    let n = doc.num_chars();
    if pos >= n {
        return prev_cluster_start(doc, n, 1);
    }
    if let Some(c) = doc.forward_clusters(pos).next()
        && c.has_newline()
    {
        return prev_cluster_start(doc, pos + c.num_chars(), 2);
    }
    pos
}

fn prev_cluster_start(doc: &Document, pos: usize, count: usize) -> usize {
    let mut clusters = doc.backward_clusters(pos);
    let skipped: usize = clusters
        .by_ref()
        .take(count - 1)
        .map(|c| c.num_chars())
        .sum();
    match clusters.next() {
        None => 0,
        // Empty line: stay on it.
        Some(c) if c.has_newline() => pos - skipped,
        Some(c) => pos - skipped - c.num_chars(),
    }
}

pub fn closest_valid_line_num(doc: &Document, line: usize) -> usize {
    line.min(doc.num_lines().saturating_sub(1))
}

pub fn start_of_line_at_pos(doc: &Document, pos: usize) -> usize {
    doc.line_start_pos(doc.line_num_for_pos(pos))
}

pub fn start_of_line_num(doc: &Document, line: usize) -> usize {
    doc.line_start_pos(closest_valid_line_num(doc, line))
}

pub fn start_of_last_line(doc: &Document) -> usize {
    start_of_line_num(doc, doc.num_lines())
}

pub fn start_of_line_above(doc: &Document, count: usize, pos: usize) -> usize {
    let line = doc.line_num_for_pos(pos).saturating_sub(count);
    start_of_line_num(doc, line)
}

pub fn start_of_line_below(doc: &Document, count: usize, pos: usize) -> usize {
    let line = doc.line_num_for_pos(pos).saturating_add(count);
    start_of_line_num(doc, line)
}

/// End of the line containing `pos`: the terminator (or end of document)
/// when `include_end_of_line_or_file`, else the last cluster before it.
pub fn next_line_boundary(doc: &Document, include_end_of_line_or_file: bool, pos: usize) -> usize {
    let (mut prev_offset, mut offset) = (0, 0);
    for c in doc.forward_clusters(pos) {
        if c.has_newline() {
            break;
        }
        prev_offset = offset;
        offset += c.num_chars();
    }
    if include_end_of_line_or_file {
        pos + offset
    } else {
        pos + prev_offset
    }
}

/// Start of the line containing `pos`, found by walking back to the previous
/// terminator.
pub fn prev_line_boundary(doc: &Document, pos: usize) -> usize {
    let pos = pos.min(doc.num_chars());
    let back: usize = doc
        .backward_clusters(pos)
        .take_while(|c| !c.has_newline())
        .map(|c| c.num_chars())
        .sum();
    pos - back
}

/// Start of the next word.
///
/// Word boundaries are the first non-whitespace after whitespace and the
/// start of an empty line. Never moves past the last cluster.
pub fn next_word_start(doc: &Document, pos: usize) -> usize {
    let (mut seen_whitespace, mut seen_newline) = (false, false);
    let (mut prev_offset, mut offset) = (0, 0);
    let mut clusters = doc.forward_clusters(pos);
    loop {
        let Some(c) = clusters.next() else {
            return pos + prev_offset;
        };
        if c.has_newline() {
            if seen_newline {
                break;
            }
            seen_newline = true;
        }
        if c.is_whitespace() {
            seen_whitespace = true;
        } else if seen_whitespace {
            break;
        }
        prev_offset = offset;
        offset += c.num_chars();
    }
    pos + offset
}

/// Start of the word before `pos`, using the same boundaries as
/// [`next_word_start`].
pub fn prev_word_start(doc: &Document, pos: usize) -> usize {
    let pos = pos.min(doc.num_chars());
    let (mut seen_non_whitespace, mut seen_newline) = (false, false);
    let mut offset = 0;
    for c in doc.backward_clusters(pos) {
        if c.has_newline() {
            if seen_newline {
                return pos - offset;
            }
            seen_newline = true;
        }
        if c.is_whitespace() {
            if seen_non_whitespace {
                return pos - offset;
            }
        } else {
            seen_non_whitespace = true;
        }
        offset += c.num_chars();
    }
    0
}

/// Last cluster of the current or next word. Empty lines are not boundaries.
pub fn next_word_end(doc: &Document, pos: usize) -> usize {
    let mut prev_was_non_whitespace = false;
    let (mut prev_offset, mut offset) = (0, 0);
    for c in doc.forward_clusters(pos) {
        if c.is_whitespace() {
            if prev_was_non_whitespace && offset > 1 {
                return pos + prev_offset;
            }
            prev_was_non_whitespace = false;
        } else {
            prev_was_non_whitespace = true;
        }
        prev_offset = offset;
        offset += c.num_chars();
    }
    pos + prev_offset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Whitespace,
    Word,
    Punct,
}

fn word_class(c: &Cluster) -> WordClass {
    if c.is_whitespace() {
        WordClass::Whitespace
    } else if c.first_char().is_some_and(|ch| ch.is_alphanumeric() || ch == '_') {
        WordClass::Word
    } else {
        WordClass::Punct
    }
}

/// Range `[start, end)` of `count` word objects starting at `pos`.
///
/// A word object is a run of word chars or a run of punctuation. Starting
/// on a word it also takes the whitespace after it up to the end of the
/// line; starting on whitespace it takes that whitespace (line breaks
/// included) and the word after it.
pub fn word_object(doc: &Document, pos: usize, count: usize) -> (usize, usize) {
    let pos = pos.min(doc.num_chars());
    if count == 0 {
        return (pos, pos);
    }
    let Some(first) = doc.forward_clusters(pos).next() else {
        return (pos, pos);
    };

    let class = word_class(&first);
    let back: usize = doc
        .backward_clusters(pos)
        .take_while(|c| match class {
            WordClass::Whitespace => c.is_whitespace() && !c.has_newline(),
            _ => word_class(c) == class,
        })
        .map(|c| c.num_chars())
        .sum();
    let start = pos - back;

    let mut end = start;
    for _ in 0..count {
        let next = word_object_end(doc, end);
        if next == end {
            break;
        }
        end = next;
    }
    (start, end)
}

// End of the single word object beginning at `pos`.
fn word_object_end(doc: &Document, pos: usize) -> usize {
    let Some(first) = doc.forward_clusters(pos).next() else {
        return pos;
    };
    match word_class(&first) {
        WordClass::Whitespace => {
            let end = run_end(doc, pos, Cluster::is_whitespace);
            match doc.forward_clusters(end).next() {
                Some(c) => {
                    let token = word_class(&c);
                    run_end(doc, end, |c| word_class(c) == token)
                }
                None => end,
            }
        }
        class => {
            let end = run_end(doc, pos, |c| word_class(c) == class);
            run_end(doc, end, |c| c.is_whitespace() && !c.has_newline())
        }
    }
}

fn run_end(doc: &Document, pos: usize, pred: impl Fn(&Cluster) -> bool) -> usize {
    let len: usize = doc
        .forward_clusters(pos)
        .take_while(|c| pred(c))
        .map(|c| c.num_chars())
        .sum();
    pos + len
}

/// Number of clusters that start in `[start, end)`.
pub fn num_clusters_in_range(doc: &Document, start: usize, end: usize) -> usize {
    let mut pos = start;
    let mut count = 0;
    for c in doc.forward_clusters(start) {
        if pos >= end {
            break;
        }
        pos += c.num_chars();
        count += 1;
    }
    count
}

/// Cell offset of `pos` from the start of its line.
pub fn offset_in_line(doc: &Document, tab_size: usize, pos: usize) -> usize {
    let mut p = start_of_line_at_pos(doc, pos);
    let mut offset = 0;
    for c in doc.forward_clusters(p) {
        if p >= pos {
            break;
        }
        offset += cell_width(c.as_str(), offset, tab_size);
        p += c.num_chars();
    }
    offset
}

/// Zero-based line and cluster column of a position.
pub fn pos_to_line_and_col(doc: &Document, pos: usize) -> (usize, usize) {
    let pos = pos.min(doc.num_chars());
    let line = doc.line_num_for_pos(pos);
    (line, num_clusters_in_range(doc, doc.line_start_pos(line), pos))
}

/// Inverse of [`pos_to_line_and_col`], clamped onto a real cluster of the
/// nearest valid line.
pub fn line_and_col_to_pos(doc: &Document, line: usize, col: usize) -> usize {
    let start = start_of_line_num(doc, line);
    let target = next_char_in_line(doc, col, false, start);
    closest_char_on_line(doc, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::from_text(text)
    }

    #[test]
    fn next_char_in_line_stops_at_line_end() {
        let d = doc("abcd\nefgh");
        assert_eq!(next_char_in_line(&d, 1, false, 0), 1);
        assert_eq!(next_char_in_line(&d, 2, false, 1), 3);
        assert_eq!(next_char_in_line(&d, 10, false, 1), 3);
        assert_eq!(next_char_in_line(&d, 10, true, 1), 4);
        assert_eq!(next_char_in_line(&d, 1, false, 3), 3);
        assert_eq!(next_char_in_line(&d, 1, true, 3), 4);
        assert_eq!(next_char_in_line(&d, 5, true, 7), 9);
    }

    #[test]
    fn next_char_in_line_steps_over_clusters() {
        let d = doc("e\u{301}x");
        assert_eq!(next_char_in_line(&d, 1, false, 0), 2);
    }

    #[test]
    fn prev_char_in_line_stops_at_line_start() {
        let d = doc("abcd\nefgh");
        assert_eq!(prev_char_in_line(&d, 1, false, 7), 6);
        assert_eq!(prev_char_in_line(&d, 10, false, 7), 5);
        assert_eq!(prev_char_in_line(&d, 10, true, 7), 4);
        assert_eq!(prev_char_in_line(&d, 3, false, 2), 0);
    }

    #[test]
    fn prev_char_crosses_lines() {
        let d = doc("ab\ncd");
        assert_eq!(prev_char(&d, 1, 3), 2);
        assert_eq!(prev_char(&d, 2, 3), 1);
        assert_eq!(prev_char(&d, 10, 3), 0);
    }

    #[test]
    fn matching_char_forward_and_backward() {
        let d = doc("a,b,c\nx,y");
        assert_eq!(next_matching_char_in_line(&d, ',', 1, true, 0), Some(1));
        assert_eq!(next_matching_char_in_line(&d, ',', 2, true, 0), Some(3));
        assert_eq!(next_matching_char_in_line(&d, ',', 2, false, 0), Some(2));
        assert_eq!(next_matching_char_in_line(&d, ',', 3, true, 0), None);
        assert_eq!(prev_matching_char_in_line(&d, ',', 1, true, 4), Some(3));
        assert_eq!(prev_matching_char_in_line(&d, ',', 1, false, 4), Some(4));
        assert_eq!(prev_matching_char_in_line(&d, ',', 2, true, 4), Some(1));
        assert_eq!(prev_matching_char_in_line(&d, ',', 1, true, 7), None);
    }

    #[test]
    fn auto_indent_backspace_targets() {
        let d = doc("        x");
        assert_eq!(prev_auto_indent(&d, true, 4, 8), 4);
        assert_eq!(prev_auto_indent(&d, true, 4, 6), 4);
        assert_eq!(prev_auto_indent(&d, false, 4, 6), 6);
        let d = doc("ab  ");
        assert_eq!(prev_auto_indent(&d, true, 4, 4), 2);
        let d = doc("\t\t");
        assert_eq!(prev_auto_indent(&d, true, 4, 2), 1);
    }

    #[test]
    fn whitespace_and_newline_scans() {
        let d = doc("  \t x\n  \ny");
        assert_eq!(next_non_whitespace_or_newline(&d, 0), 4);
        assert_eq!(next_non_whitespace_or_newline(&d, 6), 8);
        assert_eq!(next_newline(&d, 0), Some((5, 1)));
        assert_eq!(next_newline(&d, 9), None);
        let d = doc("ab\r\ncd");
        assert_eq!(next_newline(&d, 0), Some((2, 2)));
    }

    #[test]
    fn closest_char_on_line_cases() {
        let d = doc("ab\n\ncd");
        assert_eq!(closest_char_on_line(&d, 1), 1);
        assert_eq!(closest_char_on_line(&d, 2), 1);
        assert_eq!(closest_char_on_line(&d, 3), 3);
        assert_eq!(closest_char_on_line(&d, 6), 5);
        assert_eq!(closest_char_on_line(&d, 60), 5);
        assert_eq!(closest_char_on_line(&doc(""), 0), 0);
        assert_eq!(closest_char_on_line(&doc("abc\n"), 4), 4);
    }

    #[test]
    fn line_starts() {
        let d = doc("abcdefgh\n\nijkl");
        assert_eq!(start_of_line_at_pos(&d, 5), 0);
        assert_eq!(start_of_line_num(&d, 2), 10);
        assert_eq!(start_of_line_num(&d, 20), 10);
        assert_eq!(start_of_last_line(&d), 10);
        assert_eq!(start_of_line_above(&d, 1, 11), 9);
        assert_eq!(start_of_line_above(&d, 5, 11), 0);
        assert_eq!(start_of_line_below(&d, 1, 3), 9);
        assert_eq!(start_of_line_below(&d, 7, 3), 10);
        assert_eq!(closest_valid_line_num(&d, 99), 2);
    }

    #[test]
    fn line_boundaries() {
        let d = doc("abc\ndef");
        assert_eq!(next_line_boundary(&d, false, 1), 2);
        assert_eq!(next_line_boundary(&d, true, 1), 3);
        assert_eq!(next_line_boundary(&d, true, 5), 7);
        assert_eq!(prev_line_boundary(&d, 6), 4);
        assert_eq!(prev_line_boundary(&d, 2), 0);
    }

    #[test]
    fn word_motions_follow_whitespace() {
        let d = doc("foo bar\n\n  baz");
        assert_eq!(next_word_start(&d, 0), 4);
        assert_eq!(next_word_start(&d, 4), 8);
        assert_eq!(next_word_start(&d, 8), 11);
        assert_eq!(next_word_start(&d, 12), 13);
        assert_eq!(prev_word_start(&d, 11), 8);
        assert_eq!(prev_word_start(&d, 8), 4);
        assert_eq!(prev_word_start(&d, 5), 4);
        assert_eq!(prev_word_start(&d, 4), 0);
        assert_eq!(next_word_end(&d, 0), 2);
        assert_eq!(next_word_end(&d, 2), 6);
        assert_eq!(next_word_end(&d, 6), 13);
    }

    #[test]
    fn word_object_takes_trailing_or_leading_whitespace() {
        let d = doc("abc def    ghi");
        assert_eq!(word_object(&d, 5, 1), (4, 11));
        let d = doc("abc   def  ghi");
        assert_eq!(word_object(&d, 4, 1), (3, 9));
        let d = doc("abc    ");
        assert_eq!(word_object(&d, 2, 1), (0, 7));
        assert_eq!(word_object(&d, 4, 1), (3, 7));
    }

    #[test]
    fn word_object_splits_on_punctuation() {
        let d = doc("abc/def/ghi");
        assert_eq!(word_object(&d, 5, 1), (4, 7));
        assert_eq!(word_object(&d, 3, 1), (3, 4));
        assert_eq!(word_object(&doc("abc///ghi"), 4, 1), (3, 6));
        assert_eq!(word_object(&doc("a   /   b"), 4, 1), (4, 8));
        assert_eq!(word_object(&doc("foo  {bar"), 3, 1), (3, 6));
    }

    #[test]
    fn word_object_leading_whitespace_crosses_line_breaks() {
        assert_eq!(word_object(&doc("abc\n    xyz"), 6, 1), (4, 11));
        assert_eq!(word_object(&doc("abc\n\n   123"), 4, 1), (4, 11));
        assert_eq!(word_object(&doc("abc\n\n123"), 4, 1), (4, 8));
    }

    #[test]
    fn word_object_with_count() {
        let d = doc("lorem ipsum dolor sit amet");
        assert_eq!(word_object(&d, 7, 0), (7, 7));
        assert_eq!(word_object(&d, 5, 3), (5, 21));
        assert_eq!(word_object(&d, 7, 3), (6, 22));
        assert_eq!(word_object(&doc("lorem.ipsum.dolor.sit.amet"), 5, 3), (5, 12));
        assert_eq!(word_object(&doc("lorem   ipsum.dolor.sit.amet"), 6, 3), (5, 19));
        assert_eq!(word_object(&doc(""), 0, 1), (0, 0));
    }

    #[test]
    fn cluster_counting_and_columns() {
        let d = doc("a\u{1F600}b\tc\nxy");
        assert_eq!(num_clusters_in_range(&d, 0, 3), 3);
        assert_eq!(offset_in_line(&d, 4, 2), 3);
        assert_eq!(offset_in_line(&d, 4, 3), 4);
        assert_eq!(offset_in_line(&d, 4, 4), 8);
        assert_eq!(pos_to_line_and_col(&d, 7), (1, 1));
        assert_eq!(line_and_col_to_pos(&d, 1, 1), 7);
        assert_eq!(line_and_col_to_pos(&d, 0, 40), 4);
        assert_eq!(line_and_col_to_pos(&d, 9, 0), 6);
    }
}
