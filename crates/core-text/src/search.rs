//! Literal text search.
//!
//! Matching is Knuth-Morris-Pratt over codepoints so a search streams the
//! rope once without materialising it. Offsets are codepoints from the start
//! of the iterator handed to the searcher.
//!
//! Query syntax: a trailing `\c` forces a case-insensitive search and a
//! trailing `\C` a case-sensitive one. Without a suffix the search is
//! case-sensitive only when the query contains an uppercase letter.

use crate::Document;

/// Streaming matcher for a single literal query.
#[derive(Debug, Clone)]
pub struct Searcher {
    query: Vec<char>,
    prefix: Vec<usize>,
    limit: Option<usize>,
}

impl Searcher {
    pub fn new(query: &str) -> Self {
        let query: Vec<char> = query.chars().collect();
        let prefix = prefix_table(&query);
        Self {
            query,
            prefix,
            limit: None,
        }
    }

    /// Only report matches that end within the first `limit` codepoints.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn without_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    /// Offset of the first match.
    pub fn next_in(&self, chars: impl Iterator<Item = char>) -> Option<usize> {
        self.scan(chars, true)
    }

    /// Offset of the last match.
    pub fn last_in(&self, chars: impl Iterator<Item = char>) -> Option<usize> {
        self.scan(chars, false)
    }

    fn scan(&self, chars: impl Iterator<Item = char>, first_only: bool) -> Option<usize> {
        let q = &self.query;
        if q.is_empty() {
            return None;
        }
        let mut last = None;
        let mut i = 0;
        let mut consumed = 0;
        for c in chars {
            consumed += 1;
            if self.limit.is_some_and(|limit| consumed > limit) {
                break;
            }
            while i > 0 && q[i] != c {
                i = self.prefix[i - 1];
            }
            if q[i] == c {
                i += 1;
            }
            if i == q.len() {
                let start = consumed - q.len();
                if first_only {
                    return Some(start);
                }
                last = Some(start);
                // Restart so reported matches never overlap.
                i = 0;
            }
        }
        last
    }
}

fn prefix_table(q: &[char]) -> Vec<usize> {
    let mut table = vec![0; q.len()];
    let (mut i, mut j) = (0, 1);
    while j < q.len() {
        if q[i] == q[j] {
            i += 1;
            table[j] = i;
            j += 1;
        } else if i > 0 {
            i = table[i - 1];
        } else {
            j += 1;
        }
    }
    table
}

/// A raw query split into its search text and case sensitivity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub text: String,
    pub case_sensitive: bool,
}

impl ParsedQuery {
    /// Number of codepoints a match of this query spans.
    pub fn match_len(&self) -> usize {
        self.text.chars().count()
    }

    fn searcher(&self) -> Searcher {
        if self.case_sensitive {
            Searcher::new(&self.text)
        } else {
            let folded: String = self.text.chars().map(fold_case).collect();
            Searcher::new(&folded)
        }
    }

    fn transform(&self, c: char) -> char {
        if self.case_sensitive { c } else { fold_case(c) }
    }
}

pub fn parse_query(raw: &str) -> ParsedQuery {
    if let Some(text) = raw.strip_suffix("\\c") {
        return ParsedQuery {
            text: text.to_string(),
            case_sensitive: false,
        };
    }
    if let Some(text) = raw.strip_suffix("\\C") {
        return ParsedQuery {
            text: text.to_string(),
            case_sensitive: true,
        };
    }
    ParsedQuery {
        text: raw.to_string(),
        case_sensitive: raw.chars().any(char::is_uppercase),
    }
}

// Lowercase mappings that expand to several codepoints would shift match
// offsets, so those characters compare as themselves.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Start of the next match after `pos`, wrapping around to the start of the
/// document. A match at `pos` itself is found only after wrapping.
pub fn search_forward(doc: &Document, query: &ParsedQuery, pos: usize) -> Option<usize> {
    let searcher = query.searcher();
    let start = pos + 1;
    if start <= doc.num_chars()
        && let Some(off) = searcher.next_in(doc.chars_at(start).map(|c| query.transform(c)))
    {
        return Some(start + off);
    }
    let limit = (start + searcher.query_len()).saturating_sub(1);
    searcher
        .with_limit(limit)
        .next_in(doc.chars_at(0).map(|c| query.transform(c)))
}

/// Start of the closest match before `pos`, wrapping around to the end of
/// the document. A match at `pos` itself is found only after wrapping.
pub fn search_backward(doc: &Document, query: &ParsedQuery, pos: usize) -> Option<usize> {
    let searcher = query.searcher();
    let limit = (pos + searcher.query_len()).saturating_sub(1);
    if let Some(off) = searcher
        .clone()
        .with_limit(limit)
        .last_in(doc.chars_at(0).map(|c| query.transform(c)))
    {
        return Some(off);
    }
    let resume = pos + 1;
    if resume > doc.num_chars() {
        return None;
    }
    searcher
        .without_limit()
        .last_in(doc.chars_at(resume).map(|c| query.transform(c)))
        .map(|off| resume + off)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn forward(text: &str, raw: &str, pos: usize) -> Option<usize> {
        search_forward(&Document::from_text(text), &parse_query(raw), pos)
    }

    fn backward(text: &str, raw: &str, pos: usize) -> Option<usize> {
        search_backward(&Document::from_text(text), &parse_query(raw), pos)
    }

    #[test]
    fn searcher_finds_first_and_last() {
        let s = Searcher::new("aab");
        assert_eq!(s.next_in("xaaab aab".chars()), Some(2));
        assert_eq!(s.last_in("xaaab aab".chars()), Some(6));
        assert_eq!(s.next_in("aa".chars()), None);
        assert_eq!(Searcher::new("").next_in("abc".chars()), None);
    }

    #[test]
    fn searcher_limit_bounds_match_end() {
        let s = Searcher::new("bc").with_limit(3);
        assert_eq!(s.next_in("abcbc".chars()), Some(1));
        let s = Searcher::new("bc").with_limit(2);
        assert_eq!(s.next_in("abcbc".chars()), None);
    }

    #[test]
    fn query_suffixes_and_smart_case() {
        assert_eq!(
            parse_query("Foo\\c"),
            ParsedQuery {
                text: "Foo".into(),
                case_sensitive: false
            }
        );
        assert_eq!(
            parse_query("foo\\C"),
            ParsedQuery {
                text: "foo".into(),
                case_sensitive: true
            }
        );
        assert!(parse_query("Foo").case_sensitive);
        assert!(!parse_query("foo").case_sensitive);
    }

    #[test]
    fn forward_skips_the_cursor_and_wraps() {
        assert_eq!(forward("foo bar baz", "ba", 0), Some(4));
        assert_eq!(forward("foo bar baz", "ba", 4), Some(8));
        assert_eq!(forward("foo bar baz", "ba", 10), Some(4));
        assert_eq!(forward("foo bar", "foo", 0), Some(0));
        assert_eq!(forward("foo bar", "zzz", 0), None);
    }

    #[test]
    fn backward_skips_the_cursor_and_wraps() {
        assert_eq!(backward("foo bar baz", "ba", 8), Some(4));
        assert_eq!(backward("foo bar baz", "ba", 5), Some(4));
        assert_eq!(backward("foo bar baz", "ba", 4), Some(8));
        assert_eq!(backward("foo bar baz", "ba", 0), Some(8));
        assert_eq!(backward("foo", "o", 2), Some(1));
    }

    #[test]
    fn case_folding_follows_query() {
        assert_eq!(forward("xx FOO foo", "foo", 0), Some(3));
        assert_eq!(forward("xx FOO foo", "foo\\C", 0), Some(7));
        assert_eq!(forward("xx foo FOO", "Foo\\c", 0), Some(3));
    }

    #[test]
    fn positions_are_codepoints() {
        assert_eq!(forward("héllo wörld", "wö", 0), Some(6));
        assert_eq!(parse_query("wö").match_len(), 2);
    }

    proptest! {
        #[test]
        fn forward_match_is_a_real_occurrence(
            text in "[ab\n]{0,24}",
            query in "[ab]{1,3}",
            pos in 0usize..24,
        ) {
            let doc = Document::from_text(&text);
            let pos = pos.min(doc.num_chars());
            let parsed = parse_query(&query);
            let chars: Vec<char> = text.chars().collect();
            match search_forward(&doc, &parsed, pos) {
                Some(start) => {
                    let found: String = chars[start..start + parsed.match_len()].iter().collect();
                    prop_assert_eq!(found, query);
                }
                None => prop_assert!(!text.contains(&query)),
            }
        }
    }
}
