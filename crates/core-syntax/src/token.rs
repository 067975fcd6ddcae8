/// Coarse classification of a token, enough for motions and highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenRole {
    Comment,
    Keyword,
    Number,
    String,
    Identifier,
    Type,
    Operator,
    Punctuation,
}

/// A classified span of the document in codepoint positions, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub role: TokenRole,
}

impl Token {
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}
