//! Syntax tokens for a document.
//!
//! The engine only relies on the [`Tokenizer`] contract: one full pass when a
//! language is selected, then an incremental update after every primitive
//! edit. Grammars are consumed, never authored here.

use thiserror::Error;

pub mod edit;
pub mod language;
pub mod token;
pub mod tree;

pub use edit::{Edit, PendingEdit, TextPoint};
pub use language::Language;
pub use token::{Token, TokenRole};
pub use tree::TreeSitterTokenizer;

use core_text::Document;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("grammar is incompatible with the parser: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("no grammar is available for {0}")]
    NoGrammar(Language),
    #[error("parser produced no tree")]
    ParseFailed,
    #[error("edit applied before the document was tokenized")]
    NotTokenized,
}

/// Produces and maintains the token structure of one document.
pub trait Tokenizer: Send {
    fn language(&self) -> Language;

    /// Discard any prior structure and tokenize the whole document.
    fn tokenize_all(&mut self, doc: &Document) -> Result<(), SyntaxError>;

    /// Update the structure after `edit` has already been applied to `doc`.
    fn retokenize_after_edit(&mut self, doc: &Document, edit: &Edit) -> Result<(), SyntaxError>;

    /// Tokens overlapping the half-open codepoint range `[start, end)`, in
    /// document order.
    fn tokens_intersecting_range(&self, start: usize, end: usize) -> Vec<Token>;
}
