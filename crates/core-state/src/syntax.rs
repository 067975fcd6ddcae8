//! Keeps the buffer's syntax tokens in step with its text.

use crate::{BufferState, EditorState};
use core_syntax::{Edit, Language, SyntaxError, Token};
use tracing::{debug, error, warn};

impl EditorState {
    /// Select a language and tokenize the whole document. On failure the
    /// buffer keeps the language but carries no tokens.
    pub fn set_syntax(&mut self, language: Language) {
        match self.buffer.set_syntax_and_retokenize(language) {
            Ok(()) => debug!(target: "state.syntax", %language, "syntax_set"),
            Err(e) => error!(target: "state.syntax", %language, error = %e, "tokenize_failed"),
        }
    }
}

impl BufferState {
    pub(crate) fn set_syntax_and_retokenize(&mut self, language: Language) -> Result<(), SyntaxError> {
        self.language = language;
        self.tokenizer = None;
        let Some(mut tokenizer) = language.tokenizer()? else {
            return Ok(());
        };
        tokenizer.tokenize_all(&self.document)?;
        self.tokenizer = Some(tokenizer);
        Ok(())
    }

    pub(crate) fn retokenize_after_edit(&mut self, edit: &Edit) {
        let Some(tokenizer) = self.tokenizer.as_mut() else {
            return;
        };
        if let Err(e) = tokenizer.retokenize_after_edit(&self.document, edit) {
            warn!(target: "state.syntax", pos = edit.pos, error = %e, "retokenize_failed");
            self.tokenizer = None;
        }
    }

    /// Tokens overlapping `[start, end)`; empty for plain text.
    pub fn tokens_intersecting_range(&self, start: usize, end: usize) -> Vec<Token> {
        self.tokenizer
            .as_ref()
            .map(|t| t.tokens_intersecting_range(start, end))
            .unwrap_or_default()
    }
}
