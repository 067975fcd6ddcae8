use crate::{SyntaxError, Tokenizer, TreeSitterTokenizer};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Plaintext,
    Rust,
}

impl Language {
    /// Detect a language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "rs" => Language::Rust,
            _ => Language::Plaintext,
        }
    }

    /// Detect a language from a document name such as `src/main.rs`.
    pub fn from_name(name: &str) -> Self {
        std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "plaintext" | "text" | "" => Some(Language::Plaintext),
            "rust" => Some(Language::Rust),
            _ => None,
        }
    }

    /// A fresh tokenizer for this language; `None` for plain text.
    pub fn tokenizer(self) -> Result<Option<Box<dyn Tokenizer>>, SyntaxError> {
        match self {
            Language::Plaintext => Ok(None),
            Language::Rust => Ok(Some(Box::new(TreeSitterTokenizer::new(self)?))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Plaintext => "plaintext",
            Language::Rust => "rust",
        })
    }
}
