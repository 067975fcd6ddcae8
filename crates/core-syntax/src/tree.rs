//! Tree-sitter backed tokenizer.
//!
//! The syntax tree is kept between edits: each [`Edit`] is applied to the old
//! tree before reparsing so tree-sitter only revisits the changed region.
//! Tokens are the leaves of the tree, except that comments and string
//! literals are kept whole.

use crate::{Edit, Language, SyntaxError, TextPoint, Token, TokenRole, Tokenizer};
use core_text::Document;
use tracing::{debug, trace};
use tree_sitter::{InputEdit, Node, Parser, Point, Tree};

pub struct TreeSitterTokenizer {
    language: Language,
    parser: Parser,
    tree: Option<Tree>,
    tokens: Vec<Token>,
}

fn grammar(language: Language) -> Result<tree_sitter::Language, SyntaxError> {
    match language {
        Language::Rust => Ok(tree_sitter_rust::LANGUAGE.into()),
        Language::Plaintext => Err(SyntaxError::NoGrammar(language)),
    }
}

fn point(p: TextPoint) -> Point {
    Point::new(p.row, p.column)
}

impl TreeSitterTokenizer {
    pub fn new(language: Language) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser.set_language(&grammar(language)?)?;
        Ok(Self {
            language,
            parser,
            tree: None,
            tokens: Vec::new(),
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn reparse(&mut self, doc: &Document) -> Result<(), SyntaxError> {
        let source = doc.to_string();
        let tree = self
            .parser
            .parse(&source, self.tree.as_ref())
            .ok_or(SyntaxError::ParseFailed)?;
        self.tokens = collect_tokens(&tree, doc);
        self.tree = Some(tree);
        Ok(())
    }
}

impl Tokenizer for TreeSitterTokenizer {
    fn language(&self) -> Language {
        self.language
    }

    fn tokenize_all(&mut self, doc: &Document) -> Result<(), SyntaxError> {
        self.tree = None;
        self.reparse(doc)?;
        debug!(target: "state.syntax", language = %self.language, tokens = self.tokens.len(), "tokenize_all");
        Ok(())
    }

    fn retokenize_after_edit(&mut self, doc: &Document, edit: &Edit) -> Result<(), SyntaxError> {
        let Some(tree) = self.tree.as_mut() else {
            return Err(SyntaxError::NotTokenized);
        };
        tree.edit(&InputEdit {
            start_byte: edit.start_byte,
            old_end_byte: edit.old_end_byte,
            new_end_byte: edit.new_end_byte,
            start_position: point(edit.start_point),
            old_end_position: point(edit.old_end_point),
            new_end_position: point(edit.new_end_point),
        });
        self.reparse(doc)?;
        trace!(
            target: "state.syntax",
            pos = edit.pos,
            inserted = edit.num_inserted,
            deleted = edit.num_deleted,
            tokens = self.tokens.len(),
            "retokenize_after_edit"
        );
        Ok(())
    }

    fn tokens_intersecting_range(&self, start: usize, end: usize) -> Vec<Token> {
        // Tokens are sorted and disjoint, so everything before the first token
        // ending after `start` can be skipped.
        let first = self.tokens.partition_point(|t| t.end <= start);
        self.tokens[first..]
            .iter()
            .take_while(|t| t.start < end)
            .filter(|t| t.intersects(start, end))
            .copied()
            .collect()
    }
}

fn whole_token_role(kind: &str) -> Option<TokenRole> {
    match kind {
        "line_comment" | "block_comment" => Some(TokenRole::Comment),
        "string_literal" | "raw_string_literal" | "char_literal" => Some(TokenRole::String),
        _ => None,
    }
}

fn leaf_role(node: &Node) -> Option<TokenRole> {
    let kind = node.kind();
    if node.is_named() {
        return match kind {
            "identifier" | "field_identifier" | "shorthand_field_identifier" => {
                Some(TokenRole::Identifier)
            }
            "type_identifier" | "primitive_type" => Some(TokenRole::Type),
            "integer_literal" | "float_literal" => Some(TokenRole::Number),
            "self" | "crate" | "super" | "metavariable" => Some(TokenRole::Keyword),
            _ => None,
        };
    }
    if kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Some(TokenRole::Keyword);
    }
    match kind {
        "(" | ")" | "[" | "]" | "{" | "}" | "," | ";" | ":" | "::" | "." | "#" => {
            Some(TokenRole::Punctuation)
        }
        _ => Some(TokenRole::Operator),
    }
}

fn collect_tokens(tree: &Tree, doc: &Document) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = tree.walk();
    'walk: loop {
        let node = cursor.node();
        let role = match whole_token_role(node.kind()) {
            Some(role) => Some(role),
            None if node.child_count() == 0 => leaf_role(&node),
            None => {
                if cursor.goto_first_child() {
                    continue 'walk;
                }
                None
            }
        };
        if let Some(role) = role
            && node.end_byte() > node.start_byte()
        {
            tokens.push(Token {
                start: doc.byte_to_char(node.start_byte()),
                end: doc.byte_to_char(node.end_byte()),
                role,
            });
        }
        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }
    tokens
}
