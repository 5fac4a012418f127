//! Token types for the lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Punctuation(PunctuationId)` for the punctuation the parser cares about
//!
//! ## Notes
//! - Literal contents are not retained: the parser only needs to know that a literal occupies a position.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::tree::Span;
use stubgen_core::lang::keywords::{self, KeywordId};
use stubgen_core::lang::punctuation::PunctuationId;

/// Kind of literal the lexer skipped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Char,
    Number,
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Literal(LiteralKind),

    /// Any other single character (operators like `+`, `*`, `!`, `&`).
    Symbol(char),

    // ========== Special ==========
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
