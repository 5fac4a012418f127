//! Source language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, declaration modifiers and
//! punctuation of the C#-style sources that stubgen scans.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer and parser.
//! Instead, callers work with **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no tree types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   modifier classification).
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("namespace"), Some(KeywordId::Namespace));
//! assert_eq!(keywords::as_str(KeywordId::Public), "public");
//! ```

pub mod keywords;
pub mod punctuation;
