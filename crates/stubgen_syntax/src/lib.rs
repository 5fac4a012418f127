//! Structural syntax frontend for C#-style sources: lexer, declaration parser, syntax tree, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the generator pipeline and the CLI's debug commands.
//!
//! ## Notes
//! - This crate is intentionally “declaration-only”: it recognises namespaces, type declarations, members and
//!   their modifiers. Member bodies, initializers and attribute arguments are skipped by balanced-delimiter
//!   matching, never parsed.
//! - Vocabulary identity (keywords/punctuation) comes from `stubgen_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use stubgen_syntax::{lexer, parser};
//! use stubgen_syntax::tree::NodeKind;
//!
//! let tokens = lexer::lex("namespace Shop { class Cart { public void Add() {} } }").unwrap();
//! let tree = parser::parse(&tokens).unwrap();
//! let ns = tree.children(tree.root()).next().unwrap();
//! assert_eq!(tree.node(ns).kind(), NodeKind::Namespace);
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
pub mod tree;

/// Lex and parse `source` in one step.
///
/// ## Errors
/// Returns every lexical error if tokenization fails, otherwise every syntax error the parser reported.
pub fn parse_source(source: &str) -> Result<tree::SyntaxTree, Vec<diagnostics::SyntaxError>> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}
