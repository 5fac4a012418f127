//! Declaration parser for C#-style sources.
//!
//! Converts a token stream into a [`SyntaxTree`] of namespaces, type declarations and members. Anything below
//! member level (bodies, initializers, attribute arguments, base lists) is skipped by balanced-delimiter
//! matching.
//!
//! ## Examples
//!
//! ```rust
//! use stubgen_syntax::{lexer, parser};
//!
//! let source = "namespace Shop { public class Cart { public void Add(int x) { } } }";
//! let tokens = lexer::lex(source).unwrap();
//! let tree = parser::parse(&tokens).unwrap();
//! assert_eq!(tree.len(), 4);
//! ```

use crate::diagnostics::SyntaxError;
use crate::lexer::{Token, TokenKind};
use crate::tree::{NodeId, NodeKind, Span, SyntaxTree, TypeKind};
use stubgen_core::lang::keywords::{self, KeywordId};
use stubgen_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/members.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
