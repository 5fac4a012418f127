/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Where a member list appears. Decides which declarations it may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    CompilationUnit,
    Namespace,
    Type,
}

/// Deepest namespace/type nesting the parser descends into.
const MAX_NESTING_DEPTH: usize = 256;

/// Returned when peeking into a token slice that lacks its trailing `Eof`.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    span: Span { start: 0, end: 0 },
};

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at the next `;` or
///   skipped body, so one run reports every broken declaration.
/// - Nodes are appended to the tree as soon as their head is recognised; a run with errors
///   never hands its tree out.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    tree: SyntaxTree,
    errors: Vec<SyntaxError>,
    /// Open member lists, to bound recursion on hostile input
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `stubgen_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            tree: SyntaxTree::new(),
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the entire token stream into a [`SyntaxTree`].
    ///
    /// ## Errors
    /// Returns every [`SyntaxError`] found. The parser recovers after an error to report
    /// multiple issues in one pass.
    pub fn parse(mut self) -> Result<SyntaxTree, Vec<SyntaxError>> {
        let root = self.tree.root();
        self.member_list(root, Scope::CompilationUnit, false);
        self.tree.extend_span(root, self.current_span());

        if self.errors.is_empty() {
            Ok(self.tree)
        } else {
            Err(self.errors)
        }
    }
}
