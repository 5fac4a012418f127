//! Source parser seam
//!
//! The Loader only depends on [`SourceParser`]; [`CSharpParser`] is the in-tree implementation backed by
//! `stubgen_syntax`.

use stubgen_syntax::diagnostics::SyntaxError;
use stubgen_syntax::tree::SyntaxTree;

/// Converts source text into a declaration tree.
///
/// Implementations run on blocking threads and may be called concurrently.
pub trait SourceParser: Send + Sync {
    /// Parse one source unit.
    ///
    /// ## Errors
    /// Every diagnostic that made the source unusable.
    fn parse(&self, source: &str) -> Result<SyntaxTree, Vec<SyntaxError>>;
}

/// Structural parser for C# sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpParser;

impl SourceParser for CSharpParser {
    fn parse(&self, source: &str) -> Result<SyntaxTree, Vec<SyntaxError>> {
        stubgen_syntax::parse_source(source)
    }
}
