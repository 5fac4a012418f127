//! Values handed between pipeline stages.
//!
//! - [`TypeRequest`]: Loader -> Synthesizer, one per discovered class-like type
//! - [`TypeDescriptor`]: what the renderer needs to know about a type
//! - [`RenderedUnit`]: Synthesizer -> Writer, one per request

use std::path::PathBuf;
use std::sync::Arc;

use stubgen_syntax::tree::{NodeId, SyntaxTree};

/// A type declaration to synthesize a test unit for.
///
/// The tree is shared by every request from the same input and is dropped with the last of them.
#[derive(Debug, Clone)]
pub struct TypeRequest {
    /// Resolved path of the input the type was found in
    pub source: PathBuf,
    pub tree: Arc<SyntaxTree>,
    /// The type declaration node inside `tree`
    pub node: NodeId,
}

impl TypeRequest {
    /// Declared name of the requested type.
    pub fn type_name(&self) -> &str {
        self.tree
            .get(self.node)
            .map(|node| node.name())
            .unwrap_or_default()
    }
}

/// Structural description of one type, as consumed by a [`TestRenderer`](crate::render::TestRenderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    /// Dot-joined names of every enclosing namespace, outermost first. Never empty.
    pub enclosing_namespace: String,
    /// Public method names in declaration order; overloads repeat.
    pub public_method_names: Vec<String>,
}

/// Rendered source for one test unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// Name of the type the unit tests (for logs and errors)
    pub type_name: String,
    pub source_text: String,
}
