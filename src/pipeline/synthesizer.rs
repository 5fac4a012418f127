//! Synthesizer stage: describe one type and render its test unit.

use std::path::Path;

use stubgen_syntax::tree::{NodeId, NodeKind, SyntaxTree};

use crate::descriptor::{RenderedUnit, TypeDescriptor, TypeRequest};
use crate::error::GenerateError;
use crate::render::TestRenderer;

/// Build the descriptor for the type at `node`.
///
/// ## Errors
/// [`GenerateError::MissingNamespace`] when no namespace encloses the type.
pub fn describe(tree: &SyntaxTree, node: NodeId, source: &Path) -> Result<TypeDescriptor, GenerateError> {
    let name = tree[node].name().to_string();
    let Some(enclosing_namespace) = enclosing_namespace(tree, node) else {
        return Err(GenerateError::MissingNamespace {
            type_name: name,
            path: source.to_path_buf(),
        });
    };

    Ok(TypeDescriptor {
        public_method_names: public_methods(tree, node),
        enclosing_namespace,
        name,
    })
}

/// Names of the type's own public methods, in declaration order.
pub fn public_methods(tree: &SyntaxTree, node: NodeId) -> Vec<String> {
    tree.children(node)
        .map(|child| &tree[child])
        .filter(|member| member.kind() == NodeKind::Method && member.is_public())
        .map(|member| member.name().to_string())
        .collect()
}

/// Dot-joined names of every namespace enclosing `node`, outermost first.
pub fn enclosing_namespace(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    let mut segments: Vec<&str> = tree
        .ancestors(node)
        .filter(|(_, ancestor)| ancestor.kind() == NodeKind::Namespace)
        .map(|(_, ancestor)| ancestor.name())
        .collect();
    if segments.is_empty() {
        return None;
    }
    segments.reverse();
    Some(segments.join("."))
}

/// Describe and render one request.
#[tracing::instrument(skip_all, fields(type_name = request.type_name()))]
pub(crate) fn synthesize(request: &TypeRequest, renderer: &dyn TestRenderer) -> Result<RenderedUnit, GenerateError> {
    let descriptor = describe(&request.tree, request.node, &request.source)?;
    Ok(renderer.render(&descriptor))
}
