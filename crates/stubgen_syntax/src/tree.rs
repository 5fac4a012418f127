//! Syntax tree produced by the declaration parser.
//!
//! The tree is an arena: every [`SyntaxNode`] lives in one `Vec` and refers to its parent and children by
//! [`NodeId`]. Parent links make upward walks (e.g. “which namespace encloses this type?”) cheap, and the arena
//! keeps the tree `Send + Sync` so it can be shared read-only across pipeline workers.
//!
//! ## Notes
//! - Node `0` is always the compilation unit root.
//! - Children are stored in declaration order.
//! - Ids are only meaningful for the tree that created them.

use std::fmt::{self, Write as _};
use std::ops::Index;

use stubgen_core::lang::keywords::{self, KeywordId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Flavour of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Record,
    Interface,
    Enum,
}

impl TypeKind {
    /// Return `true` for types whose methods carry implementations worth a test stub.
    pub fn is_class_like(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Struct | TypeKind::Record)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// Declaration kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of every tree.
    CompilationUnit,
    /// A namespace, block-bodied or file-scoped.
    Namespace,
    Type(TypeKind),
    Method,
    Constructor,
    Property,
    Field,
    /// Operators, destructors, events, delegates.
    Other,
}

impl NodeKind {
    /// Return `true` for namespace-like grouping nodes.
    pub fn is_namespace(self) -> bool {
        matches!(self, NodeKind::Namespace)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "unit",
            NodeKind::Namespace => "namespace",
            NodeKind::Type(kind) => kind.as_str(),
            NodeKind::Method => "method",
            NodeKind::Constructor => "constructor",
            NodeKind::Property => "property",
            NodeKind::Field => "field",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declaration in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    name: String,
    modifiers: Vec<KeywordId>,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Declared name; qualified (`A.B`) for namespaces, empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modifier keywords in source order.
    pub fn modifiers(&self) -> &[KeywordId] {
        &self.modifiers
    }

    pub fn has_modifier(&self, id: KeywordId) -> bool {
        self.modifiers.contains(&id)
    }

    /// Return `true` if the declaration carries an explicit `public` modifier.
    pub fn is_public(&self) -> bool {
        self.has_modifier(KeywordId::Public)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed declaration tree for one source unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    /// Create a tree holding only the compilation unit root.
    pub fn new() -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: NodeKind::CompilationUnit,
                name: String::new(),
                modifiers: Vec::new(),
                span: Span::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root; this is `true` only when nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.0)
    }

    /// Node for `id`.
    ///
    /// ## Panics
    /// - If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    /// Append a new declaration under `parent` and return its id.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: impl Into<String>,
        modifiers: Vec<KeywordId>,
        span: Span,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            name: name.into(),
            modifiers,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    /// Widen a node's span once its body has been consumed.
    pub fn extend_span(&mut self, id: NodeId, span: Span) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.span = node.span.merge(span);
        }
    }

    /// Children of `id` in declaration order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id).into_iter().flat_map(|n| n.children.iter().copied())
    }

    /// Ancestors of `id`, nearest first, root last.
    ///
    /// The walk is bounded by the number of nodes, so it terminates even on a malformed tree.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).and_then(|n| n.parent),
            remaining: self.nodes.len(),
        }
    }

    /// Human-readable outline, one declaration per line, indented by depth.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.root()) {
            self.write_outline(&mut out, child, 0);
        }
        out
    }

    fn write_outline(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = self.node(id);
        let _ = write!(out, "{}{} {}", "  ".repeat(depth), node.kind, node.name);
        if !node.modifiers.is_empty() {
            let mods: Vec<&str> = node.modifiers.iter().map(|m| keywords::as_str(*m)).collect();
            let _ = write!(out, " [{}]", mods.join(" "));
        }
        out.push('\n');
        for child in node.children.iter() {
            self.write_outline(out, *child, depth + 1);
        }
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = SyntaxNode;

    fn index(&self, id: NodeId) -> &SyntaxNode {
        self.node(id)
    }
}

/// Iterator returned by [`SyntaxTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a SyntaxNode);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (SyntaxTree, NodeId, NodeId, NodeId) {
        let mut tree = SyntaxTree::new();
        let ns = tree.add_child(tree.root(), NodeKind::Namespace, "Shop", vec![], Span::new(0, 10));
        let ty = tree.add_child(
            ns,
            NodeKind::Type(TypeKind::Class),
            "Cart",
            vec![KeywordId::Public],
            Span::new(2, 8),
        );
        let method = tree.add_child(ty, NodeKind::Method, "Add", vec![KeywordId::Public], Span::new(3, 7));
        (tree, ns, ty, method)
    }

    #[test]
    fn test_children_in_order() {
        let (mut tree, ns, ty, _) = sample();
        let second = tree.add_child(ns, NodeKind::Type(TypeKind::Struct), "Point", vec![], Span::default());
        assert_eq!(tree.children(ns).collect::<Vec<_>>(), vec![ty, second]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (tree, ns, ty, method) = sample();
        let ids: Vec<NodeId> = tree.ancestors(method).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![ty, ns, tree.root()]);
    }

    #[test]
    fn test_root_has_no_ancestors() {
        let tree = SyntaxTree::new();
        assert_eq!(tree.ancestors(tree.root()).count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_public_modifier() {
        let (tree, _, ty, _) = sample();
        assert!(tree[ty].is_public());
        assert!(!tree[tree.root()].is_public());
    }

    #[test]
    fn test_outline() {
        let (tree, ..) = sample();
        assert_eq!(
            tree.outline(),
            "namespace Shop\n  class Cart [public]\n    method Add [public]\n"
        );
    }

    #[test]
    fn test_class_like_kinds() {
        assert!(TypeKind::Record.is_class_like());
        assert!(!TypeKind::Interface.is_class_like());
        assert!(!TypeKind::Enum.is_class_like());
    }
}
