//! Define the reserved keyword vocabulary of the scanned source language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! categories and whether the word is contextual.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Contextual keywords (`record`, `partial`, `async`, ...) are only reserved in specific positions. The parser
//!   accepts them as identifiers everywhere else.
//! - Only the words the structural parser cares about are registered. Statement and expression keywords are
//!   lexed as identifiers because member bodies are skipped, not parsed.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("class"), Some(KeywordId::Class));
//! assert!(keywords::is_modifier(KeywordId::Static));
//! assert!(!keywords::is_modifier(KeywordId::Class));
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Namespace,
    Using,
    Class,
    Struct,
    Record,
    Interface,
    Enum,
    Delegate,
    Event,
    Operator,
    Implicit,
    Explicit,
    This,
    Where,

    // Access modifiers
    Public,
    Private,
    Protected,
    Internal,
    File,

    // Other modifiers
    Static,
    Abstract,
    Sealed,
    Partial,
    Virtual,
    Override,
    Async,
    Extern,
    Unsafe,
    Readonly,
    New,
    Const,
    Volatile,
    Required,
}

/// High-level grouping used by the parser and by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Introduces a declaration or directive (`namespace`, `class`, `using`, ...).
    Declaration,
    /// Access modifier (`public`, `private`, ...).
    Access,
    /// Any other declaration modifier (`static`, `sealed`, ...).
    Modifier,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    /// Reserved only in specific syntactic positions.
    pub contextual: bool,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Namespace, "namespace", KeywordCategory::Declaration, false),
    info(KeywordId::Using, "using", KeywordCategory::Declaration, false),
    info(KeywordId::Class, "class", KeywordCategory::Declaration, false),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration, false),
    info(KeywordId::Record, "record", KeywordCategory::Declaration, true),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration, false),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration, false),
    info(KeywordId::Delegate, "delegate", KeywordCategory::Declaration, false),
    info(KeywordId::Event, "event", KeywordCategory::Declaration, false),
    info(KeywordId::Operator, "operator", KeywordCategory::Declaration, false),
    info(KeywordId::Implicit, "implicit", KeywordCategory::Declaration, false),
    info(KeywordId::Explicit, "explicit", KeywordCategory::Declaration, false),
    info(KeywordId::This, "this", KeywordCategory::Declaration, false),
    info(KeywordId::Where, "where", KeywordCategory::Declaration, true),
    // Access modifiers
    info(KeywordId::Public, "public", KeywordCategory::Access, false),
    info(KeywordId::Private, "private", KeywordCategory::Access, false),
    info(KeywordId::Protected, "protected", KeywordCategory::Access, false),
    info(KeywordId::Internal, "internal", KeywordCategory::Access, false),
    info(KeywordId::File, "file", KeywordCategory::Access, true),
    // Other modifiers
    info(KeywordId::Static, "static", KeywordCategory::Modifier, false),
    info(KeywordId::Abstract, "abstract", KeywordCategory::Modifier, false),
    info(KeywordId::Sealed, "sealed", KeywordCategory::Modifier, false),
    info(KeywordId::Partial, "partial", KeywordCategory::Modifier, true),
    info(KeywordId::Virtual, "virtual", KeywordCategory::Modifier, false),
    info(KeywordId::Override, "override", KeywordCategory::Modifier, false),
    info(KeywordId::Async, "async", KeywordCategory::Modifier, true),
    info(KeywordId::Extern, "extern", KeywordCategory::Modifier, false),
    info(KeywordId::Unsafe, "unsafe", KeywordCategory::Modifier, false),
    info(KeywordId::Readonly, "readonly", KeywordCategory::Modifier, false),
    info(KeywordId::New, "new", KeywordCategory::Modifier, false),
    info(KeywordId::Const, "const", KeywordCategory::Modifier, false),
    info(KeywordId::Volatile, "volatile", KeywordCategory::Modifier, false),
    info(KeywordId::Required, "required", KeywordCategory::Modifier, true),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if `id` is only reserved in specific positions.
pub fn is_contextual(id: KeywordId) -> bool {
    info_for(id).contextual
}

/// Return `true` if `id` may appear in a declaration's modifier list.
pub fn is_modifier(id: KeywordId) -> bool {
    matches!(category(id), KeywordCategory::Access | KeywordCategory::Modifier)
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("INVARIANT: every KeywordId has a registry entry")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory, contextual: bool) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        contextual,
    }
}
