//! Provide the canonical source vocabulary and the test naming conventions shared by the stubgen parser and renderers.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that both:
//! - the syntax frontend can use to classify keywords, modifiers and punctuation, and
//! - the renderers can use to derive namespaces, type names and stub names for generated test units.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no tree types.

pub mod conventions;
pub mod lang;
