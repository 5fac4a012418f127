//! Test unit rendering
//!
//! A [`TestRenderer`] turns one [`TypeDescriptor`] into the source text of a test unit. The pipeline only depends
//! on the trait; [`CSharpRenderer`] is the in-tree implementation and supports the frameworks in
//! [`TestFramework`].

mod csharp;
pub mod emitter;

use std::fmt;

pub use csharp::CSharpRenderer;

use crate::descriptor::{RenderedUnit, TypeDescriptor};

/// Renders type descriptors into test units.
///
/// Implementations are shared by every Synthesizer worker and must be pure: the same descriptor always renders
/// to the same text.
pub trait TestRenderer: Send + Sync {
    /// File extension of rendered units, without the leading dot.
    fn extension(&self) -> &str;

    fn render(&self, descriptor: &TypeDescriptor) -> RenderedUnit;
}

/// Test framework the generated units target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum TestFramework {
    #[default]
    #[value(name = "nunit")]
    NUnit,
    #[value(name = "mstest")]
    MsTest,
    #[value(name = "xunit")]
    XUnit,
}

impl TestFramework {
    pub fn as_str(self) -> &'static str {
        match self {
            TestFramework::NUnit => "nunit",
            TestFramework::MsTest => "mstest",
            TestFramework::XUnit => "xunit",
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
