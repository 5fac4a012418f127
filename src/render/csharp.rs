//! C# test unit renderer
//!
//! Output shape (NUnit shown):
//!
//! ```text
//! using System;
//! using NUnit.Framework;
//! using Shop;
//!
//! namespace Shop.Tests
//! {
//!     [TestFixture]
//!     public class CartTest
//!     {
//!         [Test]
//!         public void AddTest()
//!         {
//!             Assert.Fail("autogenerated");
//!         }
//!     }
//! }
//! ```

use stubgen_core::conventions;

use super::emitter::CodeEmitter;
use super::{TestFramework, TestRenderer};
use crate::descriptor::{RenderedUnit, TypeDescriptor};

/// Renders C# test units for one [`TestFramework`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpRenderer {
    framework: TestFramework,
}

impl CSharpRenderer {
    pub fn new(framework: TestFramework) -> Self {
        Self { framework }
    }

    pub fn framework(&self) -> TestFramework {
        self.framework
    }

    fn framework_namespace(&self) -> &'static str {
        match self.framework {
            TestFramework::NUnit => "NUnit.Framework",
            TestFramework::MsTest => "Microsoft.VisualStudio.TestTools.UnitTesting",
            TestFramework::XUnit => "Xunit",
        }
    }

    /// xUnit discovers test classes without a marker attribute.
    fn class_attribute(&self) -> Option<&'static str> {
        match self.framework {
            TestFramework::NUnit => Some("TestFixture"),
            TestFramework::MsTest => Some("TestClass"),
            TestFramework::XUnit => None,
        }
    }

    fn method_attribute(&self) -> &'static str {
        match self.framework {
            TestFramework::NUnit => "Test",
            TestFramework::MsTest => "TestMethod",
            TestFramework::XUnit => "Fact",
        }
    }

    fn failing_assertion(&self) -> String {
        match self.framework {
            TestFramework::NUnit | TestFramework::MsTest => {
                format!("Assert.Fail(\"{}\");", conventions::FAILURE_MARKER)
            }
            TestFramework::XUnit => format!("Assert.True(false, \"{}\");", conventions::FAILURE_MARKER),
        }
    }
}

impl TestRenderer for CSharpRenderer {
    fn extension(&self) -> &str {
        "cs"
    }

    fn render(&self, descriptor: &TypeDescriptor) -> RenderedUnit {
        let stubs = conventions::stub_names(&descriptor.public_method_names);
        let assertion = self.failing_assertion();

        let mut e = CodeEmitter::new();
        e.using("System");
        e.using(self.framework_namespace());
        e.using(&descriptor.enclosing_namespace);
        e.blank_line();

        let namespace = conventions::test_namespace(&descriptor.enclosing_namespace);
        e.block(&format!("namespace {}", namespace), |e| {
            if let Some(attr) = self.class_attribute() {
                e.attribute(attr);
            }
            let class = conventions::test_type_name(&descriptor.name);
            e.block(&format!("public class {}", class), |e| {
                e.separated(&stubs, |e, stub| {
                    e.attribute(self.method_attribute());
                    e.block(&format!("public void {}()", stub), |e| e.line(&assertion));
                });
            });
        });

        RenderedUnit {
            type_name: descriptor.name.clone(),
            source_text: e.finish(),
        }
    }
}
