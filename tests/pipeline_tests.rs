//! End-to-end tests for the generation pipeline
//!
//! Every test runs a real pipeline on a multi-thread runtime against `tempfile` directories and inspects
//! the numbered units it leaves behind.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stubgen::{
    GenerateError, GenerationFailure, GenerationSummary, GeneratorConfig, RenderedUnit, StageKind,
    TestFramework, TestRenderer, TypeDescriptor, generate_tests, generate_tests_with,
};
use stubgen::CSharpParser;
use tempfile::TempDir;

const SHOP_CART: &str = r#"
using System;

namespace Shop
{
    public class Cart
    {
        public void Add(int item) { }
        public void Remove(int item) { }
        private void Recalc() { }
    }
}
"#;

struct Workspace {
    inputs: TempDir,
    output: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            inputs: tempfile::tempdir().unwrap(),
            output: tempfile::tempdir().unwrap(),
        }
    }

    fn input(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.inputs.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.output.path()).with_search_root(self.inputs.path())
    }

    /// Names of every file in the output directory
    fn written(&self) -> BTreeSet<String> {
        fs::read_dir(self.output.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Contents of every written unit, sorted so runs can be compared regardless of id order
    fn contents(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .written()
            .iter()
            .map(|name| fs::read_to_string(self.output.path().join(name)).unwrap())
            .collect();
        all.sort();
        all
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.output.path().join(name)).unwrap()
    }
}

fn numbered(ids: std::ops::RangeInclusive<u64>) -> BTreeSet<String> {
    ids.map(|id| format!("{id}.cs")).collect()
}

async fn run<P: Into<PathBuf>>(
    config: GeneratorConfig,
    inputs: impl IntoIterator<Item = P>,
) -> Result<GenerationSummary, GenerationFailure> {
    generate_tests(config, inputs).unwrap().await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shop_cart_produces_one_unit() {
    let ws = Workspace::new();
    let cart = ws.input("Cart.cs", SHOP_CART);

    let summary = run(ws.config(), [cart]).await.unwrap();
    assert_eq!(summary.inputs, 1);
    assert_eq!(summary.types_discovered, 1);
    assert_eq!(summary.units_rendered, 1);
    assert_eq!(summary.files_written, 1);

    assert_eq!(ws.written(), numbered(1..=1));
    let unit = ws.read("1.cs");
    assert!(unit.contains("namespace Shop.Tests"));
    assert!(unit.contains("public class CartTest"));
    assert!(unit.contains("public void AddTest()"));
    assert!(unit.contains("public void RemoveTest()"));
    assert!(!unit.contains("RecalcTest"));
    assert_eq!(unit.matches("Assert.Fail(\"autogenerated\");").count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_nested_namespace_and_non_class_types() {
    let ws = Workspace::new();
    let file = ws.input(
        "Nested.cs",
        "namespace A { namespace B { public class C { public void Run() {} } \
         public interface I { void Run(); } public enum E { X } } }",
    );

    let summary = run(ws.config(), [file]).await.unwrap();
    assert_eq!(summary.types_discovered, 1);
    assert!(ws.read("1.cs").contains("namespace A.B.Tests"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_type_without_namespace_is_isolated() {
    let ws = Workspace::new();
    let file = ws.input(
        "Mixed.cs",
        "class Loose { public void M() {} }\nnamespace N { class Kept { public void M() {} } }",
    );

    let failure = run(ws.config(), [file]).await.unwrap_err();
    assert_eq!(failure.summary.types_discovered, 2);
    assert_eq!(failure.summary.files_written, 1);
    assert_eq!(failure.errors.len(), 1);
    assert!(matches!(
        &failure.errors[0],
        GenerateError::MissingNamespace { type_name, .. } if type_name == "Loose"
    ));
    // The failed type never reached the writer, so it consumed no id
    assert_eq!(ws.written(), numbered(1..=1));
    assert!(ws.read("1.cs").contains("public class KeptTest"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_per_input_failures_are_all_reported() {
    let ws = Workspace::new();
    let good = ws.input("Good.cs", SHOP_CART);
    let broken = ws.input("Broken.cs", "namespace N { class { } }");
    let binary = ws.input("Binary.cs", [0xc3u8, 0x28]);

    let failure = run(ws.config(), [good, broken, binary, PathBuf::from("Missing.cs")])
        .await
        .unwrap_err();

    assert_eq!(failure.errors.len(), 3);
    assert!(failure.errors.iter().any(|e| matches!(e, GenerateError::Parse { errors, .. } if !errors.is_empty())));
    assert!(failure.errors.iter().any(|e| matches!(e, GenerateError::Decode { .. })));
    assert!(
        failure
            .errors
            .iter()
            .any(|e| matches!(e, GenerateError::NotFound { path } if path == Path::new("Missing.cs")))
    );

    assert_eq!(failure.summary.inputs, 4);
    assert_eq!(failure.summary.files_written, 1);
    assert_eq!(ws.written(), numbered(1..=1));
    assert!(failure.to_string().starts_with("3 item(s) failed (1 of 1 discovered type(s) written):"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_relative_inputs_resolve_under_search_root() {
    let ws = Workspace::new();
    ws.input("Cart.cs", SHOP_CART);

    let summary = run(ws.config(), ["Cart.cs"]).await.unwrap();
    assert_eq!(summary.files_written, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_type_without_public_methods_gets_empty_unit() {
    let ws = Workspace::new();
    let file = ws.input("Empty.cs", "namespace N { public class Empty { private void M() {} public int P { get; } } }");

    run(ws.config(), [file]).await.unwrap();
    let unit = ws.read("1.cs");
    assert!(unit.contains("public class EmptyTest"));
    assert!(!unit.contains("[Test]"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallelism_does_not_change_output() {
    let ws = Workspace::new();
    let inputs: Vec<PathBuf> = (0..20)
        .map(|i| {
            ws.input(
                &format!("Type{i}.cs"),
                format!(
                    "namespace Gen{i} {{ public class First{i} {{ public void A() {{}} }} \
                     public struct Second{i} {{ public void B() {{}} public void C() {{}} }} }}"
                ),
            )
        })
        .collect();

    let serial = run(ws.config().with_parallelism(1, 1, 1), inputs.clone()).await.unwrap();
    let serial_contents = ws.contents();
    assert_eq!(serial.files_written, 40);
    assert_eq!(ws.written(), numbered(1..=40));

    let wide = Workspace::new();
    let config = GeneratorConfig::new(wide.output.path()).with_parallelism(8, 8, 8);
    let parallel = run(config, inputs).await.unwrap();
    assert_eq!(parallel.files_written, 40);
    assert_eq!(wide.written(), numbered(1..=40));
    assert_eq!(wide.contents(), serial_contents);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_framework_is_configurable() {
    let ws = Workspace::new();
    let cart = ws.input("Cart.cs", SHOP_CART);

    run(ws.config().with_framework(TestFramework::XUnit), [cart]).await.unwrap();
    let unit = ws.read("1.cs");
    assert!(unit.contains("using Xunit;"));
    assert_eq!(unit.matches("[Fact]").count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_invalid_configuration_is_rejected_up_front() {
    let ws = Workspace::new();
    let cart = ws.input("Cart.cs", SHOP_CART);

    let zero = ws.config().with_load_parallelism(0);
    assert!(matches!(generate_tests(zero, [&cart]), Err(GenerateError::Configuration(_))));

    let missing = GeneratorConfig::new(ws.output.path().join("absent"));
    assert!(matches!(generate_tests(missing, [&cart]), Err(GenerateError::Configuration(_))));

    assert!(ws.written().is_empty());
}

/// Plain-text renderer: one line per public method.
struct ListingRenderer;

impl TestRenderer for ListingRenderer {
    fn extension(&self) -> &str {
        "txt"
    }

    fn render(&self, descriptor: &TypeDescriptor) -> RenderedUnit {
        RenderedUnit {
            type_name: descriptor.name.clone(),
            source_text: format!(
                "{}.{}: {}\n",
                descriptor.enclosing_namespace,
                descriptor.name,
                descriptor.public_method_names.join(",")
            ),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_custom_renderer() {
    let ws = Workspace::new();
    let cart = ws.input("Cart.cs", SHOP_CART);

    let handle = generate_tests_with(ws.config(), [cart], Arc::new(CSharpParser), Arc::new(ListingRenderer)).unwrap();
    handle.await.unwrap();
    assert_eq!(ws.written(), BTreeSet::from(["1.txt".to_string()]));
    assert_eq!(ws.read("1.txt"), "Shop.Cart: Add,Remove\n");
}

/// Panics on one specific type.
struct FragileRenderer;

impl TestRenderer for FragileRenderer {
    fn extension(&self) -> &str {
        "cs"
    }

    fn render(&self, descriptor: &TypeDescriptor) -> RenderedUnit {
        if descriptor.name == "Fragile" {
            panic!("cannot render {}", descriptor.name);
        }
        ListingRenderer.render(descriptor)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_worker_panic_is_reported_not_fatal() {
    let ws = Workspace::new();
    let file = ws.input("Two.cs", "namespace N { class Fragile {} class Sturdy {} }");

    let failure = generate_tests_with(ws.config(), [file], Arc::new(CSharpParser), Arc::new(FragileRenderer))
        .unwrap()
        .await
        .unwrap_err();

    assert_eq!(failure.errors.len(), 1);
    assert!(matches!(
        &failure.errors[0],
        GenerateError::WorkerPanicked { stage: StageKind::Synthesize, message } if message == "cannot render Fragile"
    ));
    assert_eq!(failure.summary.files_written, 1);
    assert_eq!(ws.read("1.cs"), "N.Sturdy: \n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_runs_render_the_same_contents() {
    let first = Workspace::new();
    let inputs = vec![
        first.input("Cart.cs", SHOP_CART),
        first.input("Nested.cs", "namespace A.B { public class C { public void Run() {} } }"),
    ];
    run(first.config(), inputs.clone()).await.unwrap();

    let second = Workspace::new();
    run(GeneratorConfig::new(second.output.path()), inputs).await.unwrap();

    assert_eq!(first.contents(), second.contents());
    assert_eq!(second.written(), numbered(1..=2));
}
