//! Golden snapshot tests for rendered test units
//!
//! These tests parse the `.cs` files under `tests/render_inputs/`, describe every class-like type
//! the pipeline would pick up and render it, then compare the output against stored snapshots.
//! This ensures renderer changes are reviewed and intentional.
//!
//! Run with: `cargo test --test render_snapshot_tests`
//! Review changes: `cargo insta review`

use std::fs;
use std::path::Path;

use stubgen::pipeline::loader::class_like_types;
use stubgen::pipeline::synthesizer::describe;
use stubgen::{CSharpParser, CSharpRenderer, SourceParser, TestFramework, TestRenderer};

/// Render every unit of one input, each preceded by a `// <Type>` marker line
fn render_all(name: &str, framework: TestFramework) -> String {
    let path = format!("tests/render_inputs/{}.cs", name);
    let source = fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {}", path));
    let tree = CSharpParser.parse(&source).expect("parser failed");
    let renderer = CSharpRenderer::new(framework);

    let mut rendered = String::new();
    for node in class_like_types(&tree) {
        let descriptor = describe(&tree, node, Path::new(&path)).expect("type has no namespace");
        let unit = renderer.render(&descriptor);
        rendered.push_str(&format!("// {}\n{}", unit.type_name, unit.source_text));
    }
    rendered
}

#[test]
fn test_shop_cart_nunit() {
    let rendered = render_all("shop_cart", TestFramework::NUnit);
    insta::assert_snapshot!("shop_cart_nunit", rendered);
}

#[test]
fn test_nested_namespaces_mstest() {
    let rendered = render_all("nested_namespaces", TestFramework::MsTest);
    insta::assert_snapshot!("nested_namespaces_mstest", rendered);
}

#[test]
fn test_file_scoped_xunit() {
    let rendered = render_all("file_scoped", TestFramework::XUnit);
    insta::assert_snapshot!("file_scoped_xunit", rendered);
}
