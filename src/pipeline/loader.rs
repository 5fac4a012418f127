//! Loader stage: resolve, read, decode and parse one input, then emit its class-like types.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stubgen_syntax::tree::{NodeId, NodeKind, SyntaxTree};
use tracing::debug;

use super::StageKind;
use crate::descriptor::TypeRequest;
use crate::error::GenerateError;
use crate::frontend::SourceParser;

/// Find the file `input` refers to.
///
/// The path is tried as given first; a relative path that does not exist is retried under `search_root`.
///
/// ## Errors
/// [`GenerateError::NotFound`] (carrying `input` as given) when neither location exists.
pub(crate) async fn resolve(input: &Path, search_root: &Path) -> Result<PathBuf, GenerateError> {
    if tokio::fs::metadata(input).await.is_ok() {
        return Ok(input.to_path_buf());
    }
    if input.is_relative() {
        let rooted = search_root.join(input);
        if tokio::fs::metadata(&rooted).await.is_ok() {
            return Ok(rooted);
        }
    }
    Err(GenerateError::NotFound {
        path: input.to_path_buf(),
    })
}

/// Load one input and pass every class-like type it declares to `emit`.
///
/// Returns how many types were emitted.
///
/// ## Errors
/// The first failure for this input: `NotFound`, `Read`, `Decode`, `Parse`, or whatever `emit` returned.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub(crate) async fn load(
    input: PathBuf,
    search_root: &Path,
    parser: Arc<dyn SourceParser>,
    mut emit: impl FnMut(TypeRequest) -> Result<(), GenerateError>,
) -> Result<usize, GenerateError> {
    let path = resolve(&input, search_root).await?;

    let bytes = tokio::fs::read(&path).await.map_err(|source| GenerateError::Read {
        path: path.clone(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| GenerateError::Decode {
        path: path.clone(),
        source,
    })?;

    // Parsing is CPU-bound; keep it off the async workers
    let tree = tokio::task::spawn_blocking(move || parser.parse(&text))
        .await
        .map_err(|e| GenerateError::WorkerPanicked {
            stage: StageKind::Load,
            message: super::stage::panic_message(e),
        })?
        .map_err(|errors| GenerateError::Parse {
            path: path.clone(),
            errors,
        })?;
    let tree = Arc::new(tree);

    let types = class_like_types(&tree);
    for node in types.iter().copied() {
        debug!(type_name = tree[node].name(), "Discovered type");
        emit(TypeRequest {
            source: path.clone(),
            tree: Arc::clone(&tree),
            node,
        })?;
    }
    Ok(types.len())
}

/// Class-like type declarations reachable from the root through namespaces only, in declaration order.
///
/// Interfaces, enums and types nested inside other types are not returned.
pub fn class_like_types(tree: &SyntaxTree) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeId> = tree.children(tree.root()).collect();
    stack.reverse();

    while let Some(id) = stack.pop() {
        match tree[id].kind() {
            NodeKind::Namespace => {
                let children: Vec<NodeId> = tree.children(id).collect();
                stack.extend(children.into_iter().rev());
            }
            NodeKind::Type(kind) if kind.is_class_like() => found.push(id),
            _ => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::CSharpParser;

    fn names(tree: &SyntaxTree) -> Vec<&str> {
        class_like_types(tree).into_iter().map(|id| tree[id].name()).collect()
    }

    #[test]
    fn test_types_in_declaration_order() {
        let tree = CSharpParser
            .parse(
                "namespace A { class First { class Inner {} } interface IGone {} \
                 namespace B { struct Second {} enum Gone {} } record Third; }",
            )
            .unwrap();
        assert_eq!(names(&tree), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_top_level_types_are_found() {
        let tree = CSharpParser.parse("class Loose {}").unwrap();
        assert_eq!(names(&tree), vec!["Loose"]);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_search_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Only.cs"), "").unwrap();

        let resolved = resolve(Path::new("Only.cs"), dir.path()).await.unwrap();
        assert_eq!(resolved, dir.path().join("Only.cs"));

        let err = resolve(Path::new("Absent.cs"), dir.path()).await.unwrap_err();
        assert_eq!(err.path(), Some(Path::new("Absent.cs")));
    }

    #[tokio::test]
    async fn test_load_emits_each_type() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Shop.cs");
        std::fs::write(&file, "namespace Shop { class Cart {} class Order {} }").unwrap();

        let mut emitted = Vec::new();
        let count = load(file.clone(), dir.path(), Arc::new(CSharpParser), |request| {
            emitted.push(request.type_name().to_string());
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(emitted, vec!["Cart", "Order"]);
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Bad.cs");
        std::fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        let err = load(file, dir.path(), Arc::new(CSharpParser), |_| Ok(()))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Decode { .. }));
    }
}
