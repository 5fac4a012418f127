//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use stubgen_core::conventions;
use stubgen_syntax::diagnostics::{self, SyntaxError};
use stubgen_syntax::tree::SyntaxTree;

use super::{CliError, CliResult, ExitCode, GenerateArgs};
use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerationFailure};
use crate::frontend::{CSharpParser, SourceParser};
use crate::pipeline::loader::class_like_types;
use crate::pipeline::synthesizer::describe;
use crate::pipeline::{GenerationSummary, generate_tests};
use crate::render::{CSharpRenderer, TestFramework, TestRenderer};

/// Maximum source file size (100 MB) to prevent memory exhaustion
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

// ============================================================================
// Source loading
// ============================================================================

/// Read a source file with size validation.
///
/// ## Errors
/// Returns an error if:
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Read and parse one file, rendering every syntax error with source context.
fn parse_file(file_path: &str) -> CliResult<(String, SyntaxTree)> {
    let source = read_source(file_path)?;
    match CSharpParser.parse(&source) {
        Ok(tree) => Ok((source, tree)),
        Err(errs) => Err(CliError::failure(format_errors(file_path, &source, &errs).trim_end())),
    }
}

fn format_errors(file_path: &str, source: &str, errors: &[SyntaxError]) -> String {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&diagnostics::format_error(file_path, source, err));
    }
    msg
}

// ============================================================================
// generate
// ============================================================================

/// Build the run configuration from command-line arguments.
///
/// Per-stage flags override `--jobs`, which overrides the CPU-count default.
pub fn config_from_args(args: &GenerateArgs) -> GeneratorConfig {
    let mut config = GeneratorConfig::new(&args.output).with_framework(args.framework);
    if let Some(jobs) = args.jobs {
        config = config.with_parallelism(jobs, jobs, jobs);
    }
    if let Some(n) = args.load_parallelism {
        config = config.with_load_parallelism(n);
    }
    if let Some(n) = args.synth_parallelism {
        config = config.with_synth_parallelism(n);
    }
    if let Some(n) = args.write_parallelism {
        config = config.with_write_parallelism(n);
    }
    if let Some(root) = &args.root {
        config = config.with_search_root(root);
    }
    config
}

/// Run the pipeline over every input and report the outcome.
pub fn generate(args: GenerateArgs) -> CliResult<ExitCode> {
    let config = config_from_args(&args);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::failure(format!("Error starting async runtime: {}", e)))?;

    let outcome = runtime.block_on(async {
        let handle = generate_tests(config, args.files).map_err(|e| CliError::failure(format!("Error: {}", e)))?;
        Ok::<_, CliError>(handle.await)
    })?;

    match outcome {
        Ok(summary) => {
            println!("{}", describe_summary(&summary));
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            println!("{}", describe_summary(&failure.summary));
            Err(CliError::failure(describe_failure(&failure).trim_end()))
        }
    }
}

fn describe_summary(summary: &GenerationSummary) -> String {
    format!(
        "Wrote {} test unit(s) for {} type(s) from {} input(s) in {:.2?}",
        summary.files_written, summary.types_discovered, summary.inputs, summary.elapsed
    )
}

/// One block per failed item; parse failures are re-rendered with their source lines.
fn describe_failure(failure: &GenerationFailure) -> String {
    let mut msg = format!("{} item(s) failed:\n", failure.errors.len());
    for error in &failure.errors {
        match error {
            GenerateError::Parse { path, errors } => {
                let file_path = path.to_string_lossy();
                match fs::read_to_string(path) {
                    Ok(source) => msg.push_str(&format_errors(&file_path, &source, errors)),
                    Err(_) => {
                        let _ = writeln!(msg, "error: {}", error);
                    }
                }
            }
            other => {
                let _ = writeln!(msg, "error: {}", other);
            }
        }
    }
    msg
}

// ============================================================================
// inspect / render
// ============================================================================

/// Print the declaration outline of one file and what a run would synthesize from it.
pub fn inspect_file(file_path: &str) -> CliResult<ExitCode> {
    let (_, tree) = parse_file(file_path)?;

    println!("{}", tree.outline().trim_end());
    println!();

    let types = class_like_types(&tree);
    if types.is_empty() {
        println!("(no class-like types)");
    }
    for node in types {
        match describe(&tree, node, Path::new(file_path)) {
            Ok(descriptor) => {
                let stubs = conventions::stub_names(&descriptor.public_method_names);
                println!(
                    "{}.{} -> {}.{} [{}]",
                    descriptor.enclosing_namespace,
                    descriptor.name,
                    conventions::test_namespace(&descriptor.enclosing_namespace),
                    conventions::test_type_name(&descriptor.name),
                    stubs.join(", ")
                );
            }
            Err(e) => println!("{} -> skipped: {}", tree[node].name(), e),
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print every test unit one file would produce, in declaration order.
pub fn render_file(file_path: &str, framework: TestFramework) -> CliResult<ExitCode> {
    let (_, tree) = parse_file(file_path)?;
    let renderer = CSharpRenderer::new(framework);

    let mut failures = String::new();
    for node in class_like_types(&tree) {
        match describe(&tree, node, Path::new(file_path)) {
            Ok(descriptor) => {
                let unit = renderer.render(&descriptor);
                println!("// {}", unit.type_name);
                print!("{}", unit.source_text);
            }
            Err(e) => {
                let _ = writeln!(failures, "error: {}", e);
            }
        }
    }

    if failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(failures.trim_end()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Command;
    use clap::Parser;
    use std::path::PathBuf;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["stubgen", "generate"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Generate(args) => args,
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn test_stage_flags_override_jobs() {
        let args = generate_args(&["A.cs", "-o", "out", "-j", "3", "--synth-parallelism", "7", "--root", "/src"]);
        let config = config_from_args(&args);
        assert_eq!(
            (config.load_parallelism, config.synth_parallelism, config.write_parallelism),
            (3, 7, 3)
        );
        assert_eq!(config.search_root, PathBuf::from("/src"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source("definitely/not/here.cs").unwrap_err();
        assert!(err.message.starts_with("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_parse_file_renders_source_context() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Broken.cs");
        fs::write(&file, "namespace N {\n  class {}\n}\n").unwrap();

        let err = parse_file(&file.to_string_lossy()).unwrap_err();
        assert!(err.message.contains("expected class name"));
        assert!(err.message.contains("Broken.cs:2:"));
    }

    #[test]
    fn test_generate_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        let good = dir.path().join("Good.cs");
        fs::write(&good, "namespace N { class Good { public void Run() {} } }").unwrap();

        let args = generate_args(&[
            &good.to_string_lossy(),
            "Missing.cs",
            "-o",
            &out.to_string_lossy(),
            "--root",
            &dir.path().to_string_lossy(),
        ]);
        let err = generate(args).unwrap_err();
        assert!(err.message.starts_with("1 item(s) failed:"));
        assert!(err.message.contains("input not found: Missing.cs"));
        assert!(out.join("1.cs").exists());
    }
}
