//! Error types for generation runs
//!
//! [`GenerateError`] covers both the synchronous configuration failure returned by
//! [`generate_tests`](crate::generate_tests) and every per-item failure a stage can report. Per-item errors
//! never abort a run; they are collected into a [`GenerationFailure`] once all stages have drained.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use miette::Diagnostic;
use stubgen_syntax::diagnostics::SyntaxError;
use thiserror::Error;

use crate::pipeline::{GenerationSummary, StageKind};

/// Errors produced while configuring or running a generation.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    /// Rejected before any work started.
    #[error("invalid configuration: {0}")]
    #[diagnostic(code(stubgen::configuration))]
    Configuration(String),

    #[error("input not found: {}", path.display())]
    #[diagnostic(code(stubgen::not_found))]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(stubgen::read))]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not valid UTF-8: {source}", path.display())]
    #[diagnostic(code(stubgen::decode))]
    Decode { path: PathBuf, source: FromUtf8Error },

    #[error("failed to parse {} ({} syntax error(s))", path.display(), errors.len())]
    #[diagnostic(code(stubgen::parse))]
    Parse {
        path: PathBuf,
        #[related]
        errors: Vec<SyntaxError>,
    },

    /// The type has no enclosing namespace, so no test namespace can be derived for it.
    #[error("type '{type_name}' in {} is not declared inside a namespace", path.display())]
    #[diagnostic(
        code(stubgen::missing_namespace),
        help("declare the type inside a namespace; its test unit lives in `<namespace>.Tests`")
    )]
    MissingNamespace { type_name: String, path: PathBuf },

    #[error("failed to write {} for type '{type_name}': {source}", path.display())]
    #[diagnostic(code(stubgen::write))]
    Write {
        path: PathBuf,
        type_name: String,
        source: io::Error,
    },

    #[error("{stage} worker panicked: {message}")]
    #[diagnostic(code(stubgen::worker_panicked))]
    WorkerPanicked { stage: StageKind, message: String },

    /// The next stage stopped accepting work (its dispatcher is gone).
    #[error("the {stage} stage is no longer accepting work")]
    #[diagnostic(code(stubgen::stage_closed))]
    StageClosed { stage: StageKind },
}

impl GenerateError {
    /// File the error is about, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            GenerateError::NotFound { path }
            | GenerateError::Read { path, .. }
            | GenerateError::Decode { path, .. }
            | GenerateError::Parse { path, .. }
            | GenerateError::MissingNamespace { path, .. }
            | GenerateError::Write { path, .. } => Some(path),
            GenerateError::Configuration(_)
            | GenerateError::WorkerPanicked { .. }
            | GenerateError::StageClosed { .. } => None,
        }
    }
}

/// Outcome of a run in which at least one item failed.
///
/// The summary still counts everything that succeeded; `errors` holds one entry per failed item.
#[derive(Debug, Error)]
#[error("{}", describe_failures(.summary, .errors))]
pub struct GenerationFailure {
    pub summary: GenerationSummary,
    pub errors: Vec<GenerateError>,
}

fn describe_failures(summary: &GenerationSummary, errors: &[GenerateError]) -> String {
    let mut out = format!(
        "{} item(s) failed ({} of {} discovered type(s) written):",
        errors.len(),
        summary.files_written,
        summary.types_discovered
    );
    for error in errors {
        let _ = write!(out, "\n  - {}", error);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_lists_every_error() {
        let failure = GenerationFailure {
            summary: GenerationSummary {
                types_discovered: 3,
                files_written: 1,
                ..GenerationSummary::default()
            },
            errors: vec![
                GenerateError::NotFound {
                    path: PathBuf::from("Missing.cs"),
                },
                GenerateError::MissingNamespace {
                    type_name: "Loose".to_string(),
                    path: PathBuf::from("Loose.cs"),
                },
            ],
        };
        assert_eq!(
            failure.to_string(),
            "2 item(s) failed (1 of 3 discovered type(s) written):\n  \
             - input not found: Missing.cs\n  \
             - type 'Loose' in Loose.cs is not declared inside a namespace"
        );
    }

    #[test]
    fn test_path_accessor() {
        let err = GenerateError::WorkerPanicked {
            stage: StageKind::Write,
            message: "boom".to_string(),
        };
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "write worker panicked: boom");

        let err = GenerateError::NotFound {
            path: PathBuf::from("a.cs"),
        };
        assert_eq!(err.path(), Some(Path::new("a.cs")));
    }

    #[test]
    fn test_parse_failure_relates_syntax_errors() {
        let errors = stubgen_syntax::parse_source("namespace N { class { } }").unwrap_err();
        let err = GenerateError::Parse {
            path: PathBuf::from("Broken.cs"),
            errors,
        };
        assert_eq!(err.code().unwrap().to_string(), "stubgen::parse");
        assert_eq!(err.related().unwrap().count(), 1);
        assert_eq!(err.to_string(), "failed to parse Broken.cs (1 syntax error(s))");
    }
}
