#![forbid(unsafe_code)]
//! stubgen: concurrent generator of placeholder unit-test skeletons
//!
//! Reads C#-style source files, finds the class-like types they declare and writes one test unit per type,
//! with one intentionally failing stub test per public method. The work runs as a three-stage pipeline
//! (load, synthesize, write), each stage with its own parallelism.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use stubgen::{GeneratorConfig, generate_tests};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::new("generated").with_parallelism(2, 4, 2);
//! let summary = generate_tests(config, ["src/Cart.cs", "src/Order.cs"])?.await?;
//! println!("wrote {} test units", summary.files_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Worker panics**: A panic inside a pipeline worker is caught at the stage boundary and reported as
//!   [`GenerateError::WorkerPanicked`]; it never takes down the run.
//!
//! - **True invariants**: If a panic represents a logic error, use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod frontend;
pub mod pipeline;
pub mod render;

pub use config::GeneratorConfig;
pub use descriptor::{RenderedUnit, TypeDescriptor, TypeRequest};
pub use error::{GenerateError, GenerationFailure};
pub use frontend::{CSharpParser, SourceParser};
pub use pipeline::{GenerationHandle, GenerationSummary, StageKind, generate_tests, generate_tests_with};
pub use render::{CSharpRenderer, TestFramework, TestRenderer};
