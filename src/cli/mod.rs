//! CLI module for stubgen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `generate <files>... -o <dir>` - Generate numbered test units for every class-like type
//! - `inspect <file>` - Print the declaration outline and the descriptors a run would synthesize
//! - `render <file>` - Print the rendered test units without writing anything
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::render::TestFramework;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate placeholder unit-test skeletons for C# types
#[derive(Parser, Debug)]
#[command(name = "stubgen")]
#[command(version = VERSION)]
#[command(about = "Generate placeholder unit-test skeletons for C# types", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one numbered test unit per class-like type found in FILES
    Generate(GenerateArgs),

    /// Print the declaration outline and type descriptors of one file (debug)
    Inspect {
        /// Source file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the test units for one file without writing them
    Render {
        /// Source file to render
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Test framework to target
        #[arg(long, value_enum, default_value_t = TestFramework::NUnit)]
        framework: TestFramework,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source files to generate tests for
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Existing directory the test units are written to
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Parallelism of every stage (default: number of CPUs)
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Concurrent loads; overrides --jobs
    #[arg(long, value_name = "N")]
    pub load_parallelism: Option<usize>,

    /// Concurrent syntheses; overrides --jobs
    #[arg(long, value_name = "N")]
    pub synth_parallelism: Option<usize>,

    /// Concurrent writes; overrides --jobs
    #[arg(long, value_name = "N")]
    pub write_parallelism: Option<usize>,

    /// Test framework to target
    #[arg(long, value_enum, default_value_t = TestFramework::NUnit)]
    pub framework: TestFramework,

    /// Directory relative FILES are retried under (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate(args) => commands::generate(args),
        Command::Inspect { file } => commands::inspect_file(&file.to_string_lossy()),
        Command::Render { file, framework } => commands::render_file(&file.to_string_lossy(), framework),
    }
}

// ============================================================================
// Tests
// ============================================================================
