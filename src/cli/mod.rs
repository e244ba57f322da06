//! CLI for the fixtest harness
//!
//! ## Commands
//!
//! - `run [DIR] -- CMD [ARGS…]` - run fixture pairs against an external command
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::report::{ConsoleReporter, MAX_OUTPUT_LEN};
use crate::runner::Runner;
use crate::task::CommandTask;

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

/// File-based fixture test harness
#[derive(Parser, Debug)]
#[command(name = "fixtest")]
#[command(version = VERSION)]
#[command(about = "Run test.N.in / test.N.out fixture pairs against a command", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run fixture pairs, feeding each input to a command's stdin
    Run {
        /// Directory containing test.N.in / test.N.out fixture pairs
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Run only the fixture with this index
        #[arg(short = 't', long = "test", value_name = "N", conflicts_with = "count")]
        index: Option<u32>,

        /// Check the first N indices, skipping missing pairs
        #[arg(short = 'c', long, value_name = "N")]
        count: Option<u32>,

        /// Display cap for expected/actual values in the report
        #[arg(long = "max-output", value_name = "LEN", default_value_t = MAX_OUTPUT_LEN)]
        max_output: usize,

        /// Command to run for each fixture (reads input lines on stdin)
        #[arg(value_name = "COMMAND", last = true, required = true, num_args = 1..)]
        command: Vec<String>,
    },
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
        Command::Run {
            dir,
            index,
            count,
            max_output,
            command,
        } => execute_run(dir, index, count, max_output, &command),
    }
}

fn execute_run(
    dir: PathBuf,
    index: Option<u32>,
    count: Option<u32>,
    max_output: usize,
    command: &[String],
) -> CliResult<ExitCode> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| CliError::failure("Error: run requires a command after --"))?;

    let task = CommandTask::new(program).args(args);
    let runner = Runner::new(task, dir);
    let mut reporter = ConsoleReporter::stdout().with_max_output_len(max_output);

    if let Some(index) = index {
        return match runner.run_one_with(index, &mut reporter) {
            Some(verdict) if verdict.is_pass() => Ok(ExitCode::SUCCESS),
            Some(_) => Ok(ExitCode::FAILURE),
            None => {
                // Nothing to run is not a failure.
                eprintln!("No fixture pair for index {index}");
                Ok(ExitCode::SUCCESS)
            }
        };
    }

    let summary = match count {
        Some(count) => runner.run_count_with(count, &mut reporter),
        None => runner.run_all_with(&mut reporter),
    };

    if summary.failed > 0 || summary.errors > 0 {
        // Summary already printed by the reporter.
        Err(CliError::new("", ExitCode::FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

// ============================================================================
// Tests
// ============================================================================
