#![forbid(unsafe_code)]
//! fixtest - a file-based fixture test harness
//!
//! Fixtures are numbered input/expected-output pairs on disk: for a base
//! directory `D` and index `N`, the input lives at `D/test.N.in` and the
//! expected output at `D/test.N.out`. The [`Runner`] feeds each input (as
//! ordered lines) to a [`Task`], compares the produced string against the
//! expected file (trailing newlines normalized), and reports a verdict per
//! fixture through a pluggable [`Reporter`].
//!
//! ```no_run
//! use fixtest::Runner;
//!
//! let sum = |lines: &[String]| -> String {
//!     lines
//!         .iter()
//!         .filter_map(|l| l.parse::<i64>().ok())
//!         .sum::<i64>()
//!         .to_string()
//! };
//!
//! let runner = Runner::new(sum, "tests/fixtures/sum");
//! let summary = runner.run_all();
//! assert_eq!(summary.failed, 0);
//! ```
//!
//! ## Panic Policy
//!
//! Production code uses `Result`/`Option` with `?`; the `cli` module
//! enforces `#![deny(clippy::unwrap_used)]`. `.unwrap()` is acceptable in
//! test code.

pub mod cli;
pub mod report;
pub mod runner;
pub mod task;

pub use report::{ConsoleReporter, MAX_OUTPUT_LEN, Reporter, truncate_for_display};
pub use runner::{HarnessError, RunSummary, Runner, Verdict, trim_trailing_newlines};
pub use task::{CommandTask, Task};
