//! Fixture discovery and execution
//!
//! The runner walks numbered fixture pairs (`test.N.in` / `test.N.out`)
//! under a base directory, feeds each input to the task, and compares the
//! produced output against the expected output.
//!
//! ## Fixture layout
//!
//! For base directory `D` and integer `N >= 0`, the input lives at
//! `D/test.N.in` and the expected output at `D/test.N.out`. Absence of
//! either file at a given `N` is the end-of-sequence signal for
//! [`Runner::run_all`]; the bounded entry points skip such indices instead.
//!
//! ## Failure semantics
//!
//! Missing files are control flow, not errors. A file that exists but
//! cannot be read yields a [`Verdict::Error`] for that index and the run
//! continues; nothing here terminates the overall run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::report::{ConsoleReporter, Reporter};
use crate::task::Task;

/// Errors that occur while reading a fixture's files.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read expected output {path}: {source}")]
    ReadExpected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of executing a single fixture.
#[derive(Debug)]
pub enum Verdict {
    /// Produced output matched the expected output exactly.
    Passed(Duration),
    /// Produced output differed from the expected output.
    Failed(Duration),
    /// A fixture file existed but could not be read; no pass/fail verdict.
    Error(HarnessError),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Passed(_))
    }
}

/// Aggregate counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub duration: Duration,
}

impl RunSummary {
    /// Number of fixtures that were actually executed.
    pub fn executed(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Passed(_) => self.passed += 1,
            Verdict::Failed(_) => self.failed += 1,
            Verdict::Error(_) => self.errors += 1,
        }
    }
}

/// Sequential fixture runner bound to a task and a base directory.
///
/// Construction performs no I/O; all file access happens inside the run
/// entry points, and file contents are read whole per operation so no
/// handle outlives the read.
pub struct Runner<T: Task> {
    task: T,
    path: PathBuf,
}

impl<T: Task> Runner<T> {
    pub fn new(task: T, path: impl Into<PathBuf>) -> Self {
        Self {
            task,
            path: path.into(),
        }
    }

    /// Run fixtures 0, 1, 2, … until the first index with a missing pair.
    ///
    /// An index whose files exist but fail to read still counts as
    /// executed (with an error verdict) and does not stop the scan.
    pub fn run_all(&self) -> RunSummary {
        self.run_all_with(&mut ConsoleReporter::stdout())
    }

    pub fn run_all_with(&self, reporter: &mut dyn Reporter) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::default();
        let mut index = 0u32;

        loop {
            let (input, expected) = self.fixture_paths(index);
            if !(input.exists() && expected.exists()) {
                debug!(index, "no fixture pair, stopping sequential run");
                break;
            }
            summary.record(&self.execute(index, &input, &expected, reporter));
            index += 1;
        }

        summary.duration = start.elapsed();
        reporter.on_run_complete(&summary);
        summary
    }

    /// Run fixtures `0..count`, silently skipping indices with a missing
    /// pair. Unlike [`run_all`](Self::run_all), a gap never stops the loop.
    pub fn run_count(&self, count: u32) -> RunSummary {
        self.run_count_with(count, &mut ConsoleReporter::stdout())
    }

    pub fn run_count_with(&self, count: u32, reporter: &mut dyn Reporter) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        for index in 0..count {
            let (input, expected) = self.fixture_paths(index);
            if !(input.exists() && expected.exists()) {
                debug!(index, "no fixture pair, skipping index");
                continue;
            }
            summary.record(&self.execute(index, &input, &expected, reporter));
        }

        summary.duration = start.elapsed();
        reporter.on_run_complete(&summary);
        summary
    }

    /// Run exactly the given fixture index, or do nothing if either of its
    /// files is missing.
    pub fn run_one(&self, index: u32) -> Option<Verdict> {
        self.run_one_with(index, &mut ConsoleReporter::stdout())
    }

    pub fn run_one_with(&self, index: u32, reporter: &mut dyn Reporter) -> Option<Verdict> {
        let (input, expected) = self.fixture_paths(index);
        if !(input.exists() && expected.exists()) {
            debug!(index, "no fixture pair");
            return None;
        }
        Some(self.execute(index, &input, &expected, reporter))
    }

    fn fixture_paths(&self, index: u32) -> (PathBuf, PathBuf) {
        (
            self.path.join(format!("test.{index}.in")),
            self.path.join(format!("test.{index}.out")),
        )
    }

    fn execute(
        &self,
        index: u32,
        input: &Path,
        expected: &Path,
        reporter: &mut dyn Reporter,
    ) -> Verdict {
        reporter.on_test_start(index);

        let lines = match read_lines(input) {
            Ok(lines) => lines,
            Err(e) => return self.report_error(index, e, reporter),
        };
        let expected = match read_expected(expected) {
            Ok(expected) => expected,
            Err(e) => return self.report_error(index, e, reporter),
        };
        reporter.on_expected(index, &expected);

        let start = Instant::now();
        let actual = self.task.run(&lines);
        let elapsed = start.elapsed();
        reporter.on_actual(index, &actual, elapsed);

        let verdict = if actual == expected {
            Verdict::Passed(elapsed)
        } else {
            Verdict::Failed(elapsed)
        };
        reporter.on_test_complete(index, &verdict);
        verdict
    }

    fn report_error(
        &self,
        index: u32,
        error: HarnessError,
        reporter: &mut dyn Reporter,
    ) -> Verdict {
        let verdict = Verdict::Error(error);
        reporter.on_test_complete(index, &verdict);
        verdict
    }
}

/// Strip trailing `\n` and `\r` characters (any mix) from the end of a
/// string, leaving embedded and leading ones untouched.
pub fn trim_trailing_newlines(s: &str) -> &str {
    s.trim_end_matches(['\n', '\r'])
}

/// Read a file as an ordered sequence of text lines.
///
/// Byte-level split on `\n` with one trailing `\r` stripped per line, so
/// LF and CRLF inputs parse identically; a final trailing newline does not
/// produce a phantom empty last line. Non-UTF-8 bytes are lossy-decoded.
fn read_lines(path: &Path) -> Result<Vec<String>, HarnessError> {
    let bytes = fs::read(path).map_err(|source| HarnessError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut raw: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    if bytes.last() == Some(&b'\n') {
        raw.pop();
    }

    Ok(raw
        .into_iter()
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            String::from_utf8_lossy(line).into_owned()
        })
        .collect())
}

/// Read an expected-output file fully, with trailing newlines normalized.
fn read_expected(path: &Path) -> Result<String, HarnessError> {
    let bytes = fs::read(path).map_err(|source| HarnessError::ReadExpected {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(trim_trailing_newlines(&String::from_utf8_lossy(&bytes)).to_string())
}
