//! Test reporting
//!
//! The runner never prints; it drives a [`Reporter`] so output format is a
//! presentation concern layered on top of the discovery+compare loop.
//! Implement the trait to get custom formats without touching execution.

use std::borrow::Cow;
use std::io::{self, Write};
use std::time::Duration;

use crate::runner::{RunSummary, Verdict};

/// Display cap for expected/actual values in the default report.
///
/// Cosmetic only: values longer than this are cut and marked with `..` in
/// the log, never in the comparison.
pub const MAX_OUTPUT_LEN: usize = 250;

/// Trait for reporting fixture execution.
///
/// All methods have empty defaults, so an implementation only listens to
/// the events it cares about.
pub trait Reporter {
    /// Called when a fixture with both files present starts executing.
    fn on_test_start(&mut self, _index: u32) {}

    /// Called with the expected output, after the fixture files were read.
    fn on_expected(&mut self, _index: u32, _expected: &str) {}

    /// Called with the produced output and the task's wall-clock time.
    fn on_actual(&mut self, _index: u32, _actual: &str, _elapsed: Duration) {}

    /// Called with the verdict for one fixture.
    fn on_test_complete(&mut self, _index: u32, _verdict: &Verdict) {}

    /// Called once after a `run_all`/`run_count` sweep.
    fn on_run_complete(&mut self, _summary: &RunSummary) {}
}

/// Truncate a value for display, appending a `..` marker when cut.
///
/// The cut lands on the nearest char boundary at or below `max` bytes, so
/// multi-byte content never splits mid-character.
pub fn truncate_for_display(s: &str, max: usize) -> Cow<'_, str> {
    if s.len() <= max {
        return Cow::Borrowed(s);
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}..", &s[..end]))
}

/// Default console reporter.
///
/// Writes a human-readable report to any [`Write`] sink (stdout by
/// default): start marker, expected and actual values (truncated at
/// [`MAX_OUTPUT_LEN`]), elapsed time, verdict, and a separator per test.
pub struct ConsoleReporter<W: Write> {
    out: W,
    max_output_len: usize,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleReporter::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            max_output_len: MAX_OUTPUT_LEN,
        }
    }

    pub fn with_max_output_len(mut self, max: usize) -> Self {
        self.max_output_len = max;
        self
    }

    /// Consume the reporter and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_test_start(&mut self, index: u32) {
        let _ = writeln!(self.out, "Start test {index}");
    }

    fn on_expected(&mut self, _index: u32, expected: &str) {
        let _ = writeln!(
            self.out,
            "Expect {}",
            truncate_for_display(expected, self.max_output_len)
        );
    }

    fn on_actual(&mut self, _index: u32, actual: &str, elapsed: Duration) {
        let _ = writeln!(
            self.out,
            "Got {}",
            truncate_for_display(actual, self.max_output_len)
        );
        let _ = writeln!(self.out, "Execution time {elapsed:?}");
    }

    fn on_test_complete(&mut self, index: u32, verdict: &Verdict) {
        let _ = match verdict {
            Verdict::Passed(_) => writeln!(self.out, "Test {index} is successful"),
            Verdict::Failed(_) => writeln!(self.out, "Test {index} failed"),
            Verdict::Error(e) => writeln!(self.out, "Test {index} returned an error: {e}"),
        };
        let _ = writeln!(self.out, "=========================");
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("{} passed", summary.passed));
        }
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed));
        }
        if summary.errors > 0 {
            parts.push(format!("{} errored", summary.errors));
        }
        if parts.is_empty() {
            parts.push("no fixtures".to_string());
        }
        let _ = writeln!(
            self.out,
            "====== {} in {:.2}s ======",
            parts.join(", "),
            summary.duration.as_secs_f64()
        );
    }
}
