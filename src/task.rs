//! The task capability boundary
//!
//! The harness calls exactly one operation on the unit under test: given
//! the ordered input lines, produce a single output string. How the task
//! parses or interprets the lines is its own business.

use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::warn;

/// A unit under test.
///
/// Implement this trait (or just pass a closure — see the blanket impl)
/// and hand it to [`Runner::new`](crate::Runner::new).
pub trait Task {
    /// Run the task over the parsed input lines and return its output.
    fn run(&self, lines: &[String]) -> String;
}

/// Any `Fn(&[String]) -> String` is a task.
impl<F> Task for F
where
    F: Fn(&[String]) -> String,
{
    fn run(&self, lines: &[String]) -> String {
        self(lines)
    }
}

/// A task backed by an external command.
///
/// The input lines are written to the child's stdin joined with `\n` (plus
/// a final newline); the task's output is the child's stdout, lossy-decoded
/// with trailing `\n`/`\r` stripped so `echo`-style programs compare
/// cleanly against expected-output files.
///
/// The `Task` contract is infallible, so spawn/wait failures surface in the
/// returned string (where the report will show them as a mismatch) rather
/// than as an error type.
pub struct CommandTask {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandTask {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Task for CommandTask {
    fn run(&self, lines: &[String]) -> String {
        let mut child = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return format!("<failed to spawn {}: {}>", self.program.to_string_lossy(), e);
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            let input = if lines.is_empty() {
                String::new()
            } else {
                let mut joined = lines.join("\n");
                joined.push('\n');
                joined
            };
            // A closed pipe just means the child stopped reading early.
            let _ = stdin.write_all(input.as_bytes());
        }

        match child.wait_with_output() {
            Ok(output) => {
                if !output.status.success() {
                    warn!(
                        program = %self.program.to_string_lossy(),
                        status = %output.status,
                        stderr = %String::from_utf8_lossy(&output.stderr),
                        "task command exited with non-zero status"
                    );
                }
                String::from_utf8_lossy(&output.stdout)
                    .trim_end_matches(['\n', '\r'])
                    .to_string()
            }
            Err(e) => format!("<failed to run {}: {}>", self.program.to_string_lossy(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_tasks() {
        let task = |lines: &[String]| lines.len().to_string();
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(task.run(&lines), "2");
    }

    #[cfg(unix)]
    #[test]
    fn command_task_echoes_stdin() {
        let task = CommandTask::new("cat");
        let lines = vec!["3".to_string(), "4".to_string()];
        assert_eq!(task.run(&lines), "3\n4");
    }

    #[cfg(unix)]
    #[test]
    fn command_task_surfaces_spawn_failure_in_output() {
        let task = CommandTask::new("definitely-not-a-real-binary-a8f2");
        let out = task.run(&[]);
        assert!(out.starts_with("<failed to spawn"), "got: {}", out);
    }
}
