//! External process invocation.
//!
//! Subprocess runs are modeled as values: a [`ProcessCommand`] describing
//! the invocation and a [`RunOutput`] carrying the exit code and captured
//! stderr. Failures are reported through the output, never as panics. The
//! [`ProcessRunner`] trait is the seam the pipeline uses so tests can record
//! invocations without spawning anything.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// A fully described external process invocation.
#[derive(Clone, Debug)]
pub struct ProcessCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Bytes piped to the child's stdin, if any.
    pub stdin: Option<Vec<u8>>,
}

impl ProcessCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn stdin_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.stdin = Some(bytes);
        self
    }
}

/// Exit status and captured stderr of a finished process.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn ok() -> Self {
        Self {
            code: Some(0),
            stderr: String::new(),
        }
    }
}

/// Seam for spawning external processes.
#[cfg_attr(test, automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion, capturing exit status and stderr.
    fn run(&self, cmd: &ProcessCommand) -> std::io::Result<RunOutput>;
}

/// Real runner backed by `std::process::Command`.
#[derive(Clone, Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &ProcessCommand) -> std::io::Result<RunOutput> {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        debug!(target = "tts", command = ?command, "Running external process");

        let output = match &cmd.stdin {
            Some(bytes) => {
                command.stdin(Stdio::piped());
                let mut child = command.spawn()?;
                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(bytes)?;
                }
                child.wait_with_output()?
            }
            None => {
                command.stdin(Stdio::null());
                command.output()?
            }
        };

        Ok(RunOutput {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
