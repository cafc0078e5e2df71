//! External process execution.
//!
//! Every external tool the DMG target runs (`dmgbuild`, `security`,
//! `codesign`) is described by a [`CommandSpec`] and executed through a
//! [`ProcessRunner`], so builds can be driven by a fake runner in tests.

use crate::bundler::error::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Description of one external command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable to run
    pub program: PathBuf,
    /// Arguments in order
    pub args: Vec<String>,
    /// Working directory, `None` to inherit
    pub current_dir: Option<PathBuf>,
    /// Variables set on top of the inherited environment
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Creates a command for `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a path argument.
    ///
    /// Fails for paths that are not valid UTF-8, which external tools cannot
    /// receive reliably.
    pub fn path_arg(self, path: &Path) -> Result<Self> {
        let arg = path.to_str().ok_or_else(|| {
            Error::GenericError(format!(
                "Path contains non-UTF8 characters: {}",
                path.display()
            ))
        })?;
        Ok(self.arg(arg))
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Sets an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Short name of the program, used in logs and errors.
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

/// Captured result of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Converts a non-zero exit into [`Error::ToolFailed`].
    pub fn check(self, command: &CommandSpec) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::ToolFailed {
                command: command.display_name(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs external commands to completion.
///
/// `Err` means the process could not be started; a process that ran and
/// failed is reported through [`ProcessOutput::code`].
pub trait ProcessRunner {
    /// Runs `command` and waits for it to exit.
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<ProcessOutput>> + Send;
}

impl<T: ProcessRunner + Sync> ProcessRunner for &T {
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<ProcessOutput>> + Send {
        (**self).run(command)
    }
}

/// [`ProcessRunner`] backed by `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioProcessRunner;

impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        log::debug!(
            "Running {} {}",
            command.program.display(),
            command.args.join(" ")
        );

        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }
        cmd.envs(command.env.iter().map(|(k, v)| (k, v)));

        let output = cmd.output().await.map_err(|error| Error::CommandFailed {
            command: command.display_name(),
            error,
        })?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
