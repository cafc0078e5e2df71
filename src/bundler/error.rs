//! Error types for DMG bundling operations.
//!
//! Configuration errors are raised before any external process runs. Tool
//! errors carry the command and its stderr so failures in `dmgbuild` or
//! `codesign` surface with enough detail to act on.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving options, building, signing or reporting a DMG.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is present but unusable.
    #[error("Invalid configuration: dmg.{option} {reason}")]
    InvalidOption {
        /// Option name as written in the manifest
        option: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Two mutually exclusive options were both set.
    #[error(
        "Invalid configuration: both dmg.{first} and dmg.{second} are specified, only one of them may be set"
    )]
    ConflictingOptions {
        /// First option name
        first: &'static str,
        /// Second option name
        second: &'static str,
    },

    /// An external tool could not be located.
    #[error("Required tool `{tool}` not found: {reason}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// Why resolution failed
        reason: String,
    },

    /// An external command could not be spawned.
    #[error("Failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying spawn error
        error: io::Error,
    },

    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` exited with {}: {stderr}", describe_exit(.code))]
    ToolFailed {
        /// Command that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// File system operation failed on a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        error: io::Error,
    },

    /// Settings script rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Unsupported or unparsable architecture.
    #[error("Architecture error: {0}")]
    ArchError(String),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}

impl Error {
    /// Whether this error was caused by invalid user configuration.
    ///
    /// Configuration errors are raised before any external process is spawned.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidOption { .. } | Error::ConflictingOptions { .. }
        )
    }
}

/// Attach context to fallible values.
pub trait Context<T> {
    /// Wrap the error with a static context message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error with a lazily built context message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// File system error helpers.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`] carrying the path and a description.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
