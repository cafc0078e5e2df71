//! Error types for the command line front end.
//!
//! Library errors live in [`crate::bundler::Error`]; this module wraps them
//! together with manifest and argument errors for the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument and manifest errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// DMG target errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Manifest could not be read or is missing required fields
    #[error("Invalid manifest {}: {reason}", .path.display())]
    InvalidManifest {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Whether this error comes from configuration rather than a tool run.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            BundlerError::Cli(_) | BundlerError::Toml(_) => true,
            BundlerError::Bundler(e) => e.is_configuration_error(),
            _ => false,
        }
    }
}
