//! macOS disk image target for the kodegen bundler
//!
//! Packages an already-built `.app` bundle into a drag-to-install `.dmg`
//! using `dmgbuild`, optionally code-signs it, and reports the artifact with
//! size and SHA-512 update info.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
