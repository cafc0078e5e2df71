//! Platform-specific targets.

pub mod macos;
