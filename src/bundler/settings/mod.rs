//! Configuration structures for the DMG target.
//!
//! This module provides the configuration types read from
//! `[package.metadata.bundle]`, package metadata, and the builder used to
//! assemble them into [`Settings`].

mod arch;
mod builder;
mod bundle;
mod compression;
mod core;
mod macos;
mod package;

// Re-export all public types
pub use arch::{Arch, arch_suffix};
pub use builder::SettingsBuilder;
pub use bundle::BundleSettings;
pub use compression::CompressionLevel;
pub use core::{
    DEFAULT_BACKGROUND_FILE, IDENTITY_AUTO_DISCOVERY_ENV, Settings,
    signing_allowed_by_environment,
};
pub use macos::{
    DmgContent, DmgContentType, DmgFormat, DmgSettings, DmgWindow, MacOsSettings,
    SigningIdentity,
};
pub use package::PackageSettings;
