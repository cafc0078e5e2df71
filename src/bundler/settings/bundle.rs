//! Bundle configuration read from `[package.metadata.bundle]`.

use super::{DmgSettings, MacOsSettings};
use std::path::PathBuf;

/// Bundle configuration for the DMG target.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle]
/// product_name = "My App"
/// identifier = "com.example.app"
/// publisher = "Example Inc."
/// ```
///
/// # See Also
///
/// - [`DmgSettings`] - DMG disk image configuration
/// - [`MacOsSettings`] - macOS signing configuration
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BundleSettings {
    /// Product name shown to users. Defaults to the package name.
    #[serde(default, alias = "productName")]
    pub product_name: Option<String>,

    /// Bundle identifier in reverse domain notation.
    ///
    /// Example: "com.example.app", "ai.kodegen.app"
    ///
    /// Default: None
    #[serde(default)]
    pub identifier: Option<String>,

    /// Publisher/company name.
    ///
    /// Default: None
    #[serde(default)]
    pub publisher: Option<String>,

    /// Application icon (`.icns`), used as the default volume icon.
    ///
    /// Discovered from `assets/img/icon.icns` when not configured.
    ///
    /// Default: None
    #[serde(default)]
    pub icon: Option<PathBuf>,

    /// macOS-specific settings.
    ///
    /// See [`MacOsSettings`] for details.
    #[serde(default)]
    pub macos: MacOsSettings,

    /// DMG-specific settings.
    ///
    /// See [`DmgSettings`] for details.
    #[serde(default)]
    pub dmg: DmgSettings,
}
