//! Core Settings struct and implementations.

use super::{Arch, BundleSettings, CompressionLevel, DmgSettings, MacOsSettings, PackageSettings};
use crate::bundler::error::{ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// File name of the default background shipped in the vendor directory.
pub const DEFAULT_BACKGROUND_FILE: &str = "background.tiff";

/// Environment variable that disables identity auto-discovery when set to `false`.
pub const IDENTITY_AUTO_DISCOVERY_ENV: &str = "CSC_IDENTITY_AUTO_DISCOVERY";

/// Main settings for the DMG target.
///
/// Central, read-only context handed to every resolver and invoker: package
/// metadata, bundle configuration and the packager-wide options that the DMG
/// target consults. Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_dmg::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir(".")
///     .package_settings(PackageSettings {
///         name: "my-app".into(),
///         product_name: "My App".into(),
///         version: "1.0.0".into(),
///         ..Default::default()
///     })
///     .build()?;
/// assert_eq!(settings.product_name(), "My App");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Bundle configuration.
    bundle_settings: BundleSettings,

    /// Project root; relative paths in the configuration resolve against it.
    project_dir: PathBuf,

    /// Vendored resource directory; `dmgbuild` runs with this as working directory.
    vendor_dir: PathBuf,

    /// Packager-wide compression level.
    compression: CompressionLevel,

    /// Whether code signing may run in this execution context.
    signing_allowed: bool,

    /// Explicit `dmgbuild` executable.
    dmgbuild_path: Option<PathBuf>,
}

impl Settings {
    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Version shown in default volume names.
    ///
    /// Prefers `macos.bundle_short_version`, then the package short version,
    /// then the full version.
    pub fn short_version(&self) -> &str {
        self.bundle_settings
            .macos
            .bundle_short_version
            .as_deref()
            .unwrap_or_else(|| self.package.short_version_or_version())
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns the DMG configuration.
    pub fn dmg_settings(&self) -> &DmgSettings {
        &self.bundle_settings.dmg
    }

    /// Returns the macOS configuration.
    pub fn macos_settings(&self) -> &MacOsSettings {
        &self.bundle_settings.macos
    }

    /// Configured default architecture, if any.
    pub fn default_arch(&self) -> Option<Arch> {
        self.bundle_settings.macos.default_arch
    }

    /// Returns the project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the vendored resource directory.
    pub fn vendor_dir(&self) -> &Path {
        &self.vendor_dir
    }

    /// Returns the packager compression level.
    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }

    /// Whether signing may run in this execution context.
    pub fn signing_allowed(&self) -> bool {
        self.signing_allowed
    }

    /// Explicit `dmgbuild` executable, if configured.
    pub fn dmgbuild_path(&self) -> Option<&Path> {
        self.dmgbuild_path.as_deref()
    }

    /// Resolves `path` against the project root.
    pub fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(path
            .absolutize_from(&self.project_dir)
            .fs_context("resolving path", path)?
            .into_owned())
    }

    /// Default volume icon: the application icon, if one is known.
    pub fn default_icon(&self) -> Result<Option<PathBuf>> {
        self.bundle_settings
            .icon
            .as_deref()
            .map(|icon| self.resolve_path(icon))
            .transpose()
    }

    /// Default background: the vendored `background.tiff`, when present.
    pub fn default_background(&self) -> Option<PathBuf> {
        let background = self.vendor_dir.join(DEFAULT_BACKGROUND_FILE);
        if background.is_file() {
            Some(background)
        } else {
            log::debug!(
                "No default DMG background at {}, using plain window",
                background.display()
            );
            None
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle_settings: BundleSettings,
        project_dir: PathBuf,
        vendor_dir: PathBuf,
        compression: CompressionLevel,
        signing_allowed: bool,
        dmgbuild_path: Option<PathBuf>,
    ) -> Self {
        Self {
            package,
            bundle_settings,
            project_dir,
            vendor_dir,
            compression,
            signing_allowed,
            dmgbuild_path,
        }
    }
}

/// Whether the environment permits code signing.
///
/// Signing requires a macOS host and is turned off by
/// `CSC_IDENTITY_AUTO_DISCOVERY=false`.
pub fn signing_allowed_by_environment() -> bool {
    if !cfg!(target_os = "macos") {
        return false;
    }
    !matches!(
        std::env::var(IDENTITY_AUTO_DISCOVERY_ENV).as_deref(),
        Ok("false")
    )
}
