//! Builder for constructing Settings.

use super::{BundleSettings, CompressionLevel, PackageSettings, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building DMG target settings with validation.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_dmg::bundler::{CompressionLevel, PackageSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/work/my-app")
///     .vendor_dir("/work/my-app/vendor/dmg")
///     .compression(CompressionLevel::Maximum)
///     .package_settings(PackageSettings {
///         name: "my-app".into(),
///         product_name: "My App".into(),
///         version: "1.0.0".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    vendor_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    bundle_settings: BundleSettings,
    compression: CompressionLevel,
    signing_allowed: Option<bool>,
    dmgbuild_path: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// Relative icon and background paths resolve against this directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the vendored resource directory.
    ///
    /// Default: `<project_dir>/vendor/dmg`
    pub fn vendor_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.vendor_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets bundle configuration.
    ///
    /// Default: Empty [`BundleSettings`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Sets the packager compression level.
    ///
    /// Default: [`CompressionLevel::Normal`]
    pub fn compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Overrides whether code signing may run.
    ///
    /// Default: derived from the host and `CSC_IDENTITY_AUTO_DISCOVERY`
    pub fn signing_allowed(mut self, allowed: bool) -> Self {
        self.signing_allowed = Some(allowed);
        self
    }

    /// Sets an explicit `dmgbuild` executable.
    ///
    /// Default: `CUSTOM_DMGBUILD_PATH`, then `dmgbuild` on `PATH`
    pub fn dmgbuild_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dmgbuild_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or invalid:
    /// - `project_dir`
    /// - `package_settings` (the version must be valid semver)
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let project_dir = self.project_dir.context("project_dir is required")?;
        let mut package = self
            .package_settings
            .context("package_settings is required")?;
        package.validate()?;

        if package.product_name.is_empty() {
            package.product_name = self
                .bundle_settings
                .product_name
                .clone()
                .unwrap_or_else(|| package.name.clone());
        }

        let vendor_dir = self
            .vendor_dir
            .unwrap_or_else(|| project_dir.join("vendor").join("dmg"));
        let signing_allowed = self
            .signing_allowed
            .unwrap_or_else(super::core::signing_allowed_by_environment);

        Ok(Settings::new(
            package,
            self.bundle_settings,
            project_dir,
            vendor_dir,
            self.compression,
            signing_allowed,
            self.dmgbuild_path,
        ))
    }
}
