//! Package metadata and configuration.

use crate::bundler::utils::fs::sanitize_file_name;

/// Package metadata and configuration.
///
/// Contains the application information used to name the disk image and its
/// volume. This typically maps from the `Cargo.toml` `[package]` section.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_dmg::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     name: "my-app".into(),
///     product_name: "My App".into(),
///     version: "1.0.0".into(),
///     ..Default::default()
/// };
/// assert_eq!(settings.product_filename(), "My App");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Package name (machine name, e.g. from `package.name`).
    pub name: String,

    /// Product name displayed to users.
    ///
    /// This is the human-readable name shown as the volume title and in the
    /// artifact name. Falls back to `name` when not configured.
    pub product_name: String,

    /// Version string in semantic versioning format.
    ///
    /// Example: "1.0.0", "0.2.3-beta.1"
    pub version: String,

    /// Short version (CFBundleShortVersionString) if it differs from `version`.
    ///
    /// Default: None
    pub short_version: Option<String>,

    /// Brief description of the application.
    pub description: String,
}

impl PackageSettings {
    /// Product name made safe for use as a file name.
    pub fn product_filename(&self) -> String {
        sanitize_file_name(&self.product_name)
    }

    /// Short version, falling back to the full version.
    pub fn short_version_or_version(&self) -> &str {
        self.short_version.as_deref().unwrap_or(&self.version)
    }

    /// Checks that the version is valid semver.
    pub fn validate(&self) -> crate::bundler::Result<()> {
        semver::Version::parse(&self.version).map_err(|e| {
            crate::bundler::Error::GenericError(format!(
                "Invalid version \"{}\" for {}: {}",
                self.version, self.name, e
            ))
        })?;
        Ok(())
    }
}
