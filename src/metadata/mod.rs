//! Package metadata and bundle configuration from a single Cargo.toml

use crate::bundler::{BundleSettings, PackageSettings};
use crate::error::{CliError, BundlerError, Result};
use std::path::{Path, PathBuf};

/// Conventional location of the application icon, relative to the manifest.
pub const DEFAULT_ICON_PATH: &str = "assets/img/icon.icns";

/// Package metadata extracted from Cargo.toml
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    /// Package name from Cargo.toml
    pub name: String,

    /// Package description from Cargo.toml
    pub description: String,

    /// Package version from Cargo.toml (e.g., "0.1.0")
    pub version: String,
}

/// Manifest data needed by the DMG target
#[derive(Debug, Clone)]
pub struct CargoManifest {
    /// Package metadata ([package] section)
    pub metadata: PackageMetadata,

    /// Bundle settings (from [package.metadata.bundle] section + asset discovery)
    pub bundle_settings: BundleSettings,

    /// Directory containing the manifest
    pub manifest_dir: PathBuf,
}

impl CargoManifest {
    /// Package settings for the settings builder.
    ///
    /// The product name comes from `[package.metadata.bundle]`, falling back
    /// to the package name.
    pub fn package_settings(&self) -> PackageSettings {
        PackageSettings {
            name: self.metadata.name.clone(),
            product_name: self
                .bundle_settings
                .product_name
                .clone()
                .unwrap_or_else(|| self.metadata.name.clone()),
            version: self.metadata.version.clone(),
            short_version: None,
            description: self.metadata.description.clone(),
        }
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> BundlerError {
    BundlerError::Cli(CliError::InvalidManifest {
        path: path.to_path_buf(),
        reason: reason.into(),
    })
}

/// Load the manifest from Cargo.toml (single read + parse)
///
/// Reads `[package]` for name, version and description, deserializes
/// `[package.metadata.bundle]` into [`BundleSettings`], then fills in the
/// application icon from `assets/img/icon.icns` when none is configured.
pub fn load_manifest(cargo_toml_path: &Path) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path)
        .map_err(|e| invalid(cargo_toml_path, format!("failed to read: {e}")))?;

    let toml_value: toml::Value = toml::from_str(&manifest)?;

    let package = toml_value
        .get("package")
        .ok_or_else(|| invalid(cargo_toml_path, "no [package] section"))?;

    let field = |key: &str| package.get(key).and_then(|v| v.as_str()).map(String::from);

    let metadata = PackageMetadata {
        name: field("name").ok_or_else(|| invalid(cargo_toml_path, "missing 'name' in [package]"))?,
        description: field("description").unwrap_or_default(),
        version: field("version")
            .ok_or_else(|| invalid(cargo_toml_path, "missing 'version' in [package]"))?,
    };

    let manifest_dir = cargo_toml_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut bundle_settings = parse_bundle_settings(&toml_value)?;
    discover_bundle_assets(&manifest_dir, &mut bundle_settings);

    Ok(CargoManifest {
        metadata,
        bundle_settings,
        manifest_dir,
    })
}

/// Parse bundle settings from [package.metadata.bundle] section
fn parse_bundle_settings(toml_value: &toml::Value) -> Result<BundleSettings> {
    let Some(bundle) = toml_value
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get("bundle"))
    else {
        log::debug!("No [package.metadata.bundle] section, using defaults");
        return Ok(BundleSettings::default());
    };

    Ok(bundle.clone().try_into()?)
}

/// Discover the application icon from the conventional directory structure
///
/// Only consulted when no icon is configured.
fn discover_bundle_assets(package_root: &Path, settings: &mut BundleSettings) {
    if settings.icon.is_some() {
        return;
    }

    let icon_path = package_root.join(DEFAULT_ICON_PATH);
    if icon_path.is_file() {
        log::info!("Found macOS icon: {}", icon_path.display());
        settings.icon = Some(icon_path);
    } else {
        log::debug!("macOS icon not found: {}", icon_path.display());
    }
}
