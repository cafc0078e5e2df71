//! DMG option resolution.
//!
//! Merges the user's `[package.metadata.bundle.dmg]` table with computed
//! defaults. Resolution happens once per target; the result is immutable and
//! every configuration error is raised here, before any tool runs.

use super::naming::{DMG_EXTENSION, expand_artifact_name};
use crate::bundler::{
    Arch, Error, Result, Settings,
    settings::{
        CompressionLevel, DmgContent, DmgContentType, DmgFormat, DmgSettings, DmgWindow,
    },
    utils::fs::sanitize_file_name,
};
use std::path::{Path, PathBuf};

/// Environment variable whose presence forces the zlib (`UDZO`) format.
pub const COMPRESSION_LEVEL_ENV: &str = "KODEGEN_COMPRESSION_LEVEL";

/// Icon size used when `dmg.icon_size` is unset.
pub const DEFAULT_ICON_SIZE: u32 = 80;

/// Icon label size used when `dmg.icon_text_size` is unset.
pub const DEFAULT_ICON_TEXT_SIZE: u32 = 12;

/// Fully resolved DMG configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDmgOptions {
    /// Volume icon
    pub icon: Option<PathBuf>,
    /// Background image (absolute)
    pub background: Option<PathBuf>,
    /// Background color, set only when no image is used
    pub background_color: Option<String>,
    /// Image format
    pub format: DmgFormat,
    /// Folder-view layout
    pub contents: Vec<DmgContent>,
    /// Icon size
    pub icon_size: u32,
    /// Icon label size
    pub icon_text_size: u32,
    /// Window origin and size
    pub window: DmgWindow,
    /// Code-sign the image
    pub sign: bool,
    /// Compute update info
    pub write_update_info: bool,
    /// Volume title template
    pub title: Option<String>,
    /// Artifact file name template
    pub artifact_name: Option<String>,
}

/// Resolves `options` against the packager context in `settings`.
///
/// # Errors
///
/// - [`Error::InvalidOption`] when `icon` is an empty or whitespace-only string
/// - [`Error::ConflictingOptions`] when both `background` and
///   `background_color` are set
/// - [`Error::InvalidOption`] when `artifact_name` leaves no usable file name
pub fn resolve_options(options: &DmgSettings, settings: &Settings) -> Result<ResolvedDmgOptions> {
    let icon = match options.icon.as_deref() {
        None => settings.default_icon()?,
        Some(icon) if icon.trim().is_empty() => {
            return Err(Error::InvalidOption {
                option: "icon",
                reason: "cannot be specified as an empty string".to_string(),
            });
        }
        Some(icon) => Some(settings.resolve_path(Path::new(icon))?),
    };

    let (background, background_color) =
        match (&options.background, &options.background_color) {
            (Some(_), Some(_)) => {
                return Err(Error::ConflictingOptions {
                    first: "background",
                    second: "background_color",
                });
            }
            (None, None) => (settings.default_background(), None),
            (Some(background), None) => (Some(settings.resolve_path(background)?), None),
            (None, Some(color)) => (None, Some(color.clone())),
        };

    let format = options.format.unwrap_or_else(|| {
        let env_override = std::env::var_os(COMPRESSION_LEVEL_ENV).is_some();
        select_format(settings.compression(), env_override)
    });

    let contents = match &options.contents {
        None => default_contents(),
        Some(contents) => contents
            .iter()
            .map(|entry| resolve_content(entry, settings))
            .collect::<Result<Vec<_>>>()?,
    };

    if let Some(pattern) = options.artifact_name.as_deref() {
        validate_artifact_name(pattern, settings)?;
    }

    let resolved = ResolvedDmgOptions {
        icon,
        background,
        background_color,
        format,
        contents,
        icon_size: options.icon_size.unwrap_or(DEFAULT_ICON_SIZE),
        icon_text_size: options.icon_text_size.unwrap_or(DEFAULT_ICON_TEXT_SIZE),
        window: options.window.unwrap_or_default(),
        sign: options.sign,
        write_update_info: options.write_update_info,
        title: options.title.clone(),
        artifact_name: options.artifact_name.clone(),
    };

    log::debug!("Resolved DMG options: {:?}", resolved);
    Ok(resolved)
}

/// Validates one folder-view entry and resolves file and directory sources.
///
/// Link targets are kept verbatim; they point inside the mounted image's
/// environment (usually `/Applications`), not the project.
fn resolve_content(entry: &DmgContent, settings: &Settings) -> Result<DmgContent> {
    let Some(kind) = entry.kind else {
        return Ok(entry.clone());
    };

    let Some(path) = entry.path.as_deref() else {
        return Err(Error::InvalidOption {
            option: "contents",
            reason: format!(
                "entry at ({}, {}) of type {:?} requires a path",
                entry.x, entry.y, kind
            ),
        });
    };

    let path = match kind {
        DmgContentType::Link => path.to_path_buf(),
        DmgContentType::File | DmgContentType::Dir => settings.resolve_path(path)?,
    };

    Ok(DmgContent {
        path: Some(path),
        ..entry.clone()
    })
}

/// Rejects artifact name patterns that sanitize to an empty file name.
fn validate_artifact_name(pattern: &str, settings: &Settings) -> Result<()> {
    let expanded = expand_artifact_name(pattern, settings, Arch::DEFAULT, DMG_EXTENSION);
    if sanitize_file_name(&expanded).is_empty() {
        return Err(Error::InvalidOption {
            option: "artifact_name",
            reason: format!("{pattern:?} does not produce a valid file name"),
        });
    }
    Ok(())
}

/// Picks the image format when `dmg.format` is unset.
///
/// In priority order: the environment override forces `UDZO`, `store`
/// selects `UDRO`, `maximum` selects `UDBZ`, anything else `UDZO`.
pub fn select_format(compression: CompressionLevel, env_override: bool) -> DmgFormat {
    if env_override {
        DmgFormat::Udzo
    } else if compression == CompressionLevel::Store {
        DmgFormat::Udro
    } else if compression == CompressionLevel::Maximum {
        DmgFormat::Udbz
    } else {
        DmgFormat::Udzo
    }
}

/// Application icon on the left, `/Applications` link on the right.
pub fn default_contents() -> Vec<DmgContent> {
    vec![
        DmgContent::app(130, 220),
        DmgContent::link(410, 220, "/Applications"),
    ]
}
