//! dmgbuild settings script generation.
//!
//! Renders the resolved options into the Python settings file `dmgbuild`
//! reads, using Handlebars with HTML escaping disabled.

use super::{options::ResolvedDmgOptions, template::DMGBUILD_SETTINGS_TEMPLATE};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::DmgContentType,
};
use handlebars::Handlebars;
use std::path::{Path, PathBuf};

/// Window width used when `dmg.window.width` is unset.
pub const DEFAULT_WINDOW_WIDTH: u32 = 540;

/// Window height used when `dmg.window.height` is unset.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 380;

/// File name of the rendered script.
pub const SETTINGS_FILE_NAME: &str = "settings.py";

#[derive(serde::Serialize)]
struct NamedSource {
    source: String,
    name: String,
}

#[derive(serde::Serialize)]
struct Symlink {
    name: String,
    target: String,
}

#[derive(serde::Serialize)]
struct IconLocation {
    name: String,
    x: i32,
    y: i32,
}

#[derive(serde::Serialize)]
struct ScriptData {
    volume_name: String,
    format: &'static str,
    files: Vec<NamedSource>,
    symlinks: Vec<Symlink>,
    icon_locations: Vec<IconLocation>,
    icon: Option<String>,
    background: Option<String>,
    window_x: i32,
    window_y: i32,
    window_width: u32,
    window_height: u32,
    icon_size: u32,
    text_size: u32,
}

/// Escapes a value for a double-quoted Python string literal.
///
/// # Examples
/// ```
/// # fn escape_python_string(s: &str) -> String {
/// #     s.replace('\\', r"\\").replace('"', r#"\""#).replace('\n', r"\n").replace('\r', r"\r")
/// # }
/// assert_eq!(escape_python_string("My\"App"), "My\\\"App");
/// assert_eq!(escape_python_string("Path\\File"), "Path\\\\File");
/// ```
fn escape_python_string(s: &str) -> String {
    s.replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
}

fn escape_path(path: &Path) -> String {
    escape_python_string(&path.to_string_lossy())
}

/// Name an entry is shown under: its explicit name, else the file name of its path.
fn entry_name(name: Option<&str>, path: &Path) -> Result<String> {
    if let Some(name) = name {
        return Ok(name.to_string());
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::GenericError(format!(
                "Cannot derive a DMG entry name from {}",
                path.display()
            ))
        })
}

/// Renders the dmgbuild settings script into `dir`.
///
/// # Arguments
/// - `options` - Resolved DMG options
/// - `volume_name` - Sanitized volume name (recorded as a comment)
/// - `app_path` - Application bundle; its file name labels the app icon
/// - `dir` - Directory to write `settings.py` into
///
/// # Returns
/// Path to the generated `settings.py`
pub async fn render_settings_script(
    options: &ResolvedDmgOptions,
    volume_name: &str,
    app_path: &Path,
    dir: &Path,
) -> Result<PathBuf> {
    let app_name = entry_name(None, app_path)?;

    let mut files = Vec::new();
    let mut symlinks = Vec::new();
    let mut icon_locations = Vec::new();

    for entry in &options.contents {
        let name = match (entry.kind, entry.path.as_deref()) {
            (None, _) => app_name.clone(),
            (Some(kind), Some(path)) => {
                let name = entry_name(entry.name.as_deref(), path)?;
                match kind {
                    DmgContentType::Link => symlinks.push(Symlink {
                        name: escape_python_string(&name),
                        target: escape_path(path),
                    }),
                    DmgContentType::File | DmgContentType::Dir => files.push(NamedSource {
                        source: escape_path(path),
                        name: escape_python_string(&name),
                    }),
                }
                name
            }
            (Some(kind), None) => {
                return Err(Error::InvalidOption {
                    option: "contents",
                    reason: format!("entry of type {kind:?} requires a path"),
                });
            }
        };
        icon_locations.push(IconLocation {
            name: escape_python_string(&name),
            x: entry.x,
            y: entry.y,
        });
    }

    let background = match (&options.background, &options.background_color) {
        (Some(image), _) => Some(escape_path(image)),
        (None, Some(color)) => Some(escape_python_string(color)),
        (None, None) => None,
    };

    let data = ScriptData {
        volume_name: escape_python_string(volume_name),
        format: options.format.code(),
        files,
        symlinks,
        icon_locations,
        icon: options.icon.as_deref().map(escape_path),
        background,
        window_x: options.window.x,
        window_y: options.window.y,
        window_width: options.window.width.unwrap_or(DEFAULT_WINDOW_WIDTH),
        window_height: options.window.height.unwrap_or(DEFAULT_WINDOW_HEIGHT),
        icon_size: options.icon_size,
        text_size: options.icon_text_size,
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    let script = handlebars.render_template(DMGBUILD_SETTINGS_TEMPLATE, &data)?;

    let script_path = dir.join(SETTINGS_FILE_NAME);
    tokio::fs::write(&script_path, script)
        .await
        .fs_context("writing dmgbuild settings", &script_path)?;

    log::debug!("Wrote dmgbuild settings: {}", script_path.display());
    Ok(script_path)
}
