//! macOS platform-specific settings.

use super::Arch;
use std::fmt;
use std::path::PathBuf;

/// macOS signing and architecture configuration.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.macos]
/// identity = "Your Name (TEAMID)"
/// keychain = "build/signing.keychain-db"
/// default_arch = "arm64"
/// ```
///
/// # See Also
///
/// - [`DmgSettings`] - DMG disk image configuration
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct MacOsSettings {
    /// Code signing identity qualifier.
    ///
    /// Unset means auto-discovery (the `CSC_NAME` environment variable, or any
    /// matching identity). `false` disables signing outright.
    ///
    /// Example: "Your Name (TEAMID)", "Developer ID Application: Your Name (TEAMID)"
    #[serde(default)]
    pub identity: SigningIdentity,

    /// Keychain to search for the identity and to pass to `codesign`.
    ///
    /// Default: None (the user's default keychain search list)
    #[serde(default)]
    pub keychain: Option<PathBuf>,

    /// Architecture whose artifacts carry no arch suffix in volume names.
    ///
    /// Default: None (x64)
    #[serde(default, alias = "defaultArch")]
    pub default_arch: Option<Arch>,

    /// Overrides the app version shown in the default volume name.
    ///
    /// Default: None (the package version)
    #[serde(default, alias = "bundleShortVersion")]
    pub bundle_short_version: Option<String>,
}

/// Signing identity qualifier with an explicit "disabled" state.
///
/// `Auto` (field absent) and `Disabled` (`identity = false` or `null`) are
/// different: only `Disabled` suppresses signing regardless of environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SigningIdentity {
    /// Not configured; discover from the environment.
    #[default]
    Auto,
    /// Explicitly disabled.
    Disabled,
    /// Qualifier matched against installed identities. `-` requests an ad-hoc signature.
    Named(String),
}

impl<'de> serde::Deserialize<'de> for SigningIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Name(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Flag(false)) => SigningIdentity::Disabled,
            Some(Raw::Flag(true)) => SigningIdentity::Auto,
            Some(Raw::Name(name)) => SigningIdentity::Named(name),
        })
    }
}

/// Disk image format passed to `dmgbuild`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DmgFormat {
    /// Read/write image
    Udrw,
    /// Uncompressed read-only image
    Udro,
    /// zlib-compressed image
    Udzo,
    /// bzip2-compressed image
    Udbz,
}

impl DmgFormat {
    /// Format code as understood by `hdiutil`/`dmgbuild`.
    pub fn code(self) -> &'static str {
        match self {
            DmgFormat::Udrw => "UDRW",
            DmgFormat::Udro => "UDRO",
            DmgFormat::Udzo => "UDZO",
            DmgFormat::Udbz => "UDBZ",
        }
    }
}

impl fmt::Display for DmgFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kind of a folder-view entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DmgContentType {
    /// Symlink (e.g. to `/Applications`)
    Link,
    /// Extra file copied into the image
    File,
    /// Extra directory copied into the image
    Dir,
}

/// Position of one item in the DMG window.
///
/// An entry without `type` places the application bundle itself.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DmgContent {
    /// Horizontal icon position (center)
    pub x: i32,
    /// Vertical icon position (center)
    pub y: i32,
    /// Entry kind, `None` for the application bundle
    #[serde(default, rename = "type")]
    pub kind: Option<DmgContentType>,
    /// Link target or source file path
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Name shown in the window; defaults to the file name of `path`
    #[serde(default)]
    pub name: Option<String>,
}

impl DmgContent {
    /// Entry placing the application bundle.
    pub fn app(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            kind: None,
            path: None,
            name: None,
        }
    }

    /// Entry creating a symlink to `target`.
    pub fn link(x: i32, y: i32, target: impl Into<PathBuf>) -> Self {
        Self {
            x,
            y,
            kind: Some(DmgContentType::Link),
            path: Some(target.into()),
            name: None,
        }
    }
}

/// DMG window origin and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DmgWindow {
    /// Window X position on screen
    #[serde(default = "default_window_x")]
    pub x: i32,
    /// Window Y position on screen
    #[serde(default = "default_window_y")]
    pub y: i32,
    /// Window width; defaults to 540
    #[serde(default)]
    pub width: Option<u32>,
    /// Window height; defaults to 380
    #[serde(default)]
    pub height: Option<u32>,
}

fn default_window_x() -> i32 {
    400
}

fn default_window_y() -> i32 {
    100
}

impl Default for DmgWindow {
    fn default() -> Self {
        Self {
            x: default_window_x(),
            y: default_window_y(),
            width: None,
            height: None,
        }
    }
}

/// macOS DMG disk image configuration.
///
/// Every field is optional; unset fields are filled with computed defaults
/// when the DMG target resolves its options.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.dmg]
/// background = "assets/dmg-background.png"
/// title = "${productName} ${version}"
/// format = "UDBZ"
/// sign = true
///
/// [[package.metadata.bundle.dmg.contents]]
/// x = 130
/// y = 220
///
/// [[package.metadata.bundle.dmg.contents]]
/// x = 410
/// y = 220
/// type = "link"
/// path = "/Applications"
/// ```
///
/// # See Also
///
/// - [`MacOsSettings`] - signing identity and default architecture
#[derive(Clone, Debug, serde::Deserialize)]
pub struct DmgSettings {
    /// Volume icon (`.icns`). Defaults to the application icon.
    #[serde(default)]
    pub icon: Option<String>,

    /// Background image. Mutually exclusive with `background_color`.
    #[serde(default)]
    pub background: Option<PathBuf>,

    /// Background color (e.g. `#ffffff`). Mutually exclusive with `background`.
    #[serde(default, alias = "backgroundColor")]
    pub background_color: Option<String>,

    /// Image format. Defaults from the packager compression level.
    #[serde(default)]
    pub format: Option<DmgFormat>,

    /// Folder-view layout.
    #[serde(default)]
    pub contents: Option<Vec<DmgContent>>,

    /// Icon size in the window. Default: 80
    #[serde(default, alias = "iconSize")]
    pub icon_size: Option<u32>,

    /// Icon label text size. Default: 12
    #[serde(default, alias = "iconTextSize")]
    pub icon_text_size: Option<u32>,

    /// Window origin and size.
    #[serde(default)]
    pub window: Option<DmgWindow>,

    /// Code-sign the finished image. Default: false
    #[serde(default)]
    pub sign: bool,

    /// Compute update info for the finished image. Default: true
    #[serde(default = "default_write_update_info", alias = "writeUpdateInfo")]
    pub write_update_info: bool,

    /// Volume title template, e.g. `${productName} ${version}`.
    #[serde(default)]
    pub title: Option<String>,

    /// Artifact file name template, e.g. `${productName}-${version}-${arch}.${ext}`.
    #[serde(default, alias = "artifactName")]
    pub artifact_name: Option<String>,
}

fn default_write_update_info() -> bool {
    true
}

impl Default for DmgSettings {
    fn default() -> Self {
        Self {
            icon: None,
            background: None,
            background_color: None,
            format: None,
            contents: None,
            icon_size: None,
            icon_text_size: None,
            window: None,
            sign: false,
            write_update_info: default_write_update_info(),
            title: None,
            artifact_name: None,
        }
    }
}
