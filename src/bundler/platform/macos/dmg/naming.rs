//! Artifact and volume naming.
//!
//! Names are produced by expanding `${placeholder}` templates in a single pass:
//! substituted values are never re-scanned, and unknown placeholders are left
//! as written.

use crate::bundler::{Arch, Settings, arch_suffix, utils::fs::sanitize_file_name};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Artifact file name pattern used when `dmg.artifact_name` is unset.
pub const DEFAULT_ARTIFACT_PATTERN: &str = "${productName}-${shortVersion}-${arch}.${ext}";

/// Extension of disk image artifacts.
pub const DMG_EXTENSION: &str = "dmg";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z]+)\}").expect("placeholder pattern is valid")
});

fn expand(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Computes the volume name shown when the image is mounted.
///
/// Without a template the name is `"<productFilename> <shortVersion><archSuffix>"`.
/// With a template, `${arch}`, `${shortVersion}`, `${version}`, `${name}` and
/// `${productName}` are replaced everywhere they occur. `${arch}` expands to
/// the architecture name, or to nothing for the default architecture.
///
/// The result is not sanitized; callers pass it through
/// [`sanitize_file_name`] before handing it to `dmgbuild`.
pub fn compute_volume_name(settings: &Settings, arch: Arch, custom: Option<&str>) -> String {
    let suffix = arch_suffix(arch, settings.default_arch());
    let short_version = settings.short_version();

    let Some(template) = custom else {
        return format!(
            "{} {}{}",
            settings.package().product_filename(),
            short_version,
            suffix
        );
    };

    let package = settings.package();
    expand(template, |key| match key {
        "arch" => Some(suffix.trim_start_matches('-').to_string()),
        "shortVersion" => Some(short_version.to_string()),
        "version" => Some(package.version.clone()),
        "name" => Some(package.name.clone()),
        "productName" => Some(package.product_name.clone()),
        _ => None,
    })
}

/// Expands an artifact file name pattern.
///
/// Recognizes `${productName}`, `${name}`, `${version}`, `${shortVersion}`,
/// `${arch}`, `${os}` and `${ext}`. `${shortVersion}` falls back to the
/// version when no short version is configured.
pub fn expand_artifact_name(pattern: &str, settings: &Settings, arch: Arch, ext: &str) -> String {
    let package = settings.package();
    expand(pattern, |key| match key {
        "productName" => Some(package.product_name.clone()),
        "name" => Some(package.name.clone()),
        "version" => Some(package.version.clone()),
        "shortVersion" => Some(settings.short_version().to_string()),
        "arch" => Some(arch.name().to_string()),
        "os" => Some("mac".to_string()),
        "ext" => Some(ext.to_string()),
        _ => None,
    })
}

/// Artifact name used as a metadata key: `<name>-<version>-<arch>.<ext>`,
/// with spaces replaced by dashes.
pub fn safe_artifact_name(settings: &Settings, arch: Arch, ext: &str) -> String {
    let name = settings.package().name.replace(' ', "-");
    sanitize_file_name(&format!(
        "{}-{}-{}.{}",
        name,
        settings.version_string(),
        arch.name(),
        ext
    ))
}
