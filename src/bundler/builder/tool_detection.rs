//! External tool detection.
//!
//! Resolves the executables the DMG target runs, honoring explicit
//! configuration and environment overrides before searching `PATH`.

use crate::bundler::{Error, Result, Settings};
use std::path::PathBuf;

/// Environment variable pointing at a custom `dmgbuild` executable.
pub const DMGBUILD_PATH_ENV: &str = "CUSTOM_DMGBUILD_PATH";

/// Name of the disk image builder on `PATH`.
pub const DMGBUILD: &str = "dmgbuild";

/// Identity lookup tool.
pub const SECURITY: &str = "security";

/// Code signing tool.
pub const CODESIGN: &str = "codesign";

/// Locates the `dmgbuild` executable.
///
/// Resolution order:
/// 1. [`Settings::dmgbuild_path`]
/// 2. `CUSTOM_DMGBUILD_PATH`
/// 3. `dmgbuild` on `PATH`
pub fn resolve_dmgbuild(settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = settings.dmgbuild_path() {
        log::debug!("Using configured dmgbuild: {}", path.display());
        return Ok(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(DMGBUILD_PATH_ENV).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        log::debug!(
            "Using dmgbuild from {}: {}",
            DMGBUILD_PATH_ENV,
            path.display()
        );
        return Ok(path);
    }

    match which::which(DMGBUILD) {
        Ok(path) => {
            log::debug!("Found dmgbuild at: {}", path.display());
            Ok(path)
        }
        Err(e) => Err(Error::ToolNotFound {
            tool: DMGBUILD.to_string(),
            reason: format!(
                "{e}. Install it with `pip install dmgbuild` or set {DMGBUILD_PATH_ENV}"
            ),
        }),
    }
}
