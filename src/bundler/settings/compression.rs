//! Packager-wide compression level.

use std::fmt;
use std::str::FromStr;

/// Global compression setting of the packager.
///
/// The DMG target maps this to a disk image format when no explicit
/// `dmg.format` is configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression, fastest build
    Store,
    /// Balanced default
    #[default]
    Normal,
    /// Smallest artifact, slowest build
    Maximum,
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompressionLevel::Store => "store",
            CompressionLevel::Normal => "normal",
            CompressionLevel::Maximum => "maximum",
        })
    }
}

impl FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store" => Ok(CompressionLevel::Store),
            "normal" => Ok(CompressionLevel::Normal),
            "maximum" => Ok(CompressionLevel::Maximum),
            other => Err(format!(
                "invalid compression level: {other} (expected store, normal or maximum)"
            )),
        }
    }
}
