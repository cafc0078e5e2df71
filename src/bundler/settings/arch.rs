//! CPU architecture types and utilities.

use std::fmt;
use std::str::FromStr;

/// CPU architecture of the application being packaged.
///
/// macOS disk images are built once per architecture. The name of each variant
/// follows the convention used in artifact names (`x64`, `arm64`, `universal`).
///
/// # Examples
///
/// ```
/// use kodegen_bundler_dmg::bundler::Arch;
///
/// let arch: Arch = "aarch64".parse().unwrap();
/// assert_eq!(arch, Arch::Arm64);
/// assert_eq!(arch.to_string(), "arm64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
pub enum Arch {
    /// x86_64 / Intel Macs
    #[serde(rename = "x64", alias = "x86_64")]
    X64,
    /// AArch64 / Apple Silicon
    #[serde(rename = "arm64", alias = "aarch64")]
    Arm64,
    /// Universal binary containing both x64 and arm64 slices
    #[serde(rename = "universal")]
    Universal,
}

impl Arch {
    /// Architecture assumed to be the default when none is configured.
    pub const DEFAULT: Arch = Arch::X64;

    /// Name used in artifact names and volume titles.
    pub fn name(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
            Arch::Universal => "universal",
        }
    }

    /// Architecture of the running host.
    pub fn host() -> Arch {
        match std::env::consts::ARCH {
            "aarch64" => Arch::Arm64,
            _ => Arch::X64,
        }
    }

    /// Detects the architecture from a Rust target triple
    /// (e.g., "aarch64-apple-darwin" → `Arch::Arm64`).
    pub fn from_target_triple(target: &str) -> Option<Arch> {
        if target.starts_with("x86_64") {
            Some(Arch::X64)
        } else if target.starts_with("aarch64") || target.starts_with("arm64") {
            Some(Arch::Arm64)
        } else if target.starts_with("universal") {
            Some(Arch::Universal)
        } else {
            None
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Arch {
    type Err = crate::bundler::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => Ok(Arch::X64),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            "universal" => Ok(Arch::Universal),
            other => Arch::from_target_triple(other).ok_or_else(|| {
                crate::bundler::Error::ArchError(format!(
                    "unsupported macOS architecture: {other} (expected x64, arm64 or universal)"
                ))
            }),
        }
    }
}

/// Suffix appended to names when building for a non-default architecture.
///
/// Returns an empty string when `arch` equals the default architecture
/// (`default_arch`, or [`Arch::DEFAULT`] when unset), otherwise `-<arch>`.
pub fn arch_suffix(arch: Arch, default_arch: Option<Arch>) -> String {
    if arch == default_arch.unwrap_or(Arch::DEFAULT) {
        String::new()
    } else {
        format!("-{}", arch.name())
    }
}
