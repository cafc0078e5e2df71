//! Command line argument parsing and validation.

use crate::bundler::{Arch, CompressionLevel, builder::tool_detection::DMGBUILD_PATH_ENV};
use clap::Parser;
use std::path::PathBuf;

/// macOS disk image target for Rust applications
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_dmg",
    version,
    about = "Creates macOS disk images (.dmg) from built .app bundles",
    long_about = "Creates a drag-to-install macOS disk image (.dmg) from an already-built .app bundle using dmgbuild, optionally code-signs it, and reports size and SHA-512 update info.

Configuration is read from [package.metadata.bundle] in Cargo.toml.

Usage:
  kodegen_bundler_dmg --app target/release/bundle/osx/Widget.app
  kodegen_bundler_dmg --app Widget.app --arch x64 --arch arm64 --output-dir dist
  kodegen_bundler_dmg --app Widget.app --compression maximum --json

Exit code 0 = every requested artifact exists in the output directory."
)]
pub struct Args {
    /// Application bundle to package
    #[arg(short = 'a', long, value_name = "APP")]
    pub app: PathBuf,

    /// Cargo.toml to read package metadata and [package.metadata.bundle] from
    #[arg(short = 'm', long, value_name = "PATH", default_value = "Cargo.toml")]
    pub manifest: PathBuf,

    /// Architecture to build for: x64, arm64, universal (repeatable)
    ///
    /// Defaults to the host architecture.
    #[arg(long = "arch", value_name = "ARCH")]
    pub archs: Vec<Arch>,

    /// Directory the disk images are written to
    #[arg(short = 'o', long, value_name = "DIR", default_value = "target/dmg")]
    pub output_dir: PathBuf,

    /// Vendored resource directory (dmgbuild working directory, default background)
    ///
    /// Defaults to vendor/dmg next to the manifest.
    #[arg(long, value_name = "DIR")]
    pub vendor_dir: Option<PathBuf>,

    /// Packager compression level: store, normal, maximum
    #[arg(long, value_name = "LEVEL", default_value_t = CompressionLevel::Normal)]
    pub compression: CompressionLevel,

    /// dmgbuild executable
    #[arg(long, value_name = "PATH", env = DMGBUILD_PATH_ENV)]
    pub dmgbuild: Option<PathBuf>,

    /// Print completion events as JSON lines instead of artifact paths
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.app.is_dir() {
            return Err(format!(
                "Application bundle not found: {}",
                self.app.display()
            ));
        }

        if !self.manifest.is_file() {
            return Err(format!("Manifest not found: {}", self.manifest.display()));
        }

        Ok(())
    }

    /// Architectures to build, in order.
    pub fn archs(&self) -> Vec<Arch> {
        if self.archs.is_empty() {
            vec![Arch::host()]
        } else {
            self.archs.clone()
        }
    }
}
