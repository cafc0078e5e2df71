//! Command line interface for the DMG target.
//!
//! Reads the manifest, builds one disk image per requested architecture and
//! prints where each one landed.

mod args;

pub use args::Args;

use crate::bundler::{
    ArtifactCreated, DmgTarget, LogEventSink, Settings, SettingsBuilder, TokioProcessRunner,
};
use crate::error::{BundlerError, CliError, Result};
use crate::metadata::load_manifest;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let created = execute(&args).await?;

    for artifact in &created {
        if args.json {
            println!("{}", serde_json::to_string(artifact)?);
        } else {
            println!("{}", artifact.file_path.display());
        }
    }

    Ok(0)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}

/// Builds settings from the manifest and the command line.
pub fn load_settings(args: &Args) -> Result<Settings> {
    let manifest_path = absolute(&args.manifest)?;
    let manifest = load_manifest(&manifest_path)?;

    let mut builder = SettingsBuilder::new()
        .project_dir(&manifest.manifest_dir)
        .package_settings(manifest.package_settings())
        .bundle_settings(manifest.bundle_settings)
        .compression(args.compression);

    if let Some(vendor_dir) = &args.vendor_dir {
        builder = builder.vendor_dir(absolute(vendor_dir)?);
    }
    if let Some(dmgbuild) = &args.dmgbuild {
        builder = builder.dmgbuild_path(absolute(dmgbuild)?);
    }

    Ok(builder.build()?)
}

/// Builds every requested architecture in order, stopping at the first failure.
pub async fn execute(args: &Args) -> Result<Vec<ArtifactCreated>> {
    args.validate()
        .map_err(|reason| BundlerError::Cli(CliError::InvalidArguments { reason }))?;

    let settings = load_settings(args)?;
    let app_path = absolute(&args.app)?;
    let output_dir = absolute(&args.output_dir)?;

    let sink = LogEventSink;
    let target = DmgTarget::new(&settings, TokioProcessRunner, &sink, output_dir)?;

    let mut created = Vec::new();
    for arch in args.archs() {
        created.push(target.build(&app_path, arch).await?);
    }

    Ok(created)
}
