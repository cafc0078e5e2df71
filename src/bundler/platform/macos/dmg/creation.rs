//! Disk image creation using dmgbuild.
//!
//! Runs the external builder with the rendered settings script. The builder
//! runs from the vendored resource directory, when there is one, under a fixed
//! UTF-8 C locale so volume names encode the same way on every host.

use crate::bundler::{
    Result, Settings,
    builder::{CommandSpec, ProcessRunner, tool_detection::resolve_dmgbuild},
};
use std::path::{Path, PathBuf};

/// Locale forced on the builder process.
pub const BUILD_LOCALE: &str = "C.UTF-8";

/// Builds the `dmgbuild` invocation.
///
/// `<dmgbuild> -s <settings> -D app=<app> <volume name> <artifact>`
pub fn dmgbuild_command(
    program: PathBuf,
    settings_script: &Path,
    app_path: &Path,
    volume_name: &str,
    artifact_path: &Path,
    vendor_dir: Option<&Path>,
) -> Result<CommandSpec> {
    let Some(app) = app_path.to_str() else {
        crate::bail!(
            "Invalid app bundle path (contains non-UTF8 characters): {}",
            app_path.display()
        );
    };

    let command = CommandSpec::new(program)
        .arg("-s")
        .path_arg(settings_script)?
        .arg("-D")
        .arg(format!("app={app}"))
        .arg(volume_name)
        .path_arg(artifact_path)?
        .env("LC_ALL", BUILD_LOCALE)
        .env("LANG", BUILD_LOCALE);

    Ok(match vendor_dir {
        Some(dir) => command.current_dir(dir),
        None => command,
    })
}

/// Create the DMG at `artifact_path` from `app_path`.
///
/// # Errors
/// - [`ToolNotFound`](crate::bundler::Error::ToolNotFound) if dmgbuild cannot be located
/// - [`CommandFailed`](crate::bundler::Error::CommandFailed) if it cannot be spawned
/// - [`ToolFailed`](crate::bundler::Error::ToolFailed) if it exits non-zero
pub async fn create_dmg<R: ProcessRunner>(
    runner: &R,
    settings: &Settings,
    settings_script: &Path,
    app_path: &Path,
    volume_name: &str,
    artifact_path: &Path,
) -> Result<()> {
    let program = resolve_dmgbuild(settings)?;
    let vendor_dir = Some(settings.vendor_dir()).filter(|dir| dir.is_dir());
    if vendor_dir.is_none() {
        log::debug!(
            "Vendor directory {} not found, running dmgbuild from the current directory",
            settings.vendor_dir().display()
        );
    }
    let command = dmgbuild_command(
        program,
        settings_script,
        app_path,
        volume_name,
        artifact_path,
        vendor_dir,
    )?;

    log::info!("Creating DMG \"{}\"...", volume_name);
    runner.run(&command).await?.check(&command)?;
    log::info!("✓ Created DMG: {}", artifact_path.display());

    Ok(())
}
