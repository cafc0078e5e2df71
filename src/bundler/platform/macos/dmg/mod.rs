//! macOS DMG disk image target.
//!
//! Turns an already-built `.app` bundle into a drag-to-install disk image with
//! `dmgbuild`, optionally code-signs it, and reports the finished artifact to
//! the owning pipeline.
//!
//! # Architecture
//!
//! - `options` - Merges user configuration with computed defaults
//! - `naming` - Volume and artifact file names
//! - `settings_script` - Renders the `dmgbuild` settings script
//! - `creation` - Runs `dmgbuild`
//!
//! Signing lives in [`super::sign`].

pub mod creation;
pub mod naming;
pub mod options;
pub mod settings_script;
mod template;

use super::sign::sign_dmg;
use crate::bundler::{
    Arch, Result, Settings,
    builder::{
        ArtifactBuildStarted, ArtifactCreated, ArtifactEventSink, DMG_TARGET_NAME, ProcessRunner,
        compute_update_info,
    },
    error::ErrorExt,
    utils::fs,
};
use std::path::{Path, PathBuf};

pub use creation::{create_dmg, dmgbuild_command};
pub use naming::{
    DEFAULT_ARTIFACT_PATTERN, DMG_EXTENSION, compute_volume_name, expand_artifact_name,
    safe_artifact_name,
};
pub use options::{ResolvedDmgOptions, resolve_options, select_format};
pub use settings_script::render_settings_script;

/// The DMG target.
///
/// Options are resolved once, when the target is created; every build uses
/// the same resolved options.
pub struct DmgTarget<'a, R: ProcessRunner> {
    settings: &'a Settings,
    options: ResolvedDmgOptions,
    runner: R,
    events: &'a dyn ArtifactEventSink,
    output_dir: PathBuf,
}

impl<'a, R: ProcessRunner> DmgTarget<'a, R> {
    /// Creates the target and resolves its options.
    ///
    /// A relative `output_dir` is resolved against the project directory.
    ///
    /// # Errors
    ///
    /// Any configuration error from [`resolve_options`]. Nothing is spawned.
    pub fn new(
        settings: &'a Settings,
        runner: R,
        events: &'a dyn ArtifactEventSink,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let options = resolve_options(settings.dmg_settings(), settings)?;
        let output_dir = settings.resolve_path(&output_dir.into())?;
        Ok(Self {
            settings,
            options,
            runner,
            events,
            output_dir,
        })
    }

    /// Resolved options used by every build.
    pub fn options(&self) -> &ResolvedDmgOptions {
        &self.options
    }

    /// Directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target name reported in events.
    pub fn name(&self) -> &'static str {
        DMG_TARGET_NAME
    }

    /// Path the artifact for `arch` will be written to.
    pub fn artifact_path(&self, arch: Arch) -> PathBuf {
        let pattern = self
            .options
            .artifact_name
            .as_deref()
            .unwrap_or(DEFAULT_ARTIFACT_PATTERN);
        let file_name = fs::sanitize_file_name(&expand_artifact_name(
            pattern,
            self.settings,
            arch,
            DMG_EXTENSION,
        ));
        self.output_dir.join(file_name)
    }

    /// Builds the disk image for `app_path` and `arch`.
    ///
    /// # Process
    /// 1. Prepare the output directory and remove a stale artifact
    /// 2. Report the build start
    /// 3. Render the `dmgbuild` settings script into a temporary directory
    /// 4. Run `dmgbuild`
    /// 5. Sign the image if `dmg.sign` is set
    /// 6. Compute update info unless disabled
    /// 7. Report the finished artifact
    ///
    /// The completion event is only sent when every step succeeded.
    pub async fn build(&self, app_path: &Path, arch: Arch) -> Result<ArtifactCreated> {
        let settings = self.settings;
        let app_path = settings.resolve_path(app_path)?;
        let app_path = app_path.as_path();
        let artifact_path = self.artifact_path(arch);

        fs::create_dir_all(&self.output_dir, false).await?;
        fs::remove_file_if_exists(&artifact_path).await?;

        self.events.artifact_build_started(
            settings,
            &ArtifactBuildStarted {
                target_name: DMG_TARGET_NAME.to_string(),
                file_path: artifact_path.clone(),
                arch,
            },
        );

        let volume_name = fs::sanitize_file_name(&compute_volume_name(
            settings,
            arch,
            self.options.title.as_deref(),
        ));

        let script_dir = tempfile::tempdir().fs_context(
            "creating temporary directory for dmgbuild settings",
            std::env::temp_dir(),
        )?;
        let script = render_settings_script(&self.options, &volume_name, app_path, script_dir.path())
            .await?;

        create_dmg(
            &self.runner,
            settings,
            &script,
            app_path,
            &volume_name,
            &artifact_path,
        )
        .await?;

        let signed = if self.options.sign {
            sign_dmg(&self.runner, settings, &artifact_path).await?
        } else {
            false
        };

        let update_info = if self.options.write_update_info {
            Some(compute_update_info(&artifact_path).await?)
        } else {
            None
        };

        let created = ArtifactCreated {
            file_path: artifact_path,
            safe_name: safe_artifact_name(settings, arch, DMG_EXTENSION),
            target: DMG_TARGET_NAME.to_string(),
            arch,
            signed,
            is_write_update_info: self.options.write_update_info,
            update_info,
        };

        self.events.artifact_build_completed(settings, &created);
        Ok(created)
    }
}
