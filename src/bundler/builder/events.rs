//! Artifact lifecycle notifications.
//!
//! The DMG target reports to the owning pipeline when an artifact build starts
//! and when it completes. The pipeline supplies an [`ArtifactEventSink`].

use super::update_info::UpdateInfo;
use crate::bundler::{Arch, Settings};
use std::path::PathBuf;

/// Target name reported in artifact events.
pub const DMG_TARGET_NAME: &str = "DMG";

/// Emitted before the disk image builder runs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactBuildStarted {
    /// Target producing the artifact
    pub target_name: String,
    /// Where the artifact will be written
    pub file_path: PathBuf,
    /// Architecture being built
    pub arch: Arch,
}

/// Emitted once the artifact is built, signed and described.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCreated {
    /// Path of the finished artifact
    pub file_path: PathBuf,
    /// Name safe for use as a metadata key or URL segment
    pub safe_name: String,
    /// Target that produced the artifact
    pub target: String,
    /// Architecture built
    pub arch: Arch,
    /// Whether the image was code-signed
    pub signed: bool,
    /// Whether update info was requested
    pub is_write_update_info: bool,
    /// Update info, present when requested
    pub update_info: Option<UpdateInfo>,
}

/// Receiver of artifact lifecycle events.
///
/// Both callbacks receive the packager [`Settings`] the artifact was built with.
pub trait ArtifactEventSink: Send + Sync {
    /// Called before the disk image builder runs.
    fn artifact_build_started(&self, settings: &Settings, event: &ArtifactBuildStarted);

    /// Called after the artifact is finished.
    fn artifact_build_completed(&self, settings: &Settings, event: &ArtifactCreated);
}

/// Sink that reports events through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogEventSink;

impl ArtifactEventSink for LogEventSink {
    fn artifact_build_started(&self, settings: &Settings, event: &ArtifactBuildStarted) {
        log::info!(
            "Building {} for {} ({}): {}",
            event.target_name,
            settings.product_name(),
            event.arch,
            event.file_path.display()
        );
    }

    fn artifact_build_completed(&self, _settings: &Settings, event: &ArtifactCreated) {
        log::info!(
            "✓ Created {} ({}{}): {}",
            event.target,
            event.arch,
            if event.signed { ", signed" } else { "" },
            event.file_path.display()
        );
        if let Some(info) = &event.update_info {
            log::debug!(
                "Update info for {}: {} bytes, sha512 {}",
                event.safe_name,
                info.size,
                info.sha512
            );
        }
    }
}
