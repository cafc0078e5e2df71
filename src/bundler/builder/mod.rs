//! Shared build machinery for the DMG target.
//!
//! This module provides the pieces the DMG target is assembled from, none of
//! which are specific to disk images:
//!
//! - [`process`] - Command descriptors and the injectable [`ProcessRunner`]
//! - [`tool_detection`] - External tool resolution (`dmgbuild`, `codesign`)
//! - [`events`] - Artifact lifecycle notifications to the owning pipeline
//! - [`update_info`] - Size and SHA-512 metadata for finished artifacts

pub mod events;
pub mod process;
pub mod tool_detection;
pub mod update_info;

pub use events::{
    ArtifactBuildStarted, ArtifactCreated, ArtifactEventSink, DMG_TARGET_NAME, LogEventSink,
};
pub use process::{CommandSpec, ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use update_info::{UpdateInfo, compute_update_info};
