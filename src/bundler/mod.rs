//! DMG target for packaging macOS applications.
//!
//! - [`settings`] - Configuration types and the [`SettingsBuilder`]
//! - [`builder`] - Process execution, tool lookup, events and update info
//! - [`platform`] - The DMG target and code signing
//! - [`utils`] - File system helpers
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_dmg::bundler::{
//!     Arch, DmgTarget, LogEventSink, PackageSettings, SettingsBuilder, TokioProcessRunner,
//! };
//! use std::path::Path;
//!
//! # async fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .project_dir(".")
//!     .package_settings(PackageSettings {
//!         name: "my-app".into(),
//!         version: "1.0.0".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let sink = LogEventSink;
//! let target = DmgTarget::new(&settings, TokioProcessRunner, &sink, "target/dmg")?;
//! let created = target.build(Path::new("target/My App.app"), Arch::Arm64).await?;
//! println!("{}", created.file_path.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{
    ArtifactBuildStarted, ArtifactCreated, ArtifactEventSink, CommandSpec, LogEventSink,
    ProcessOutput, ProcessRunner, TokioProcessRunner, UpdateInfo,
};
pub use error::{Error, Result};
pub use platform::macos::dmg::{DmgTarget, ResolvedDmgOptions};
pub use settings::{
    Arch, BundleSettings, CompressionLevel, DmgContent, DmgContentType, DmgFormat, DmgSettings,
    DmgWindow, MacOsSettings, PackageSettings, Settings, SettingsBuilder, SigningIdentity,
    arch_suffix,
};
