//! Shared helpers for integration tests.

#![allow(dead_code)]

use kodegen_bundler_dmg::bundler::{
    ArtifactBuildStarted, ArtifactCreated, ArtifactEventSink, BundleSettings, CommandSpec,
    PackageSettings, ProcessOutput, ProcessRunner, Result, Settings, SettingsBuilder,
};
use std::path::Path;
use std::sync::Mutex;

pub const FAKE_DMGBUILD: &str = "/opt/fake/bin/dmgbuild";

pub const DEV_ID_HASH: &str = "0123456789ABCDEF0123456789ABCDEF01234567";

/// Bytes the fake builder writes as the disk image.
pub const FAKE_IMAGE: &[u8] = b"fake disk image";

/// One recorded invocation.
#[derive(Clone, Debug)]
pub struct Call {
    pub command: CommandSpec,
    /// Settings script contents, captured while the builder ran
    pub script: Option<String>,
}

/// Process runner that imitates `dmgbuild`, `security` and `codesign`.
#[derive(Default)]
pub struct FakeRunner {
    pub dmgbuild_code: i32,
    pub identities: Vec<(String, String)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_dmgbuild(code: i32) -> Self {
        Self {
            dmgbuild_code: code,
            ..Self::default()
        }
    }

    pub fn with_identity(hash: &str, name: &str) -> Self {
        Self {
            identities: vec![(hash.to_string(), name.to_string())],
            ..Self::default()
        }
    }

    pub fn with_identities(identities: &[(&str, &str)]) -> Self {
        Self {
            identities: identities
                .iter()
                .map(|(hash, name)| (hash.to_string(), name.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.command.display_name())
            .collect()
    }

    fn identity_listing(&self) -> String {
        let mut out = String::new();
        for (i, (hash, name)) in self.identities.iter().enumerate() {
            out.push_str(&format!("  {}) {} \"{}\"\n", i + 1, hash, name));
        }
        out.push_str(&format!(
            "     {} valid identities found\n",
            self.identities.len()
        ));
        out
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        let program = command.display_name();
        let mut script = None;

        let output = match program.as_str() {
            "dmgbuild" => {
                script = std::fs::read_to_string(&command.args[1]).ok();
                if self.dmgbuild_code == 0 {
                    let artifact = command.args.last().unwrap();
                    std::fs::write(artifact, FAKE_IMAGE).unwrap();
                }
                ProcessOutput {
                    code: Some(self.dmgbuild_code),
                    stdout: String::new(),
                    stderr: if self.dmgbuild_code == 0 {
                        String::new()
                    } else {
                        "hdiutil: create failed - Resource busy".to_string()
                    },
                }
            }
            "security" => ProcessOutput {
                code: Some(0),
                stdout: self.identity_listing(),
                stderr: String::new(),
            },
            _ => ProcessOutput {
                code: Some(0),
                ..Default::default()
            },
        };

        self.calls.lock().unwrap().push(Call {
            command: command.clone(),
            script,
        });
        Ok(output)
    }
}

/// Event recorded by [`RecordingSink`].
#[derive(Clone, Debug)]
pub enum Event {
    Started(ArtifactBuildStarted),
    Completed(ArtifactCreated),
}

/// Event sink that records every callback in order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl ArtifactEventSink for RecordingSink {
    fn artifact_build_started(&self, _settings: &Settings, event: &ArtifactBuildStarted) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Started(event.clone()));
    }

    fn artifact_build_completed(&self, _settings: &Settings, event: &ArtifactCreated) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Completed(event.clone()));
    }
}

/// Settings for a "Widget" 1.2.3 project rooted at `project_dir`.
///
/// The vendor directory `vendor/dmg` is created so the builder runs inside it.
pub fn widget_settings(project_dir: &Path, bundle: BundleSettings, signing_allowed: bool) -> Settings {
    std::fs::create_dir_all(project_dir.join("vendor/dmg")).unwrap();
    SettingsBuilder::new()
        .project_dir(project_dir)
        .vendor_dir(project_dir.join("vendor/dmg"))
        .package_settings(PackageSettings {
            name: "widget".into(),
            product_name: "Widget".into(),
            version: "1.2.3".into(),
            ..Default::default()
        })
        .bundle_settings(bundle)
        .signing_allowed(signing_allowed)
        .dmgbuild_path(FAKE_DMGBUILD)
        .build()
        .unwrap()
}

/// Creates an empty `Widget.app` bundle under `dir`.
pub fn fake_app(dir: &Path) -> std::path::PathBuf {
    let app = dir.join("Widget.app");
    std::fs::create_dir_all(app.join("Contents/MacOS")).unwrap();
    app
}
