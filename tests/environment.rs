//! Environment variable fallbacks.
//!
//! Every test takes `ENV_LOCK` before touching the process environment, so
//! tests in this binary never observe each other's variables.

mod common;

use clap::Parser;
use common::{DEV_ID_HASH, FakeRunner, widget_settings};
use kodegen_bundler_dmg::bundler::{
    BundleSettings, CompressionLevel, DmgFormat, DmgSettings, PackageSettings, Settings,
    SettingsBuilder, SigningIdentity, platform::macos::dmg::resolve_options, platform::macos::sign::sign_dmg,
    settings::signing_allowed_by_environment,
};
use kodegen_bundler_dmg::cli::{Args, load_settings};
use std::ffi::OsString;
use std::path::Path;
use std::sync::LazyLock;
use tokio::sync::{Mutex, MutexGuard};

const COMPRESSION_LEVEL: &str = "KODEGEN_COMPRESSION_LEVEL";
const CSC_NAME: &str = "CSC_NAME";
const CSC_KEYCHAIN: &str = "CSC_KEYCHAIN";
const AUTO_DISCOVERY: &str = "CSC_IDENTITY_AUTO_DISCOVERY";

const ALL_VARS: &[&str] = &[COMPRESSION_LEVEL, CSC_NAME, CSC_KEYCHAIN, AUTO_DISCOVERY];

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Holds the environment lock; clears the variables under test on creation
/// and restores their previous values on drop.
struct EnvGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    async fn acquire() -> Self {
        let lock = ENV_LOCK.lock().await;
        let saved = ALL_VARS
            .iter()
            .map(|&key| (key, std::env::var_os(key)))
            .collect();
        for key in ALL_VARS {
            // SAFETY: every test mutating the environment holds ENV_LOCK.
            unsafe { std::env::remove_var(key) };
        }
        Self { saved, _lock: lock }
    }

    fn set(&self, key: &str, value: &str) {
        // SAFETY: the guard holds ENV_LOCK.
        unsafe { std::env::set_var(key, value) };
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            // SAFETY: the guard still holds ENV_LOCK.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

fn auto_identity_settings(dir: &Path, keychain: Option<&str>) -> Settings {
    let mut bundle = BundleSettings::default();
    bundle.macos.identity = SigningIdentity::Auto;
    bundle.macos.keychain = keychain.map(Into::into);
    widget_settings(dir, bundle, true)
}

const OTHER_HASH: &str = "89ABCDEF0123456789ABCDEF0123456789ABCDEF";

fn two_identities() -> FakeRunner {
    FakeRunner::with_identities(&[
        (OTHER_HASH, "Developer ID Application: Other Corp (OTHER12345)"),
        (DEV_ID_HASH, "Developer ID Application: ACME Corp (TEAM123456)"),
    ])
}

#[tokio::test]
async fn compression_override_forces_zlib_format() {
    let env = EnvGuard::acquire().await;
    let settings = SettingsBuilder::new()
        .project_dir("/work")
        .package_settings(PackageSettings {
            name: "widget".into(),
            product_name: "Widget".into(),
            version: "1.2.3".into(),
            ..Default::default()
        })
        .compression(CompressionLevel::Store)
        .signing_allowed(false)
        .build()
        .unwrap();

    let resolved = resolve_options(&DmgSettings::default(), &settings).unwrap();
    assert_eq!(resolved.format, DmgFormat::Udro);

    env.set(COMPRESSION_LEVEL, "9");
    let resolved = resolve_options(&DmgSettings::default(), &settings).unwrap();
    assert_eq!(resolved.format, DmgFormat::Udzo);

    let explicit = DmgSettings {
        format: Some(DmgFormat::Udbz),
        ..Default::default()
    };
    assert_eq!(resolve_options(&explicit, &settings).unwrap().format, DmgFormat::Udbz);
}

#[tokio::test]
async fn auto_identity_uses_csc_name() {
    let env = EnvGuard::acquire().await;
    env.set(CSC_NAME, "ACME Corp");
    let dir = tempfile::tempdir().unwrap();
    let settings = auto_identity_settings(dir.path(), None);
    let runner = two_identities();

    let signed = sign_dmg(&runner, &settings, Path::new("/out/Widget.dmg")).await.unwrap();

    assert!(signed);
    let calls = runner.calls();
    assert_eq!(calls.last().unwrap().command.args, vec!["--sign", DEV_ID_HASH, "/out/Widget.dmg"]);
}

#[tokio::test]
async fn auto_identity_without_qualifier_takes_first_developer_id() {
    let _env = EnvGuard::acquire().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = auto_identity_settings(dir.path(), None);
    let runner = two_identities();

    assert!(sign_dmg(&runner, &settings, Path::new("/out/Widget.dmg")).await.unwrap());
    assert_eq!(runner.programs(), vec!["security", "codesign"]);
    assert_eq!(runner.calls()[1].command.args[1], OTHER_HASH);
}

#[tokio::test]
async fn keychain_falls_back_to_csc_keychain() {
    let env = EnvGuard::acquire().await;
    env.set(CSC_KEYCHAIN, "build.keychain");
    let dir = tempfile::tempdir().unwrap();
    let settings = auto_identity_settings(dir.path(), None);
    let runner = two_identities();

    assert!(sign_dmg(&runner, &settings, Path::new("/out/Widget.dmg")).await.unwrap());
    let calls = runner.calls();
    assert_eq!(calls[0].command.args.last().unwrap(), "build.keychain");
    assert!(
        calls[1]
            .command
            .args
            .windows(2)
            .any(|w| w[0] == "--keychain" && w[1] == "build.keychain")
    );
}

#[tokio::test]
async fn configured_keychain_wins_over_csc_keychain() {
    let env = EnvGuard::acquire().await;
    env.set(CSC_KEYCHAIN, "env.keychain");
    let dir = tempfile::tempdir().unwrap();
    let settings = auto_identity_settings(dir.path(), Some("config.keychain"));
    let runner = two_identities();

    assert!(sign_dmg(&runner, &settings, Path::new("/out/Widget.dmg")).await.unwrap());
    assert_eq!(runner.calls()[0].command.args.last().unwrap(), "config.keychain");
}

#[tokio::test]
async fn auto_discovery_false_disables_signing() {
    let env = EnvGuard::acquire().await;
    assert_eq!(signing_allowed_by_environment(), cfg!(target_os = "macos"));

    env.set(AUTO_DISCOVERY, "false");
    assert!(!signing_allowed_by_environment());

    let settings = SettingsBuilder::new()
        .project_dir("/work")
        .package_settings(PackageSettings {
            name: "widget".into(),
            product_name: "Widget".into(),
            version: "1.2.3".into(),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert!(!settings.signing_allowed());

    let runner = two_identities();
    assert!(!sign_dmg(&runner, &settings, Path::new("/out/Widget.dmg")).await.unwrap());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn cli_settings_follow_auto_discovery() {
    let env = EnvGuard::acquire().await;
    env.set(AUTO_DISCOVERY, "false");

    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("Cargo.toml");
    std::fs::write(&manifest, "[package]\nname = \"widget\"\nversion = \"1.2.3\"\n").unwrap();

    let args = Args::try_parse_from([
        OsString::from("kodegen_bundler_dmg"),
        OsString::from("--app"),
        dir.path().join("Widget.app").into_os_string(),
        OsString::from("--manifest"),
        manifest.clone().into_os_string(),
    ])
    .unwrap();

    let settings = load_settings(&args).unwrap();
    assert!(!settings.signing_allowed());
    assert_eq!(settings.project_dir(), dir.path());
}
