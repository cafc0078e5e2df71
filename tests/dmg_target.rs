mod common;

use common::{
    DEV_ID_HASH, Event, FAKE_DMGBUILD, FAKE_IMAGE, FakeRunner, RecordingSink, fake_app,
    widget_settings,
};
use kodegen_bundler_dmg::bundler::{
    Arch, BundleSettings, DmgTarget, Error, SigningIdentity, builder::compute_update_info,
};
use std::path::Path;

#[tokio::test]
async fn build_reports_started_then_completed_with_update_info() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let settings = widget_settings(dir.path(), BundleSettings::default(), false);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let created = target.build(&app, Arch::X64).await.unwrap();

    let expected_path = dir.path().join("dist/Widget-1.2.3-x64.dmg");
    assert_eq!(created.file_path, expected_path);
    assert_eq!(created.safe_name, "widget-1.2.3-x64.dmg");
    assert_eq!(created.target, "DMG");
    assert!(!created.signed);
    assert!(created.is_write_update_info);

    let info = created.update_info.clone().unwrap();
    assert_eq!(info.size, FAKE_IMAGE.len() as u64);
    assert_eq!(info, compute_update_info(&expected_path).await.unwrap());

    let events = sink.events();
    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (Event::Started(started), Event::Completed(completed)) => {
            assert_eq!(started.target_name, "DMG");
            assert_eq!(started.file_path, expected_path);
            assert_eq!(started.arch, Arch::X64);
            assert_eq!(completed, &created);
        }
        other => panic!("unexpected event order: {other:?}"),
    }
}

#[tokio::test]
async fn dmgbuild_runs_in_vendor_dir_with_utf8_locale() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let settings = widget_settings(dir.path(), BundleSettings::default(), false);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, dir.path().join("out")).unwrap();
    target.build(&app, Arch::Arm64).await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let command = &calls[0].command;
    assert_eq!(command.program, Path::new(FAKE_DMGBUILD));
    assert_eq!(command.args[0], "-s");
    assert!(command.args[1].ends_with("settings.py"));
    assert_eq!(command.args[2], "-D");
    assert_eq!(command.args[3], format!("app={}", app.display()));
    assert_eq!(command.args[4], "Widget 1.2.3-arm64");
    assert_eq!(
        command.args[5],
        dir.path().join("out/Widget-1.2.3-arm64.dmg").to_str().unwrap()
    );
    assert_eq!(command.current_dir.as_deref(), Some(dir.path().join("vendor/dmg").as_path()));
    assert!(command.env.contains(&("LC_ALL".into(), "C.UTF-8".into())));
    assert!(command.env.contains(&("LANG".into(), "C.UTF-8".into())));

    let script = calls[0].script.as_deref().expect("script exists while dmgbuild runs");
    assert!(script.contains(r#"format = "UDZO""#));
    assert!(script.contains(r#""Applications": "/Applications","#));
    assert!(script.contains(r#""Widget.app": (130, 220),"#));
    assert!(script.contains("background = None"));

    // The settings directory is temporary.
    assert!(!Path::new(&command.args[1]).exists());
}

#[tokio::test]
async fn update_info_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let mut bundle = BundleSettings::default();
    bundle.dmg.write_update_info = false;
    let settings = widget_settings(dir.path(), bundle, false);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let created = target.build(&app, Arch::X64).await.unwrap();

    assert!(!created.is_write_update_info);
    assert_eq!(created.update_info, None);
}

#[tokio::test]
async fn custom_title_and_artifact_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let mut bundle = BundleSettings::default();
    bundle.dmg.title = Some("${productName} v${version} (${arch})".into());
    bundle.dmg.artifact_name = Some("${name}-${version}-${arch}.${ext}".into());
    let settings = widget_settings(dir.path(), bundle, false);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let created = target.build(&app, Arch::Arm64).await.unwrap();

    assert_eq!(created.file_path, dir.path().join("dist/widget-1.2.3-arm64.dmg"));
    assert_eq!(runner.calls()[0].command.args[4], "Widget v1.2.3 (arm64)");
}

#[tokio::test]
async fn signs_with_discovered_identity() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let mut bundle = BundleSettings::default();
    bundle.dmg.sign = true;
    bundle.macos.identity = SigningIdentity::Named("ACME Corp".into());
    let settings = widget_settings(dir.path(), bundle, true);
    let runner =
        FakeRunner::with_identity(DEV_ID_HASH, "Developer ID Application: ACME Corp (TEAM123456)");
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let created = target.build(&app, Arch::X64).await.unwrap();

    assert!(created.signed);
    assert_eq!(runner.programs(), vec!["dmgbuild", "security", "codesign"]);
    let codesign = &runner.calls()[2].command;
    assert_eq!(
        codesign.args,
        vec![
            "--sign".to_string(),
            DEV_ID_HASH.to_string(),
            created.file_path.to_str().unwrap().to_string(),
        ]
    );
}

#[tokio::test]
async fn missing_identity_leaves_image_unsigned() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let mut bundle = BundleSettings::default();
    bundle.dmg.sign = true;
    bundle.macos.identity = SigningIdentity::Named("Nobody".into());
    let settings = widget_settings(dir.path(), bundle, true);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let created = target.build(&app, Arch::X64).await.unwrap();

    assert!(!created.signed);
    assert_eq!(runner.programs(), vec!["dmgbuild", "security", "security"]);
    assert!(matches!(sink.events().last(), Some(Event::Completed(_))));
}

#[tokio::test]
async fn disabled_identity_spawns_no_signing_tools() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let mut bundle = BundleSettings::default();
    bundle.dmg.sign = true;
    bundle.macos.identity = SigningIdentity::Disabled;
    let settings = widget_settings(dir.path(), bundle, true);
    let runner =
        FakeRunner::with_identity(DEV_ID_HASH, "Developer ID Application: ACME Corp (TEAM123456)");
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let created = target.build(&app, Arch::X64).await.unwrap();

    assert!(!created.signed);
    assert_eq!(runner.programs(), vec!["dmgbuild"]);
}

#[tokio::test]
async fn dmgbuild_failure_propagates_without_completion() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let settings = widget_settings(dir.path(), BundleSettings::default(), false);
    let runner = FakeRunner::failing_dmgbuild(2);
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let stale = target.artifact_path(Arch::X64);
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, b"stale").unwrap();

    let err = target.build(&app, Arch::X64).await.unwrap_err();
    match err {
        Error::ToolFailed { command, code, stderr } => {
            assert_eq!(command, "dmgbuild");
            assert_eq!(code, Some(2));
            assert!(stderr.contains("Resource busy"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Started(_)));
    assert!(!stale.exists());
}

#[tokio::test]
async fn configuration_errors_fail_before_any_process() {
    let dir = tempfile::tempdir().unwrap();
    let mut bundle = BundleSettings::default();
    bundle.dmg.background = Some("assets/bg.png".into());
    bundle.dmg.background_color = Some("#ffffff".into());
    let settings = widget_settings(dir.path(), bundle, true);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let err = DmgTarget::new(&settings, &runner, &sink, "dist").err().unwrap();
    assert!(err.is_configuration_error());
    assert!(runner.calls().is_empty());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn builds_each_arch_with_the_same_options() {
    let dir = tempfile::tempdir().unwrap();
    let app = fake_app(dir.path());
    let settings = widget_settings(dir.path(), BundleSettings::default(), false);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let target = DmgTarget::new(&settings, &runner, &sink, "dist").unwrap();
    let x64 = target.build(&app, Arch::X64).await.unwrap();
    let arm64 = target.build(&app, Arch::Arm64).await.unwrap();

    assert_ne!(x64.file_path, arm64.file_path);
    assert!(x64.file_path.exists());
    assert!(arm64.file_path.exists());
    assert_eq!(sink.events().len(), 4);
}

#[tokio::test]
async fn unusable_artifact_name_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut bundle = BundleSettings::default();
    bundle.dmg.artifact_name = Some("???".into());
    let settings = widget_settings(dir.path(), bundle, false);
    let runner = FakeRunner::new();
    let sink = RecordingSink::default();

    let err = DmgTarget::new(&settings, &runner, &sink, "dist").err().unwrap();
    assert!(matches!(err, Error::InvalidOption { option: "artifact_name", .. }));
    assert!(runner.calls().is_empty());
    assert!(!dir.path().join("dist").exists());
}
