use kodegen_bundler_dmg::bundler::SigningIdentity;
use kodegen_bundler_dmg::metadata::load_manifest;
use std::path::Path;

#[test]
fn fixture_manifest_configures_dmg() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Cargo.toml");
    let manifest = load_manifest(&path).unwrap();

    assert_eq!(manifest.metadata.name, "widget");
    assert_eq!(manifest.metadata.version, "1.2.3");
    assert_eq!(manifest.manifest_dir, path.parent().unwrap());

    let bundle = &manifest.bundle_settings;
    assert_eq!(bundle.product_name.as_deref(), Some("Widget"));
    assert_eq!(bundle.publisher.as_deref(), Some("Example Inc."));
    assert_eq!(bundle.macos.identity, SigningIdentity::Disabled);
    assert_eq!(bundle.dmg.title.as_deref(), Some("${productName} ${version}"));
    assert_eq!(bundle.dmg.icon_size, Some(96));
    let window = bundle.dmg.window.unwrap();
    assert_eq!((window.x, window.y), (400, 100));
    assert_eq!((window.width, window.height), (Some(600), Some(400)));
    assert!(bundle.dmg.write_update_info);
    assert_eq!(bundle.icon, None);

    assert_eq!(manifest.package_settings().product_name, "Widget");
}
