//! Code signing for disk images.
//!
//! Finds a signing identity with `security find-identity` and signs the
//! finished image with `codesign`. Missing identities and disabled signing
//! are not errors: the image is left unsigned and the build continues.

use crate::bundler::{
    Result, Settings,
    builder::{
        CommandSpec, ProcessRunner,
        tool_detection::{CODESIGN, SECURITY},
    },
    settings::SigningIdentity,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Certificate type searched first.
pub const DEVELOPER_ID_APPLICATION: &str = "Developer ID Application";

/// Certificate type searched when no Developer ID identity matches.
pub const MAC_DEVELOPER: &str = "Mac Developer";

/// Environment variable supplying the qualifier when none is configured.
pub const IDENTITY_NAME_ENV: &str = "CSC_NAME";

/// Environment variable supplying the keychain when none is configured.
pub const KEYCHAIN_ENV: &str = "CSC_KEYCHAIN";

/// Qualifier requesting an ad-hoc signature.
pub const AD_HOC_IDENTITY: &str = "-";

const KNOWN_CERT_TYPES: &[&str] = &[
    DEVELOPER_ID_APPLICATION,
    MAC_DEVELOPER,
    "Apple Development",
    "Apple Distribution",
    "3rd Party Mac Developer Application",
    "Developer ID Installer",
];

static IDENTITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\d+\)\s+([0-9A-Fa-f]{40})\s+"(.+)"\s*$"#)
        .expect("identity pattern is valid")
});

/// A code signing identity resolved from the keychain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeSigningIdentity {
    /// Certificate type the identity was found under
    pub cert_type: String,
    /// Qualifier it was matched with
    pub qualifier: Option<String>,
    /// Full certificate common name
    pub name: String,
    /// SHA-1 hash passed to `codesign --sign`
    pub hash: String,
    /// Keychain the identity was found in
    pub keychain: Option<PathBuf>,
}

/// Parses `security find-identity` output into `(hash, name)` pairs.
pub fn parse_identities(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| IDENTITY_LINE.captures(line))
        .map(|caps| (caps[1].to_ascii_uppercase(), caps[2].to_string()))
        .collect()
}

/// Whether the identity `name`/`hash` is of `cert_type` and matches `qualifier`.
///
/// A qualifier may be the identity hash, the full common name including a
/// certificate type prefix, or the start of the name after the prefix.
/// `"ACME"` matches `"Developer ID Application: ACME Corp (TEAM123456)"`;
/// `"Corp"` does not.
pub fn identity_matches(name: &str, hash: &str, cert_type: &str, qualifier: Option<&str>) -> bool {
    let Some(rest) = name
        .strip_prefix(cert_type)
        .and_then(|r| r.strip_prefix(": "))
    else {
        return false;
    };

    let Some(qualifier) = qualifier.map(str::trim).filter(|q| !q.is_empty()) else {
        return true;
    };

    if qualifier.eq_ignore_ascii_case(hash) {
        return true;
    }

    match qualifier.split_once(": ") {
        Some((prefix, qualified_name)) if KNOWN_CERT_TYPES.contains(&prefix) => {
            prefix == cert_type && rest == qualified_name
        }
        _ => rest.starts_with(qualifier),
    }
}

/// Searches the keychain for an identity of `cert_type` matching `qualifier`.
///
/// A failing `security` invocation is reported as "no identity".
pub async fn find_identity<R: ProcessRunner>(
    runner: &R,
    cert_type: &str,
    qualifier: Option<&str>,
    keychain: Option<&Path>,
) -> Result<Option<CodeSigningIdentity>> {
    let mut command = CommandSpec::new(SECURITY)
        .arg("find-identity")
        .arg("-v")
        .arg("-p")
        .arg("codesigning");
    if let Some(keychain) = keychain {
        command = command.path_arg(keychain)?;
    }

    let output = runner.run(&command).await?;
    if !output.success() {
        log::warn!(
            "Could not list signing identities ({}): {}",
            output.code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            output.stderr.trim()
        );
        return Ok(None);
    }

    let found = parse_identities(&output.stdout)
        .into_iter()
        .find(|(hash, name)| identity_matches(name, hash, cert_type, qualifier))
        .map(|(hash, name)| CodeSigningIdentity {
            cert_type: cert_type.to_string(),
            qualifier: qualifier.map(str::to_string),
            name,
            hash,
            keychain: keychain.map(Path::to_path_buf),
        });

    Ok(found)
}

/// Qualifier to sign with. `None` means signing is disabled.
fn signing_qualifier(settings: &Settings) -> Option<Option<String>> {
    match &settings.macos_settings().identity {
        SigningIdentity::Disabled => None,
        SigningIdentity::Named(name) => Some(Some(name.clone())),
        SigningIdentity::Auto => Some(
            std::env::var(IDENTITY_NAME_ENV)
                .ok()
                .filter(|name| !name.trim().is_empty()),
        ),
    }
}

/// Keychain to search and sign with.
///
/// A bare name such as `build.keychain` is passed through for `security` to
/// look up in its keychain directories. Paths with a separator, and names
/// that exist relative to the project, resolve against the project root.
fn signing_keychain(settings: &Settings) -> Result<Option<PathBuf>> {
    let keychain = settings
        .macos_settings()
        .keychain
        .clone()
        .or_else(|| std::env::var_os(KEYCHAIN_ENV).filter(|k| !k.is_empty()).map(PathBuf::from));

    let Some(keychain) = keychain else {
        return Ok(None);
    };

    let is_bare_name = keychain.components().count() == 1 && !keychain.is_absolute();
    if is_bare_name && !settings.project_dir().join(&keychain).exists() {
        return Ok(Some(keychain));
    }

    settings.resolve_path(&keychain).map(Some)
}

/// Resolves the identity to sign with, trying Developer ID then Mac Developer.
async fn resolve_identity<R: ProcessRunner>(
    runner: &R,
    qualifier: Option<&str>,
    keychain: Option<&Path>,
) -> Result<Option<CodeSigningIdentity>> {
    if qualifier == Some(AD_HOC_IDENTITY) {
        return Ok(Some(CodeSigningIdentity {
            cert_type: "ad-hoc".to_string(),
            qualifier: qualifier.map(str::to_string),
            name: AD_HOC_IDENTITY.to_string(),
            hash: AD_HOC_IDENTITY.to_string(),
            keychain: keychain.map(Path::to_path_buf),
        }));
    }

    for cert_type in [DEVELOPER_ID_APPLICATION, MAC_DEVELOPER] {
        if let Some(identity) = find_identity(runner, cert_type, qualifier, keychain).await? {
            return Ok(Some(identity));
        }
        log::debug!(
            "No \"{}\" identity matching {:?}",
            cert_type,
            qualifier.unwrap_or("<any>")
        );
    }

    Ok(None)
}

/// Signs the disk image at `artifact_path`.
///
/// Returns `Ok(false)` without running `codesign` when signing is not allowed
/// in this environment, when the identity is explicitly disabled, or when no
/// matching identity exists.
///
/// # Errors
/// Propagates spawn failures and a non-zero `codesign` exit.
pub async fn sign_dmg<R: ProcessRunner>(
    runner: &R,
    settings: &Settings,
    artifact_path: &Path,
) -> Result<bool> {
    if !settings.signing_allowed() {
        log::info!("Code signing is not allowed in this environment, skipping DMG signing");
        return Ok(false);
    }

    let Some(qualifier) = signing_qualifier(settings) else {
        log::info!("macOS identity is explicitly disabled, skipping DMG signing");
        return Ok(false);
    };

    let keychain = signing_keychain(settings)?;
    let Some(identity) =
        resolve_identity(runner, qualifier.as_deref(), keychain.as_deref()).await?
    else {
        log::warn!(
            "No valid \"{}\" or \"{}\" identity found{}, DMG will not be signed",
            DEVELOPER_ID_APPLICATION,
            MAC_DEVELOPER,
            qualifier
                .as_deref()
                .map(|q| format!(" for {q:?}"))
                .unwrap_or_default()
        );
        return Ok(false);
    };

    let mut command = CommandSpec::new(CODESIGN)
        .arg("--sign")
        .arg(identity.hash.as_str());
    if let Some(keychain) = &identity.keychain {
        command = command.arg("--keychain").path_arg(keychain)?;
    }
    let command = command.path_arg(artifact_path)?;

    log::info!("Signing DMG with \"{}\"", identity.name);
    runner.run(&command).await?.check(&command)?;
    log::info!("✓ Signed DMG: {}", artifact_path.display());

    Ok(true)
}
