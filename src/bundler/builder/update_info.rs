//! Update metadata for finished artifacts.
//!
//! Auto-updaters verify a downloaded disk image against its size and SHA-512
//! digest. The digest is reported base64-encoded, the form update feeds use.

use crate::bundler::{Result, error::ErrorExt};
use base64::Engine;
use sha2::{Digest, Sha512};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Size and digest of an artifact, reported with the completion event.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    /// Artifact size in bytes
    pub size: u64,
    /// Base64-encoded SHA-512 digest
    pub sha512: String,
}

/// Computes [`UpdateInfo`] for a file.
///
/// Reads the file in 8KB chunks to handle large images efficiently.
///
/// # Arguments
///
/// * `file_path` - Path to the finished artifact
///
/// # Returns
///
/// * `Ok(UpdateInfo)` - Size and base64 SHA-512 of the file
/// * `Err` - If the file cannot be read
pub async fn compute_update_info(file_path: &Path) -> Result<UpdateInfo> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening artifact for hashing", file_path)?;
    let mut hasher = Sha512::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading artifact for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        size += n as u64;
        hasher.update(&buffer[..n]);
    }

    Ok(UpdateInfo {
        size,
        sha512: base64::engine::general_purpose::STANDARD.encode(hasher.finalize()),
    })
}
