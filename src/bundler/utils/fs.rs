//! File system utilities for bundling.
//!
//! Provides idempotent directory and file operations with path-aware errors,
//! and the file name sanitizer used for volume and artifact names.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Longest file name, in bytes, accepted by HFS+/APFS.
const MAX_FILE_NAME_BYTES: usize = 255;

/// Characters that are invalid in file names on at least one supported platform.
const ILLEGAL_CHARS: &[char] = &['/', '\\', '?', '<', '>', ':', '*', '|', '"'];

/// Makes `name` safe for use as a file or volume name.
///
/// Removes path separators, reserved characters and control characters,
/// drops trailing dots and spaces, rejects the relative names `.` and `..`,
/// and truncates to 255 bytes on a character boundary.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_dmg::bundler::utils::fs::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("My: App/1.0?"), "My App1.0");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect();

    let trimmed = cleaned.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        return String::new();
    }

    let mut end = trimmed.len().min(MAX_FILE_NAME_BYTES);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        // Try removal, ignore NotFound (idempotent)
        match fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).fs_context("removing directory", path),
        }
    }

    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes a file if it exists.
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing file", path),
    }
}
