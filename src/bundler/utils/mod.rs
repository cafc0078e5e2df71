//! Shared helpers for the DMG target.

pub mod fs;
