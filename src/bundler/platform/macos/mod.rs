//! macOS targets.

pub mod dmg;
pub mod sign;
