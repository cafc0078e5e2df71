//! Kodegen Bundler DMG - macOS disk image target.
//!
//! This binary turns a built .app bundle into a .dmg, signs it when an
//! identity is available, and prints the artifact paths.

use kodegen_bundler_dmg::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
