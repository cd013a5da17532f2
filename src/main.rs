//! Kodegen Bundler Appcast - Sparkle release tool for macOS bundles.
//!
//! This binary archives a `.app` bundle, signs it with Sparkle's EdDSA tools
//! and writes the appcast describing the release.

use std::process;

use kodegen_bundler_appcast::cli;

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
