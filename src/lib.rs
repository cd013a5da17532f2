//! Sparkle appcast tooling for macOS application bundles.
//!
//! This library provides the release pipeline behind the
//! `kodegen_bundler_appcast` binary:
//! - Bundle metadata from `Info.plist`
//! - Zip archives via `ditto`
//! - EdDSA signatures via Sparkle's `sign_update`
//! - `appcast.xml` rendering and read-back
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
