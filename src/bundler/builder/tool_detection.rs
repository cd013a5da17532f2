//! External tool detection.
//!
//! The Sparkle tools are taken from the configured tools directory when one is
//! set, otherwise from `PATH`. Resolution happens before any subprocess runs so
//! a missing tool is reported as missing configuration.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Sparkle's signing tool.
pub const SIGN_UPDATE: &str = "sign_update";

/// Sparkle's key generation tool.
pub const GENERATE_KEYS: &str = "generate_keys";

/// Locate a Sparkle tool by name.
///
/// # Errors
///
/// [`Error::MissingConfiguration`] if the tool is not an executable file in
/// `tools_dir`, or, with no tools directory, not found on `PATH`.
pub fn find_tool(name: &str, tools_dir: Option<&Path>) -> Result<PathBuf> {
    match tools_dir {
        Some(dir) => {
            let candidate = dir.join(name);
            if candidate.is_file() {
                log::debug!("Found {} at: {}", name, candidate.display());
                Ok(candidate)
            } else {
                Err(Error::MissingConfiguration(format!(
                    "{} not found in tools directory {}",
                    name,
                    dir.display()
                )))
            }
        }
        None => match which::which(name) {
            Ok(path) => {
                log::debug!("Found {} on PATH: {}", name, path.display());
                Ok(path)
            }
            Err(e) => Err(Error::MissingConfiguration(format!(
                "{name} not found on PATH ({e}); set a tools directory with \
                 --tools-dir or `config set-tools-dir`"
            ))),
        },
    }
}

/// Locate the archiver program.
///
/// Bare names are looked up on `PATH`; paths must exist.
pub fn find_archiver(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 {
        return if program.is_file() {
            Ok(program.to_path_buf())
        } else {
            Err(Error::MissingConfiguration(format!(
                "archiver {} does not exist",
                program.display()
            )))
        };
    }

    which::which(program).map_err(|e| {
        Error::MissingConfiguration(format!("archiver {} not found: {}", program.display(), e))
    })
}
