//! Core Settings struct and implementations.

use super::KeySource;
use std::path::{Path, PathBuf};

/// Default archiver program.
pub const DEFAULT_ARCHIVER: &str = "ditto";

/// Main settings for the appcast pipeline.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder) from persisted
/// preferences merged with command line overrides.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_appcast::bundler::{KeySource, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .tools_dir("/Applications/Sparkle/bin")
///     .key_source(KeySource::Keychain)
///     .build();
/// assert_eq!(settings.archiver().to_str(), Some("ditto"));
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory containing `sign_update` and `generate_keys`.
    ///
    /// None means look the tools up on `PATH`.
    tools_dir: Option<PathBuf>,

    /// Private key location.
    key_source: KeySource,

    /// Archiver program (`ditto` unless overridden).
    archiver: PathBuf,
}

impl Settings {
    /// Returns the configured tools directory.
    pub fn tools_dir(&self) -> Option<&Path> {
        self.tools_dir.as_deref()
    }

    /// Returns the private key location.
    pub fn key_source(&self) -> &KeySource {
        &self.key_source
    }

    /// Returns the archiver program.
    pub fn archiver(&self) -> &Path {
        &self.archiver
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(tools_dir: Option<PathBuf>, key_source: KeySource, archiver: PathBuf) -> Self {
        Self {
            tools_dir,
            key_source,
            archiver,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(None, KeySource::Keychain, PathBuf::from(DEFAULT_ARCHIVER))
    }
}
