//! Builder for constructing Settings.

use super::{KeySource, Settings, core::DEFAULT_ARCHIVER};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Later calls override earlier ones, so persisted preferences can be applied
/// first and command line flags on top.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_appcast::bundler::{KeySource, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .tools_dir("/opt/sparkle/bin")
///     .key_source(KeySource::File("sparkle_private_key".into()))
///     .archiver("/usr/bin/ditto")
///     .build();
/// assert!(settings.key_source().key_file().is_some());
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    tools_dir: Option<PathBuf>,
    key_source: KeySource,
    archiver: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory holding `sign_update` and `generate_keys`.
    ///
    /// Default: None (tools are looked up on `PATH`)
    pub fn tools_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tools_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the private key location.
    ///
    /// Default: [`KeySource::Keychain`]
    pub fn key_source(mut self, source: KeySource) -> Self {
        self.key_source = source;
        self
    }

    /// Sets the archiver program.
    ///
    /// Default: `ditto`
    pub fn archiver<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.archiver = Some(program.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    pub fn build(self) -> Settings {
        Settings::new(
            self.tools_dir,
            self.key_source,
            self.archiver
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVER)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_keychain_and_ditto() {
        let settings = SettingsBuilder::new().build();
        assert_eq!(settings.key_source(), &KeySource::Keychain);
        assert_eq!(settings.archiver(), Path::new("ditto"));
        assert!(settings.tools_dir().is_none());
    }

    #[test]
    fn later_calls_override_earlier_ones() {
        let settings = SettingsBuilder::new()
            .key_source(KeySource::File("a".into()))
            .key_source(KeySource::File("b".into()))
            .tools_dir("/one")
            .tools_dir("/two")
            .build();
        assert_eq!(settings.key_source().key_file(), Some(Path::new("b")));
        assert_eq!(settings.tools_dir(), Some(Path::new("/two")));
    }
}
