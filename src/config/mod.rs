//! Persisted user preferences.
//!
//! Two optional paths survive between runs: the directory holding Sparkle's
//! tools and the EdDSA private key file. With no key file the keychain is used.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::bundler::{KeySource, SettingsBuilder};

/// Preferences file name inside the `kodegen` config directory.
const PREFERENCES_FILE: &str = "appcast.json";

/// Stored preferences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Directory containing `sign_update` and `generate_keys`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_dir: Option<PathBuf>,

    /// EdDSA private key file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<PathBuf>,
}

impl Preferences {
    /// Default location: `<config dir>/kodegen/appcast.json`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("could not determine the user config directory")?;
        Ok(base.join("kodegen").join(PREFERENCES_FILE))
    }

    /// Load preferences from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No preferences at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };

        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save preferences to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Key source implied by these preferences.
    pub fn key_source(&self) -> KeySource {
        match &self.private_key {
            Some(path) => KeySource::File(path.clone()),
            None => KeySource::Keychain,
        }
    }

    /// Seed a settings builder with these preferences.
    pub fn apply(&self, builder: SettingsBuilder) -> SettingsBuilder {
        let builder = builder.key_source(self.key_source());
        match &self.tools_dir {
            Some(dir) => builder.tools_dir(dir),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&tmp.path().join("none.json")).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.key_source(), KeySource::Keychain);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/appcast.json");
        let prefs = Preferences {
            tools_dir: Some("/opt/sparkle/bin".into()),
            private_key: Some("/secure/ed_key".into()),
        };

        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap(), prefs);
    }

    #[test]
    fn unknown_and_absent_fields_are_tolerated() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("appcast.json");
        std::fs::write(&path, r#"{"tools_dir": "/bin/sparkle", "theme": "dark"}"#).unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.tools_dir.as_deref(), Some(Path::new("/bin/sparkle")));
        assert!(prefs.private_key.is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("appcast.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Preferences::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("appcast.json"));
    }

    #[test]
    fn applies_to_settings() {
        let prefs = Preferences {
            tools_dir: Some("/t".into()),
            private_key: Some("/k".into()),
        };
        let settings = prefs.apply(SettingsBuilder::new()).build();
        assert_eq!(settings.tools_dir(), Some(Path::new("/t")));
        assert_eq!(settings.key_source(), &KeySource::File("/k".into()));
    }
}
