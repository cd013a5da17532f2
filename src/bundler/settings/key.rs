//! EdDSA private key location.

use std::path::{Path, PathBuf};

/// Where `sign_update` should find the EdDSA private key.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_appcast::bundler::KeySource;
///
/// let from_disk = KeySource::File("keys/sparkle_private_key".into());
/// let ambient = KeySource::Keychain;
/// assert!(from_disk.key_file().is_some());
/// assert!(ambient.key_file().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum KeySource {
    /// Private key exported to a file, passed as `--ed-key-file`.
    File(PathBuf),

    /// Key stored in the login keychain by `generate_keys`.
    ///
    /// `sign_update` is invoked without a key argument and looks it up itself.
    #[default]
    Keychain,
}

impl KeySource {
    /// Returns the key file path, if the key lives on disk.
    pub fn key_file(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Keychain => None,
        }
    }
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "key file {}", path.display()),
            Self::Keychain => f.write_str("keychain"),
        }
    }
}
