//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! the merge of persisted preferences with command line overrides.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bundler::{KeySource, Settings, SettingsBuilder};
use crate::config::Preferences;

/// Sparkle appcast generator for macOS application bundles
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_appcast",
    version,
    about = "Archive, sign and publish Sparkle appcasts for macOS apps",
    long_about = "Zips a macOS .app bundle with ditto, signs the archive with Sparkle's sign_update \
and writes appcast.xml next to the bundle.

Usage:
  kodegen_bundler_appcast generate build/MyApp.app
  kodegen_bundler_appcast generate build/MyApp.app --url https://example.com/MyApp-v1.2.zip
  kodegen_bundler_appcast update-url build/MyApp.app --url https://cdn.example.com/MyApp-v1.2.zip
  kodegen_bundler_appcast config set-tools-dir /Applications/Sparkle/bin

Exit code 0 = appcast written."
)]
pub struct Args {
    /// Preferences file (defaults to <config dir>/kodegen/appcast.json)
    #[arg(long, global = true, value_name = "FILE", env = "KODEGEN_APPCAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Archive and sign a bundle, then write appcast.xml next to it
    Generate {
        /// Path to the .app bundle
        #[arg(value_name = "APP")]
        app: PathBuf,

        /// Download URL for the archive (placeholder when omitted)
        #[arg(short, long, value_name = "URL")]
        url: Option<String>,

        #[command(flatten)]
        tools: ToolArgs,
    },

    /// Replace the download URL in an existing appcast without re-signing
    UpdateUrl {
        /// Path to the .app bundle whose appcast.xml should be updated
        #[arg(value_name = "APP")]
        app: PathBuf,

        /// New download URL
        #[arg(short, long, value_name = "URL")]
        url: String,
    },

    /// Print the EdDSA public key stored in the keychain
    PublicKey {
        /// Directory containing generate_keys
        #[arg(long, value_name = "DIR", env = "KODEGEN_APPCAST_TOOLS_DIR")]
        tools_dir: Option<PathBuf>,
    },

    /// Show or change persisted preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides for tool and key locations.
#[derive(clap::Args, Debug)]
pub struct ToolArgs {
    /// Directory containing sign_update and generate_keys
    #[arg(long, value_name = "DIR", env = "KODEGEN_APPCAST_TOOLS_DIR")]
    pub tools_dir: Option<PathBuf>,

    /// EdDSA private key file (keychain is used when unset)
    #[arg(long, value_name = "FILE", env = "KODEGEN_APPCAST_PRIVATE_KEY")]
    pub private_key: Option<PathBuf>,

    /// Archiver program
    #[arg(long, value_name = "PROGRAM", default_value = crate::bundler::settings::DEFAULT_ARCHIVER)]
    pub archiver: PathBuf,
}

/// `config` actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the preferences file path and contents
    Show,
    /// Remember the Sparkle tools directory
    SetToolsDir {
        /// Directory containing sign_update and generate_keys
        dir: PathBuf,
    },
    /// Remember the private key file
    SetPrivateKey {
        /// EdDSA private key file
        file: PathBuf,
    },
    /// Forget the private key file and use the keychain
    ClearPrivateKey,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::UpdateUrl { url, .. } if url.trim().is_empty() => {
                Err("URL cannot be empty".to_string())
            }
            Command::Generate { url: Some(url), .. } if url.trim().is_empty() => {
                Err("URL cannot be empty; omit --url to use the placeholder".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Preferences file location.
    pub fn preferences_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Preferences::default_path(),
        }
    }
}

impl ToolArgs {
    /// Merge these overrides on top of persisted preferences.
    pub fn settings(&self, prefs: &Preferences) -> Settings {
        let mut builder = prefs.apply(SettingsBuilder::new()).archiver(&self.archiver);
        if let Some(dir) = &self.tools_dir {
            builder = builder.tools_dir(dir);
        }
        if let Some(key) = &self.private_key {
            builder = builder.key_source(KeySource::File(key.clone()));
        }
        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,

    /// Resolved preferences file
    preferences_path: PathBuf,
}

impl RuntimeConfig {
    /// Build from parsed arguments.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            output: super::OutputManager::new(true, false),
            preferences_path: args.preferences_path()?,
        })
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Preferences file path
    pub fn preferences_path(&self) -> &std::path::Path {
        &self.preferences_path
    }

    /// Load persisted preferences
    pub fn preferences(&self) -> anyhow::Result<Preferences> {
        Preferences::load(&self.preferences_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_preferences() {
        let args = Args::try_parse_from([
            "kodegen_bundler_appcast",
            "generate",
            "MyApp.app",
            "--tools-dir",
            "/flag/bin",
        ])
        .unwrap();
        let Command::Generate { tools, .. } = &args.command else {
            panic!("expected generate");
        };

        let prefs = Preferences {
            tools_dir: Some("/prefs/bin".into()),
            private_key: Some("/prefs/key".into()),
        };
        let settings = tools.settings(&prefs);
        assert_eq!(settings.tools_dir(), Some(Path::new("/flag/bin")));
        assert_eq!(settings.key_source(), &KeySource::File("/prefs/key".into()));
        assert_eq!(settings.archiver(), Path::new("ditto"));
    }

    #[test]
    fn empty_url_is_rejected() {
        let args =
            Args::try_parse_from(["kodegen_bundler_appcast", "update-url", "A.app", "--url", " "])
                .unwrap();
        assert!(args.validate().is_err());
    }
}
