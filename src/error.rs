//! Top-level error types for the command line tool.
//!
//! Pipeline failures live in [`crate::bundler::Error`]; this module wraps them
//! together with CLI and preference-file errors.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;

        match self {
            Self::Bundler(E::MissingConfiguration(_)) => vec![
                "Point at Sparkle's bin directory with --tools-dir or `config set-tools-dir`"
                    .to_string(),
                "Or set a private key file with --private-key or `config set-private-key`"
                    .to_string(),
            ],
            Self::Bundler(E::NoSigningKey(_)) => vec![
                "Run Sparkle's generate_keys once to create a key in the keychain".to_string(),
                "Or sign with an exported key file via --private-key".to_string(),
            ],
            Self::Bundler(E::InvalidBundle(_) | E::Metadata { .. }) => {
                vec!["Pass the path of a built .app bundle containing Contents/Info.plist".to_string()]
            }
            Self::Bundler(E::SignatureParse { .. }) => {
                vec!["Check that sign_update is Sparkle 2 and can access the key".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_errors_display_without_prefix() {
        let err = BundlerError::from(crate::bundler::Error::MissingConfiguration(
            "sign_update not found".into(),
        ));
        assert_eq!(err.to_string(), "missing configuration: sign_update not found");
        assert_eq!(err.recovery_suggestions().len(), 2);
    }
}
