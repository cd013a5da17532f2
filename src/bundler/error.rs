//! Error types for the appcast pipeline.
//!
//! Each variant maps onto one failure class the pipeline can hit: bad input,
//! missing configuration, unreadable bundle metadata, a failing external tool,
//! or tool output that cannot be understood.

use std::path::{Path, PathBuf};
use thiserror::Error as DeriveError;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// The supplied path is not an application bundle.
    #[error("{} is not an application bundle (expected a .app directory)", .0.display())]
    InvalidBundle(PathBuf),

    /// A required tool or key is not configured or cannot be found.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// `Info.plist` is absent or cannot be parsed.
    #[error("failed to read bundle metadata from {}: {reason}", .path.display())]
    Metadata {
        /// Path of the property list.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// An external tool exited unsuccessfully.
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        /// Tool name as shown to the user.
        tool: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The key generator reports that no signing key exists.
    #[error("no EdDSA signing key found in the keychain: {0}")]
    NoSigningKey(String),

    /// `sign_update` output did not carry the expected attributes.
    #[error("could not parse sign_update output ({reason}): {output:?}")]
    SignatureParse {
        /// What was missing or malformed.
        reason: String,
        /// Raw tool output.
        output: String,
    },

    /// The requested operation is not valid in the pipeline's current state.
    #[error("invalid pipeline state: {0}")]
    InvalidState(String),

    /// Appcast XML could not be written.
    #[error("failed to write appcast XML: {0}")]
    XmlWrite(#[from] xml::writer::Error),

    /// Appcast XML could not be read.
    #[error("failed to read appcast XML: {0}")]
    XmlRead(#[from] xml::reader::Error),

    /// A filesystem operation failed.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        error: std::io::Error,
    },

    /// Plain I/O error.
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Convenience for attaching filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wrap the error with a description of the operation and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attach a message to a failing `Result` or an empty `Option`.
pub trait Context<T> {
    /// Convert into a pipeline error with the given message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Like [`Context::context`] but evaluated lazily.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
