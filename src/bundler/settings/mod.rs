//! Configuration structures for the appcast pipeline.
//!
//! [`Settings`] is the explicit configuration handed to the pipeline: where the
//! Sparkle tools live, where the EdDSA key lives, and which archiver to run.

mod builder;
mod core;
mod key;

pub use builder::SettingsBuilder;
pub use self::core::{DEFAULT_ARCHIVER, Settings};
pub use key::KeySource;
