//! Platform-specific tooling.
//!
//! Sparkle releases are macOS-only; the tools are plain executables, so this
//! module builds on every host (tests substitute stand-in scripts).

pub mod macos;
