//! Sparkle release pipeline.
//!
//! Turns a macOS `.app` bundle into a zip archive signed with Sparkle's
//! EdDSA tooling and an `appcast.xml` describing the release.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_appcast::bundler::{KeySource, Pipeline, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_appcast::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .tools_dir("/Applications/Sparkle/bin")
//!     .key_source(KeySource::Keychain)
//!     .build();
//!
//! let mut pipeline = Pipeline::new(settings);
//! pipeline.load_app("build/MyApp.app".as_ref())?;
//! let generated = pipeline.generate(Some("https://example.com/MyApp-v1.0.zip".into())).await?;
//! println!("SHA-256: {}", generated.digest.sha256);
//! # Ok(())
//! # }
//! ```

pub mod appcast;
pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use appcast::Release;
pub use builder::{GeneratedRelease, Pipeline, PipelineState, PipelineStatus};
pub use error::{Error, Result};
pub use platform::macos::Signature;
pub use settings::{KeySource, Settings, SettingsBuilder};
