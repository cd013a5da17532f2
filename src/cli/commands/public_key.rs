//! `public-key` command.

use std::path::Path;

use crate::bundler::builder::{GENERATE_KEYS, find_tool};
use crate::bundler::platform::macos::{KeyStatus, query_public_key};
use crate::cli::RuntimeConfig;
use crate::error::Result;

/// Print the keychain's EdDSA public key.
///
/// Exit code 1 when no key is present.
pub async fn run_public_key(tools_dir: Option<&Path>, config: &RuntimeConfig) -> Result<i32> {
    let prefs = config.preferences()?;
    let tools_dir = tools_dir.or(prefs.tools_dir.as_deref());
    let generate_keys = find_tool(GENERATE_KEYS, tools_dir)?;

    match query_public_key(&generate_keys).await? {
        KeyStatus::Present(key) => {
            config.output().plain(&key)?;
            Ok(0)
        }
        KeyStatus::Missing { stderr } => {
            config
                .output()
                .warn("No EdDSA key in the keychain; run generate_keys to create one")?;
            if !stderr.is_empty() {
                config.output().warn(&stderr)?;
            }
            Ok(1)
        }
    }
}
