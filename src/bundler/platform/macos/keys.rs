//! Public key lookup with Sparkle's `generate_keys`.

use crate::bundler::{Error, Result};
use std::path::Path;
use tokio::process::Command;

/// Outcome of asking `generate_keys` for the existing public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyStatus {
    /// A key exists; holds the base64 public key.
    Present(String),
    /// The tool exited unsuccessfully, meaning no key is stored.
    Missing {
        /// What the tool printed on standard error.
        stderr: String,
    },
}

/// Run `generate_keys -p`.
///
/// A non-zero exit is not an error here: it is how the tool reports that the
/// keychain holds no key.
///
/// # Errors
///
/// [`Error::ToolFailed`] only if the tool cannot be started.
pub async fn query_public_key(generate_keys: &Path) -> Result<KeyStatus> {
    log::debug!("Querying public key with {}", generate_keys.display());

    let output = Command::new(generate_keys)
        .arg("-p")
        .output()
        .await
        .map_err(|e| Error::ToolFailed {
            tool: "generate_keys".to_string(),
            status: "could not be started".to_string(),
            stderr: format!("{}: {}", generate_keys.display(), e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || stdout.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::warn!("generate_keys reports no key ({}): {}", output.status, stderr);
        return Ok(KeyStatus::Missing { stderr });
    }

    Ok(KeyStatus::Present(stdout))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("generate_keys");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn present_key_is_returned() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = script(tmp.path(), r#"[ "$1" = "-p" ] && echo "cHVibGljLWtleQ==""#);
        assert_eq!(
            query_public_key(&tool).await.unwrap(),
            KeyStatus::Present("cHVibGljLWtleQ==".to_string())
        );
    }

    #[tokio::test]
    async fn non_zero_exit_means_no_key() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = script(tmp.path(), "echo 'ERROR! Failed to find keychain item' >&2; exit 1");
        match query_public_key(&tool).await.unwrap() {
            KeyStatus::Missing { stderr } => assert!(stderr.contains("keychain")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
