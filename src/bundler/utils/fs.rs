//! File system utilities for release artifacts.
//!
//! Artifacts are always rewritten from scratch: the previous file is removed
//! before the new one is produced.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Removes a file if it exists.
///
/// Missing files are not an error (idempotent).
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {
            log::debug!("Removed previous {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing previous artifact", path),
    }
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    remove_file_if_exists(path).await?;
    fs::write(path, contents)
        .await
        .fs_context("writing", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("gone.zip");
        remove_file_if_exists(&path).await.unwrap();

        std::fs::write(&path, b"x").unwrap();
        remove_file_if_exists(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_replaces_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("appcast.xml");
        write_file(&path, b"first version, longer").await.unwrap();
        write_file(&path, b"second").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn write_reports_path_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing-dir").join("appcast.xml");
        let err = write_file(&path, b"x").await.unwrap_err();
        assert!(err.to_string().contains("missing-dir"), "{err}");
    }
}
