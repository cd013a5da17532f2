//! Archive checksum calculation.
//!
//! The digest is logged next to the archive so a release can be compared with
//! what was uploaded. The size doubles as a cross-check of the length reported
//! by `sign_update`.

use crate::{bail, bundler::Result, bundler::error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Size and SHA-256 of an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveDigest {
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 (64 characters).
    pub sha256: String,
}

/// Calculates size and SHA-256 of a single file.
///
/// Reads the file in 8KB chunks.
///
/// # Errors
///
/// Fails if the path cannot be read or is not a regular file.
pub async fn calculate_digest(path: &Path) -> Result<ArchiveDigest> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading archive metadata", path)?;
    if !metadata.is_file() {
        bail!("Archive is not a regular file: {}", path.display());
    }

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening archive for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading archive for hash calculation", path)?;
        if n == 0 {
            break;
        }
        size += n as u64;
        hasher.update(&buffer[..n]);
    }

    Ok(ArchiveDigest {
        size,
        sha256: format!("{:x}", hasher.finalize()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digests_known_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.zip");
        std::fs::write(&path, b"abc").unwrap();

        let digest = calculate_digest(&path).await.unwrap();
        assert_eq!(digest.size, 3);
        assert_eq!(
            digest.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn directories_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(calculate_digest(tmp.path()).await.is_err());
    }
}
