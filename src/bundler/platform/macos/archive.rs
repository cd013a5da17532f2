//! Zip archive creation with `ditto`.

use crate::bundler::{
    Result,
    utils::{fs, process::run_tool},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Flags passed to the archiver ahead of source and destination.
///
/// `-c -k` creates a PKZip archive, `--sequesterRsrc` keeps resource forks and
/// extended attributes in `__MACOSX`, and `--keepParent` makes the bundle
/// itself the single top-level entry.
pub const DITTO_FLAGS: [&str; 4] = ["-c", "-k", "--sequesterRsrc", "--keepParent"];

/// Compress `bundle` into `archive_path`.
///
/// Any file already at `archive_path` is removed first, so each run yields a
/// fresh archive. Returns `archive_path` once the archiver has exited
/// successfully.
///
/// # Errors
///
/// [`Error::ToolFailed`](crate::bundler::Error::ToolFailed) with the archiver's
/// standard error on a non-zero exit.
pub async fn create_archive(archiver: &Path, bundle: &Path, archive_path: &Path) -> Result<PathBuf> {
    fs::remove_file_if_exists(archive_path).await?;

    log::info!(
        "Archiving {} -> {}",
        bundle.display(),
        archive_path.display()
    );

    let mut args: Vec<&OsStr> = DITTO_FLAGS.into_iter().map(OsStr::new).collect();
    args.extend([bundle.as_os_str(), archive_path.as_os_str()]);
    run_tool("ditto", archiver, args).await?;

    log::info!("✓ Created archive: {}", archive_path.display());
    Ok(archive_path.to_path_buf())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn replaces_existing_archive() {
        let tmp = tempfile::tempdir().unwrap();
        // Appends, so a stale file would show up as a second line.
        let archiver = script(
            tmp.path(),
            "fake-ditto",
            r#"for arg; do last="$arg"; done; echo "$*" >> "$last""#,
        );
        let bundle = tmp.path().join("MyApp.app");
        std::fs::create_dir(&bundle).unwrap();
        let archive = tmp.path().join("MyApp-v1.0.zip");

        create_archive(&archiver, &bundle, &archive).await.unwrap();
        create_archive(&archiver, &bundle, &archive).await.unwrap();

        let contents = std::fs::read_to_string(&archive).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("-c -k --sequesterRsrc --keepParent "));
        assert!(contents.trim_end().ends_with("MyApp-v1.0.zip"));
    }

    #[tokio::test]
    async fn failure_carries_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let archiver = script(tmp.path(), "fake-ditto", "echo 'ditto: No space left' >&2; exit 1");
        let bundle = tmp.path().join("MyApp.app");
        std::fs::create_dir(&bundle).unwrap();

        let err = create_archive(&archiver, &bundle, &tmp.path().join("x.zip"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No space left"), "{err}");
    }
}
