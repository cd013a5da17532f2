//! `update-url` command: rewrite the enclosure URL of an existing appcast.

use std::path::Path;

use path_absolutize::Absolutize;

use crate::bundler::appcast::{APPCAST_FILE_NAME, read_appcast_file, write_appcast};
use crate::cli::RuntimeConfig;
use crate::error::{CliError, Result};

/// Re-render `appcast.xml` next to `app` with `url`.
///
/// Metadata, signature and length come from the existing appcast; nothing is
/// archived or signed.
pub async fn run_update_url(app: &Path, url: &str, config: &RuntimeConfig) -> Result<i32> {
    let app = app.absolutize()?;
    let dir = app.parent().ok_or_else(|| CliError::InvalidArguments {
        reason: format!("{} has no parent directory", app.display()),
    })?;
    let appcast_path = dir.join(APPCAST_FILE_NAME);

    if !appcast_path.is_file() {
        return Err(CliError::InvalidArguments {
            reason: format!(
                "{} not found; run `generate` first",
                appcast_path.display()
            ),
        }
        .into());
    }

    let release = read_appcast_file(&appcast_path)?.with_url(Some(url.to_string()));
    write_appcast(&appcast_path, &release, &chrono::Local::now()).await?;

    config.output().success(&format!(
        "Updated {} (download URL {})",
        appcast_path.display(),
        release.download_url()
    ))?;
    Ok(0)
}
