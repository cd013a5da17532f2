//! `generate` command: load, archive, sign, write appcast.

use std::path::Path;

use crate::bundler::{Pipeline, PipelineState};
use crate::cli::RuntimeConfig;
use crate::cli::args::ToolArgs;
use crate::error::Result;

/// Run the full pipeline for `app`.
///
/// Status updates from the pipeline are printed as they arrive; the final
/// summary lists the artifacts.
pub async fn run_generate(
    app: &Path,
    url: Option<String>,
    tools: &ToolArgs,
    config: &RuntimeConfig,
) -> Result<i32> {
    let settings = tools.settings(&config.preferences()?);
    let output = config.output().clone();

    output.section("Sparkle release")?;
    output.verbose(&format!("Signing key: {}", settings.key_source()))?;
    if let Some(dir) = settings.tools_dir() {
        output.verbose(&format!("Tools: {}", dir.display()))?;
    }

    let mut pipeline = Pipeline::new(settings);
    let mut status = pipeline.subscribe();
    let printer_output = output.clone();
    let printer = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            // Errors are reported once by the caller.
            if current.is_error() {
                continue;
            }
            let printed = match current.state {
                PipelineState::Generated => printer_output.success(&current.message),
                _ => printer_output.progress(&current.message),
            };
            if let Err(e) = printed {
                log::debug!("Could not print status update: {}", e);
            }
        }
    });

    let outcome = match pipeline.load_app(app).map(|_| ()) {
        Ok(()) => pipeline.generate(url).await.map(|generated| generated.clone()),
        Err(e) => Err(e),
    };

    drop(pipeline);
    if let Err(e) = printer.await {
        log::debug!("Status printer stopped: {}", e);
    }
    let generated = outcome?;

    output.section("Artifacts")?;
    output.indent(&format!("Archive:  {}", generated.archive_path.display()))?;
    output.indent(&format!("SHA-256:  {}", generated.digest.sha256))?;
    output.indent(&format!("Appcast:  {}", generated.appcast_path.display()))?;
    output.indent(&format!("URL:      {}", generated.release.download_url()))?;

    if generated.release.url.is_none() {
        output.warn(
            "Download URL not set; run `update-url` once the archive is uploaded",
        )?;
    }

    Ok(0)
}
