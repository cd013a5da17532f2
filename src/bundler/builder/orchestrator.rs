//! Main pipeline orchestration.
//!
//! This module provides the [`Pipeline`] state machine that walks a bundle
//! through metadata extraction, archiving, signing and appcast rendering.

use crate::bundler::{
    Error, KeySource, Result, Settings,
    appcast::{APPCAST_FILE_NAME, Release, write_appcast},
    platform::macos::{
        KeyStatus, Signature, create_archive, query_public_key, sign_archive, validate_key_source,
    },
};
use crate::metadata::{BundleMetadata, load_bundle_metadata};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

use super::{
    checksum::{ArchiveDigest, calculate_digest},
    state::{PipelineState, PipelineStatus},
    tool_detection::{GENERATE_KEYS, SIGN_UPDATE, find_archiver, find_tool},
};

/// Artifacts of a successful run.
#[derive(Clone, Debug)]
pub struct GeneratedRelease {
    /// Values rendered into the appcast.
    pub release: Release,
    /// Signed zip archive.
    pub archive_path: PathBuf,
    /// Size and SHA-256 of the archive.
    pub digest: ArchiveDigest,
    /// Where the appcast was written.
    pub appcast_path: PathBuf,
}

/// Resolved programs for one run.
struct Tools {
    archiver: PathBuf,
    sign_update: PathBuf,
}

/// Release pipeline state machine.
///
/// Drives one bundle at a time through
/// `Idle → AppLoaded → Processing → Generated`. Observers follow progress via
/// [`Pipeline::subscribe`]; every failure is also published there as a single
/// status line before being returned to the caller.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_appcast::bundler::{Pipeline, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_appcast::bundler::Result<()> {
/// let mut pipeline = Pipeline::new(SettingsBuilder::new().build());
/// let mut status = pipeline.subscribe();
/// tokio::spawn(async move {
///     while status.changed().await.is_ok() {
///         println!("{}", status.borrow().message);
///     }
/// });
///
/// pipeline.load_app("build/MyApp.app".as_ref())?;
/// let generated = pipeline.generate(None).await?;
/// println!("appcast: {}", generated.appcast_path.display());
///
/// pipeline.update_url(Some("https://example.com/MyApp-v1.0.zip".into())).await?;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    settings: Settings,
    status: Arc<watch::Sender<PipelineStatus>>,
    metadata: Option<BundleMetadata>,
    generated: Option<GeneratedRelease>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("settings", &self.settings)
            .field("status", &*self.status.borrow())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl Pipeline {
    /// Creates an idle pipeline.
    pub fn new(settings: Settings) -> Self {
        let (status, _) = watch::channel(PipelineStatus::default());
        Self {
            settings,
            status: Arc::new(status),
            metadata: None,
            generated: None,
        }
    }

    /// Subscribe to status updates.
    pub fn subscribe(&self) -> watch::Receiver<PipelineStatus> {
        self.status.subscribe()
    }

    /// Current status snapshot.
    pub fn status(&self) -> PipelineStatus {
        self.status.borrow().clone()
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.status.borrow().state
    }

    /// Returns the pipeline settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Metadata of the loaded bundle.
    pub fn metadata(&self) -> Option<&BundleMetadata> {
        self.metadata.as_ref()
    }

    /// Artifacts of the last successful run.
    pub fn generated(&self) -> Option<&GeneratedRelease> {
        self.generated.as_ref()
    }

    fn publish(&self, state: PipelineState, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Pipeline -> {}: {}", state, message);
        self.status.send_replace(PipelineStatus { state, message });
    }

    /// Load a bundle, reading its metadata eagerly.
    ///
    /// Replaces any previously loaded bundle. On failure the pipeline returns
    /// to [`PipelineState::Idle`].
    pub fn load_app(&mut self, bundle_path: &Path) -> Result<&BundleMetadata> {
        if self.state() == PipelineState::Processing {
            return Err(Error::InvalidState(
                "cannot load a bundle while processing".to_string(),
            ));
        }

        self.metadata = None;
        self.generated = None;

        let loaded = bundle_path
            .absolutize()
            .map_err(Error::from)
            .and_then(|path| load_bundle_metadata(&path));

        match loaded {
            Ok(metadata) => {
                self.publish(
                    PipelineState::AppLoaded,
                    format!(
                        "Loaded {} {} ({})",
                        metadata.display_name, metadata.short_version, metadata.build_version
                    ),
                );
                Ok(&*self.metadata.insert(metadata))
            }
            Err(e) => {
                self.publish(PipelineState::Idle, format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Archive, sign and write the appcast for the loaded bundle.
    ///
    /// Allowed from [`PipelineState::AppLoaded`] and [`PipelineState::Generated`].
    /// Archiving and signing run on a background task, one after the other.
    /// On failure the pipeline returns to [`PipelineState::AppLoaded`].
    pub async fn generate(&mut self, url: Option<String>) -> Result<&GeneratedRelease> {
        let metadata = match (self.state(), &self.metadata) {
            (PipelineState::AppLoaded | PipelineState::Generated, Some(metadata)) => {
                metadata.clone()
            }
            (state, _) => {
                return Err(Error::InvalidState(format!(
                    "cannot generate while {state}; load a bundle first"
                )));
            }
        };

        match self.run(metadata, url).await {
            Ok(generated) => {
                self.publish(
                    PipelineState::Generated,
                    format!("Appcast written to {}", generated.appcast_path.display()),
                );
                Ok(&*self.generated.insert(generated))
            }
            Err(e) => {
                self.generated = None;
                self.publish(PipelineState::AppLoaded, format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Re-render the appcast with a new download URL.
    ///
    /// Only valid in [`PipelineState::Generated`]. The archive and signature
    /// from the last run are reused; nothing is re-archived or re-signed.
    pub async fn update_url(&mut self, url: Option<String>) -> Result<&GeneratedRelease> {
        let Some(generated) = self
            .generated
            .as_ref()
            .filter(|_| self.state() == PipelineState::Generated)
        else {
            return Err(Error::InvalidState(format!(
                "cannot update the URL while {}; generate first",
                self.state()
            )));
        };

        let release = generated.release.clone().with_url(url);
        let appcast_path = generated.appcast_path.clone();

        if let Err(e) = write_appcast(&appcast_path, &release, &chrono::Local::now()).await {
            self.publish(PipelineState::Generated, format!("Error: {e}"));
            return Err(e);
        }

        self.publish(
            PipelineState::Generated,
            format!("Updated download URL to {}", release.download_url()),
        );
        let generated = self
            .generated
            .as_mut()
            .ok_or_else(|| Error::InvalidState("release disappeared".to_string()))?;
        generated.release = release;
        Ok(&*generated)
    }

    async fn run(&self, metadata: BundleMetadata, url: Option<String>) -> Result<GeneratedRelease> {
        let tools = self.preflight().await?;

        let output_dir = metadata.output_dir().to_path_buf();
        let archive_path = output_dir.join(metadata.archive_name());
        let appcast_path = output_dir.join(APPCAST_FILE_NAME);

        self.publish(
            PipelineState::Processing,
            format!("Archiving {}", metadata.display_name),
        );

        let status = Arc::clone(&self.status);
        let key = self.settings.key_source().clone();
        let bundle_path = metadata.bundle_path.clone();
        let task_archive_path = archive_path.clone();

        let (digest, signature) = tokio::spawn(async move {
            archive_and_sign(&tools, &bundle_path, &task_archive_path, &key, &status).await
        })
        .await
        .map_err(|e| Error::GenericError(format!("archive/sign task failed: {e}")))??;

        if signature.length != digest.size {
            log::warn!(
                "sign_update reported length {} but {} is {} bytes",
                signature.length,
                archive_path.display(),
                digest.size
            );
        }

        let release = Release::new(&metadata, signature, url);
        write_appcast(&appcast_path, &release, &chrono::Local::now()).await?;

        Ok(GeneratedRelease {
            release,
            archive_path,
            digest,
            appcast_path,
        })
    }

    /// Resolve every tool and check the key before any subprocess runs.
    async fn preflight(&self) -> Result<Tools> {
        let archiver = find_archiver(self.settings.archiver())?;
        let sign_update = find_tool(SIGN_UPDATE, self.settings.tools_dir())?;
        validate_key_source(self.settings.key_source())?;

        if *self.settings.key_source() == KeySource::Keychain {
            match find_tool(GENERATE_KEYS, self.settings.tools_dir()) {
                Ok(generate_keys) => {
                    if let KeyStatus::Missing { stderr } = query_public_key(&generate_keys).await? {
                        return Err(Error::NoSigningKey(if stderr.is_empty() {
                            "run generate_keys to create one".to_string()
                        } else {
                            stderr
                        }));
                    }
                }
                Err(e) => log::warn!("Skipping keychain check: {}", e),
            }
        }

        Ok(Tools {
            archiver,
            sign_update,
        })
    }
}

async fn archive_and_sign(
    tools: &Tools,
    bundle_path: &Path,
    archive_path: &Path,
    key: &KeySource,
    status: &watch::Sender<PipelineStatus>,
) -> Result<(ArchiveDigest, Signature)> {
    create_archive(&tools.archiver, bundle_path, archive_path).await?;

    let digest = calculate_digest(archive_path).await?;
    log::info!(
        "Archive {} bytes, SHA-256 {}",
        digest.size,
        digest.sha256
    );

    status.send_replace(PipelineStatus {
        state: PipelineState::Processing,
        message: format!("Signing {}", archive_path.display()),
    });

    let signature = sign_archive(&tools.sign_update, archive_path, key).await?;
    Ok((digest, signature))
}
