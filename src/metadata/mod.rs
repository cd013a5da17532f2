//! Bundle metadata discovery from `Contents/Info.plist`.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Version used when `Info.plist` omits a version key.
pub const DEFAULT_VERSION: &str = "1.0";

/// Build number key (`<sparkle:version>`).
const BUNDLE_VERSION_KEY: &str = "CFBundleVersion";

/// Marketing version key (`<sparkle:shortVersionString>`).
const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

const ICON_FILE_KEY: &str = "CFBundleIconFile";

/// Metadata extracted from an application bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleMetadata {
    /// Path to the `.app` directory.
    pub bundle_path: PathBuf,

    /// Bundle filename without the `.app` extension (e.g. "MyApp").
    pub display_name: String,

    /// `CFBundleVersion`, verbatim.
    pub build_version: String,

    /// `CFBundleShortVersionString`, verbatim.
    pub short_version: String,

    /// Resolved `CFBundleIconFile`, when the bundle declares one that exists.
    pub icon_path: Option<PathBuf>,
}

impl BundleMetadata {
    /// Archive file name: `<display_name>-v<short_version>.zip`.
    pub fn archive_name(&self) -> String {
        format!("{}-v{}.zip", self.display_name, self.short_version)
    }

    /// Directory containing the bundle, where artifacts are written.
    pub fn output_dir(&self) -> &Path {
        self.bundle_path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Returns `true` if `path` looks like an application bundle.
pub fn is_app_bundle(path: &Path) -> bool {
    path.is_dir()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("app"))
}

/// Load metadata from an application bundle.
///
/// Reads `<bundle>/Contents/Info.plist` (XML or binary) once, takes the two
/// version strings verbatim and falls back to [`DEFAULT_VERSION`] for either
/// key that is absent. The icon lookup is best effort.
///
/// # Errors
///
/// * [`Error::InvalidBundle`] if `bundle_path` is not a `.app` directory
/// * [`Error::Metadata`] if the property list is missing, unparseable or not a dictionary
pub fn load_bundle_metadata(bundle_path: &Path) -> Result<BundleMetadata> {
    if !is_app_bundle(bundle_path) {
        return Err(Error::InvalidBundle(bundle_path.to_path_buf()));
    }

    let plist_path = bundle_path.join("Contents").join("Info.plist");
    if !plist_path.is_file() {
        return Err(Error::Metadata {
            path: plist_path,
            reason: "file not found".to_string(),
        });
    }

    let value = plist::Value::from_file(&plist_path).map_err(|e| Error::Metadata {
        path: plist_path.clone(),
        reason: e.to_string(),
    })?;
    let info = value.into_dictionary().ok_or_else(|| Error::Metadata {
        path: plist_path.clone(),
        reason: "top-level value is not a dictionary".to_string(),
    })?;

    let string_key = |key: &str| {
        info.get(key)
            .and_then(|v| v.as_string())
            .map(String::from)
    };

    let display_name = bundle_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidBundle(bundle_path.to_path_buf()))?;

    let build_version = string_key(BUNDLE_VERSION_KEY).unwrap_or_else(|| {
        log::warn!("{BUNDLE_VERSION_KEY} missing, using {DEFAULT_VERSION}");
        DEFAULT_VERSION.to_string()
    });
    let short_version = string_key(SHORT_VERSION_KEY).unwrap_or_else(|| {
        log::warn!("{SHORT_VERSION_KEY} missing, using {DEFAULT_VERSION}");
        DEFAULT_VERSION.to_string()
    });

    let icon_path = string_key(ICON_FILE_KEY).and_then(|name| resolve_icon(bundle_path, &name));

    log::info!(
        "Loaded {} (version {}, build {})",
        display_name,
        short_version,
        build_version
    );

    Ok(BundleMetadata {
        bundle_path: bundle_path.to_path_buf(),
        display_name,
        build_version,
        short_version,
        icon_path,
    })
}

/// `CFBundleIconFile` may omit the `.icns` extension.
fn resolve_icon(bundle_path: &Path, name: &str) -> Option<PathBuf> {
    let resources = bundle_path.join("Contents").join("Resources");
    let candidates = [resources.join(name), resources.join(format!("{name}.icns"))];

    let found = candidates.into_iter().find(|p| p.is_file());
    if found.is_none() {
        log::debug!("Icon {} not found in {}", name, resources.display());
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_bundle(dir: &Path, name: &str, plist: Option<&str>) -> PathBuf {
        let bundle = dir.join(name);
        fs::create_dir_all(bundle.join("Contents/Resources")).unwrap();
        if let Some(body) = plist {
            fs::write(bundle.join("Contents/Info.plist"), body).unwrap();
        }
        bundle
    }

    fn plist_with(entries: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
{entries}
</dict>
</plist>"#
        )
    }

    #[test]
    fn reads_versions_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "MyApp.app",
            Some(&plist_with(
                "<key>CFBundleVersion</key><string> 42b </string>\
                 <key>CFBundleShortVersionString</key><string>1.2.3-rc.1</string>",
            )),
        );

        let meta = load_bundle_metadata(&bundle).unwrap();
        assert_eq!(meta.display_name, "MyApp");
        assert_eq!(meta.build_version, " 42b ");
        assert_eq!(meta.short_version, "1.2.3-rc.1");
        assert_eq!(meta.archive_name(), "MyApp-v1.2.3-rc.1.zip");
        assert_eq!(meta.output_dir(), tmp.path());
    }

    #[test]
    fn missing_version_keys_fall_back() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(tmp.path(), "Bare.app", Some(&plist_with("")));

        let meta = load_bundle_metadata(&bundle).unwrap();
        assert_eq!(meta.build_version, DEFAULT_VERSION);
        assert_eq!(meta.short_version, DEFAULT_VERSION);
    }

    #[test]
    fn missing_plist_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(tmp.path(), "Empty.app", None);

        let err = load_bundle_metadata(&bundle).unwrap_err();
        assert!(matches!(err, Error::Metadata { .. }), "{err}");
        assert!(err.to_string().contains("Info.plist"));
    }

    #[test]
    fn garbage_plist_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(tmp.path(), "Broken.app", Some("<plist><dict><key>"));

        assert!(matches!(
            load_bundle_metadata(&bundle),
            Err(Error::Metadata { .. })
        ));
    }

    #[test]
    fn rejects_non_bundles() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("notes.txt");
        fs::write(&file, "hi").unwrap();
        let folder = tmp.path().join("Folder");
        fs::create_dir(&folder).unwrap();

        assert!(matches!(load_bundle_metadata(&file), Err(Error::InvalidBundle(_))));
        assert!(matches!(load_bundle_metadata(&folder), Err(Error::InvalidBundle(_))));
    }

    #[test]
    fn resolves_icon_without_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "Icon.app",
            Some(&plist_with("<key>CFBundleIconFile</key><string>AppIcon</string>")),
        );
        let icon = bundle.join("Contents/Resources/AppIcon.icns");
        fs::write(&icon, b"icns").unwrap();

        let meta = load_bundle_metadata(&bundle).unwrap();
        assert_eq!(meta.icon_path, Some(icon));
    }
}
