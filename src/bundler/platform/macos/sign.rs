//! EdDSA signing with Sparkle's `sign_update`.
//!
//! `sign_update` prints a single line such as
//!
//! ```text
//! sparkle:edSignature="pNc0...Ag==" length="4096"
//! ```
//!
//! ready to paste into an `<enclosure>`. Both attributes are required; output
//! without them is an error rather than an empty signature.

use crate::bundler::{
    Error, KeySource, Result,
    utils::process::run_tool,
};
use regex::Regex;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::LazyLock;

static SIGNATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"sparkle:edSignature="([^"]*)""#).expect("signature pattern is valid")
});

static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)length="([^"]*)""#).expect("length pattern is valid")
});

/// Signature and archive length reported by `sign_update`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Base64 EdDSA signature, as printed by the tool.
    pub ed_signature: String,
    /// Archive length in bytes.
    pub length: u64,
}

/// Extract the signature and length attributes from `sign_update` output.
///
/// The two attributes are searched independently and may appear in any order.
///
/// # Errors
///
/// [`Error::SignatureParse`] if either attribute is missing or empty, or the
/// length is not a decimal integer.
pub fn parse_sign_update_output(output: &str) -> Result<Signature> {
    let parse_error = |reason: &str| Error::SignatureParse {
        reason: reason.to_string(),
        output: output.trim().to_string(),
    };

    let ed_signature = SIGNATURE_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error("no sparkle:edSignature attribute"))?;

    let length = LENGTH_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error("no length attribute"))?;

    let length = length
        .parse::<u64>()
        .map_err(|_| parse_error("length is not a number"))?;

    Ok(Signature {
        ed_signature: ed_signature.to_string(),
        length,
    })
}

/// Check that a key file, when configured, exists.
pub fn validate_key_source(key: &KeySource) -> Result<()> {
    match key.key_file() {
        Some(path) if !path.is_file() => Err(Error::MissingConfiguration(format!(
            "private key file {} does not exist",
            path.display()
        ))),
        _ => Ok(()),
    }
}

/// Sign `archive` and return the parsed signature.
///
/// With [`KeySource::File`] the key is passed as `--ed-key-file`; with
/// [`KeySource::Keychain`] no key argument is given and `sign_update` reads the
/// key from the keychain.
pub async fn sign_archive(sign_update: &Path, archive: &Path, key: &KeySource) -> Result<Signature> {
    log::info!("Signing {} with {}", archive.display(), key);

    let mut args: Vec<&OsStr> = Vec::with_capacity(3);
    if let Some(key_file) = key.key_file() {
        args.push(OsStr::new("--ed-key-file"));
        args.push(key_file.as_os_str());
    }
    args.push(archive.as_os_str());

    let output = run_tool("sign_update", sign_update, args).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let signature = parse_sign_update_output(&stdout)?;

    log::info!("✓ Signed archive ({} bytes)", signature.length);
    Ok(signature)
}
