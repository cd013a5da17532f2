//! Sparkle appcast documents.
//!
//! An appcast is an RSS 2.0 feed with one `<channel>` and, here, one `<item>`
//! describing the release:
//!
//! ```xml
//! <rss version="2.0" xmlns:sparkle="http://www.andymatuschak.org/xml-namespaces/sparkle">
//!   <channel>
//!     <title>MyApp</title>
//!     <item>
//!       <title>Version 1.2.3</title>
//!       <pubDate>Sat, 17 Oct 2026 09:30:00 +0000</pubDate>
//!       <sparkle:version>42</sparkle:version>
//!       <sparkle:shortVersionString>1.2.3</sparkle:shortVersionString>
//!       <enclosure url="INSERT_URL_HERE" sparkle:edSignature="abc123" length="4096" type="application/octet-stream" />
//!     </item>
//!   </channel>
//! </rss>
//! ```

mod reader;
mod writer;

pub use reader::{read_appcast, read_appcast_file};
pub use writer::{format_pub_date, render_appcast, write_appcast};

use crate::bundler::platform::macos::Signature;
use crate::metadata::BundleMetadata;

/// Sparkle XML namespace.
pub const SPARKLE_NS: &str = "http://www.andymatuschak.org/xml-namespaces/sparkle";

/// Enclosure URL used until a download URL is known.
pub const URL_PLACEHOLDER: &str = "INSERT_URL_HERE";

/// File name of the appcast written next to the bundle.
pub const APPCAST_FILE_NAME: &str = "appcast.xml";

/// Content type of the enclosure.
pub const ENCLOSURE_TYPE: &str = "application/octet-stream";

/// Everything an appcast item carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release {
    /// Application name, used as the channel title.
    pub display_name: String,
    /// `<sparkle:version>`.
    pub build_version: String,
    /// `<sparkle:shortVersionString>`.
    pub short_version: String,
    /// Enclosure signature and length.
    pub signature: Signature,
    /// Download URL; None renders [`URL_PLACEHOLDER`].
    pub url: Option<String>,
}

impl Release {
    /// Combine bundle metadata with a signature.
    pub fn new(metadata: &BundleMetadata, signature: Signature, url: Option<String>) -> Self {
        Self {
            display_name: metadata.display_name.clone(),
            build_version: metadata.build_version.clone(),
            short_version: metadata.short_version.clone(),
            signature,
            url: normalize_url(url),
        }
    }

    /// Replace the download URL, leaving everything else untouched.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = normalize_url(url);
        self
    }

    /// The URL written into the enclosure.
    pub fn download_url(&self) -> &str {
        self.url.as_deref().unwrap_or(URL_PLACEHOLDER)
    }
}

fn normalize_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty() && u != URL_PLACEHOLDER)
}
