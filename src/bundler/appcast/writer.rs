//! Appcast XML emission.

use super::{ENCLOSURE_TYPE, Release, SPARKLE_NS};
use crate::bundler::{Error, Result, utils::fs};
use chrono::{DateTime, TimeZone};
use std::io::Write;
use std::path::Path;
use xml::{
    common::XmlVersion,
    writer::{EmitterConfig, EventWriter, XmlEvent},
};

/// RFC 822 date as used by RSS `<pubDate>`. chrono always formats day and
/// month names in English.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Format a publish date, e.g. `Sat, 17 Oct 2026 09:30:00 +0200`.
pub fn format_pub_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format(PUB_DATE_FORMAT).to_string()
}

/// Render the appcast for `release`.
///
/// All values pass through the XML emitter and are escaped, so the result is
/// well-formed whatever the bundle metadata contains.
pub fn render_appcast<Tz>(release: &Release, pub_date: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut writer = EmitterConfig::new()
        .perform_indent(true)
        .create_writer(Vec::new());

    write_document(&mut writer, release, &format_pub_date(pub_date))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::GenericError(format!("appcast is not valid UTF-8: {e}")))
}

fn write_document<W: Write>(
    writer: &mut EventWriter<W>,
    release: &Release,
    pub_date: &str,
) -> Result<()> {
    writer.write(XmlEvent::StartDocument {
        version: XmlVersion::Version10,
        encoding: Some("utf-8"),
        standalone: None,
    })?;

    writer.write(
        XmlEvent::start_element("rss")
            .attr("version", "2.0")
            .ns("sparkle", SPARKLE_NS),
    )?;
    writer.write(XmlEvent::start_element("channel"))?;
    text_element(writer, "title", &release.display_name)?;

    writer.write(XmlEvent::start_element("item"))?;
    text_element(writer, "title", &format!("Version {}", release.short_version))?;
    text_element(writer, "pubDate", pub_date)?;
    text_element(writer, "sparkle:version", &release.build_version)?;
    text_element(
        writer,
        "sparkle:shortVersionString",
        &release.short_version,
    )?;

    let length = release.signature.length.to_string();
    writer.write(
        XmlEvent::start_element("enclosure")
            .attr("url", release.download_url())
            .attr("sparkle:edSignature", &release.signature.ed_signature)
            .attr("length", &length)
            .attr("type", ENCLOSURE_TYPE),
    )?;
    writer.write(XmlEvent::end_element())?; // enclosure

    writer.write(XmlEvent::end_element())?; // item
    writer.write(XmlEvent::end_element())?; // channel
    writer.write(XmlEvent::end_element())?; // rss

    Ok(())
}

fn text_element<W: Write>(writer: &mut EventWriter<W>, name: &str, text: &str) -> Result<()> {
    writer.write(XmlEvent::start_element(name))?;
    writer.write(XmlEvent::characters(text))?;
    writer.write(XmlEvent::end_element())?;
    Ok(())
}

/// Render and write the appcast to `path`, replacing any previous file.
pub async fn write_appcast<Tz>(path: &Path, release: &Release, pub_date: &DateTime<Tz>) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let document = render_appcast(release, pub_date)?;
    fs::write_file(path, document.as_bytes()).await?;
    log::info!("✓ Wrote appcast: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::appcast::{URL_PLACEHOLDER, read_appcast};
    use crate::bundler::platform::macos::Signature;
    use chrono::{FixedOffset, Utc};

    fn release() -> Release {
        Release {
            display_name: "MyApp".into(),
            build_version: "42".into(),
            short_version: "1.2.3".into(),
            signature: Signature {
                ed_signature: "abc123".into(),
                length: 4096,
            },
            url: None,
        }
    }

    fn fixed_date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-17T09:30:05+02:00").unwrap()
    }

    #[test]
    fn pub_date_is_rfc822_in_english() {
        assert_eq!(
            format_pub_date(&fixed_date()),
            "Sat, 17 Oct 2026 09:30:05 +0200"
        );
    }

    #[test]
    fn renders_expected_fields() {
        let xml = render_appcast(&release(), &fixed_date()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(&format!("xmlns:sparkle=\"{SPARKLE_NS}\"")));
        assert!(xml.contains("<title>MyApp</title>"));
        assert!(xml.contains("<title>Version 1.2.3</title>"));
        assert!(xml.contains("<pubDate>Sat, 17 Oct 2026 09:30:05 +0200</pubDate>"));
        assert!(xml.contains("<sparkle:version>42</sparkle:version>"));
        assert!(xml.contains("<sparkle:shortVersionString>1.2.3</sparkle:shortVersionString>"));
        assert!(xml.contains(&format!("url=\"{URL_PLACEHOLDER}\"")));
        assert!(xml.contains("sparkle:edSignature=\"abc123\""));
        assert!(xml.contains("length=\"4096\""));
        assert!(xml.contains("type=\"application/octet-stream\""));
    }

    #[test]
    fn identical_inputs_render_identically() {
        let a = render_appcast(&release(), &fixed_date()).unwrap();
        let b = render_appcast(&release(), &fixed_date()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn changing_url_changes_only_the_url() {
        let before = render_appcast(&release(), &fixed_date()).unwrap();
        let after = render_appcast(
            &release().with_url(Some("https://dl.example.com/MyApp-v1.2.3.zip".into())),
            &fixed_date(),
        )
        .unwrap();

        assert_ne!(before, after);
        assert_eq!(
            before.replace(URL_PLACEHOLDER, "https://dl.example.com/MyApp-v1.2.3.zip"),
            after
        );
    }

    #[test]
    fn special_characters_are_escaped() {
        let mut release = release();
        release.display_name = "R&D <Tools>".into();
        release.url = Some("https://example.com/dl?a=1&b=\"2\"".into());

        let xml = render_appcast(&release, &Utc::now()).unwrap();
        assert!(xml.contains("R&amp;D &lt;Tools"));
        assert!(!xml.contains("a=1&b"));

        let parsed = read_appcast(xml.as_bytes()).unwrap();
        assert_eq!(parsed.display_name, "R&D <Tools>");
        assert_eq!(parsed.url.as_deref(), Some("https://example.com/dl?a=1&b=\"2\""));
    }
}
