//! Reading back a previously written appcast.
//!
//! Only documents with the shape produced by [`render_appcast`](super::render_appcast)
//! are understood: the first `<item>` of the first `<channel>` is taken.

use super::{Release, SPARKLE_NS};
use crate::bundler::{
    Result,
    error::{Context, ErrorExt},
    platform::macos::Signature,
};
use std::io::Read;
use std::path::Path;
use xml::{name::OwnedName, reader::EventReader, reader::XmlEvent};

#[derive(Default)]
struct Fields {
    channel_title: Option<String>,
    build_version: Option<String>,
    short_version: Option<String>,
    url: Option<String>,
    ed_signature: Option<String>,
    length: Option<String>,
}

fn is_sparkle(name: &OwnedName, local: &str) -> bool {
    name.local_name == local && name.namespace.as_deref() == Some(SPARKLE_NS)
}

/// Parse an appcast from any reader.
pub fn read_appcast<R: Read>(source: R) -> Result<Release> {
    let mut fields = Fields::default();
    let mut path: Vec<OwnedName> = Vec::new();
    let mut text = String::new();
    let mut items_seen = 0usize;

    for event in EventReader::new(source) {
        match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                if name.local_name == "item" {
                    items_seen += 1;
                }
                if items_seen == 1 && name.local_name == "enclosure" && fields.url.is_none() {
                    for attr in attributes {
                        match attr.name.local_name.as_str() {
                            "url" if attr.name.namespace.is_none() => fields.url = Some(attr.value),
                            "length" if attr.name.namespace.is_none() => {
                                fields.length = Some(attr.value)
                            }
                            "edSignature" if is_sparkle(&attr.name, "edSignature") => {
                                fields.ed_signature = Some(attr.value)
                            }
                            _ => {}
                        }
                    }
                }
                path.push(name);
                text.clear();
            }
            XmlEvent::Characters(s) | XmlEvent::CData(s) | XmlEvent::Whitespace(s) => {
                text.push_str(&s)
            }
            XmlEvent::EndElement { name } => {
                let parent = path.len().checked_sub(2).map(|i| path[i].local_name.as_str());
                let value = std::mem::take(&mut text);
                match parent {
                    Some("channel") if name.local_name == "title" => {
                        fields.channel_title.get_or_insert(value);
                    }
                    Some("item") if items_seen == 1 => {
                        if is_sparkle(&name, "version") {
                            fields.build_version = Some(value);
                        } else if is_sparkle(&name, "shortVersionString") {
                            fields.short_version = Some(value);
                        }
                    }
                    _ => {}
                }
                path.pop();
            }
            _ => {}
        }
    }

    let length = fields.length.context("appcast enclosure has no length attribute")?;
    let length = length
        .trim()
        .parse::<u64>()
        .with_context(|| format!("appcast enclosure length {length:?} is not a number"))?;

    let release = Release {
        display_name: fields.channel_title.context("appcast has no channel title")?,
        build_version: fields
            .build_version
            .context("appcast item has no <sparkle:version>")?,
        short_version: fields
            .short_version
            .context("appcast item has no <sparkle:shortVersionString>")?,
        signature: Signature {
            ed_signature: fields
                .ed_signature
                .context("appcast enclosure has no sparkle:edSignature attribute")?,
            length,
        },
        url: None,
    };

    Ok(release.with_url(fields.url))
}

/// Parse the appcast stored at `path`.
pub fn read_appcast_file(path: &Path) -> Result<Release> {
    let file = std::fs::File::open(path).fs_context("opening appcast", path)?;
    read_appcast(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::appcast::render_appcast;

    #[test]
    fn reads_back_rendered_release() {
        let release = Release {
            display_name: "MyApp".into(),
            build_version: "42".into(),
            short_version: "1.2.3".into(),
            signature: Signature {
                ed_signature: "abc123".into(),
                length: 4096,
            },
            url: Some("https://example.com/MyApp-v1.2.3.zip".into()),
        };
        let xml = render_appcast(&release, &chrono::Utc::now()).unwrap();

        assert_eq!(read_appcast(xml.as_bytes()).unwrap(), release);
    }

    #[test]
    fn whitespace_only_versions_survive_read_back() {
        let release = Release {
            display_name: "MyApp".into(),
            build_version: " ".into(),
            short_version: "\t".into(),
            signature: Signature {
                ed_signature: "abc123".into(),
                length: 10,
            },
            url: None,
        };
        let xml = render_appcast(&release, &chrono::Utc::now()).unwrap();

        let read = read_appcast(xml.as_bytes()).unwrap();
        assert_eq!(read.build_version, " ");
        assert_eq!(read.short_version, "\t");
    }

    #[test]
    fn placeholder_url_reads_as_none() {
        let xml = format!(
            r#"<rss version="2.0" xmlns:sparkle="{SPARKLE_NS}"><channel><title>A</title><item>
<sparkle:version>1</sparkle:version><sparkle:shortVersionString>1.0</sparkle:shortVersionString>
<enclosure url="INSERT_URL_HERE" sparkle:edSignature="s" length="7"/></item></channel></rss>"#
        );
        let release = read_appcast(xml.as_bytes()).unwrap();
        assert_eq!(release.url, None);
        assert_eq!(release.signature.length, 7);
    }

    #[test]
    fn missing_signature_is_an_error() {
        let xml = format!(
            r#"<rss xmlns:sparkle="{SPARKLE_NS}"><channel><title>A</title><item>
<sparkle:version>1</sparkle:version><sparkle:shortVersionString>1.0</sparkle:shortVersionString>
<enclosure url="u" length="7"/></item></channel></rss>"#
        );
        let err = read_appcast(xml.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("edSignature"), "{err}");
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(read_appcast("<rss><channel>".as_bytes()).is_err());
    }
}
