//! OPML subscription-list import.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::{Error, Result};

/// A feed reference extracted from an OPML outline
#[derive(Debug, Clone)]
pub struct OpmlFeed {
    pub url: String,
    pub name: Option<String>,
}

/// Parse an OPML file and extract the feed URLs it references
pub fn parse_opml_file(path: &Path) -> Result<Vec<OpmlFeed>> {
    let content = std::fs::read_to_string(path)?;
    parse_opml(&content)
}

/// Parse OPML content. Outline elements without an `xmlUrl` attribute are
/// categories and are skipped.
pub fn parse_opml(content: &str) -> Result<Vec<OpmlFeed>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut feeds = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(element)) | Ok(Event::Start(element))
                if element.name().as_ref() == b"outline" =>
            {
                let mut url = None;
                let mut title = None;
                let mut text = None;

                for attr in element.attributes().flatten() {
                    let value = || String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.as_ref() {
                        b"xmlUrl" => url = Some(value()),
                        b"title" => title = Some(value()),
                        b"text" => text = Some(value()),
                        _ => {}
                    }
                }

                if let Some(url) = url {
                    feeds.push(OpmlFeed {
                        url,
                        // title is the canonical label, text the fallback
                        name: title.or(text),
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(Error::Opml(err.to_string())),
            _ => {}
        }
    }

    Ok(feeds)
}
