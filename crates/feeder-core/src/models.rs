use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A feed the user is subscribed to, with its aggregate unread count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Unread entries in this feed, as reported by the server
    #[serde(default)]
    pub unreads: u32,
}

/// One item belonging to a feed.
///
/// The same shape backs both projections: the article list carries entries
/// with truncated content, the reader carries one entry with full content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub feed_id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Publication date as unix seconds
    #[serde(rename = "pub-date", default)]
    pub pub_date: Option<i64>,
    #[serde(default)]
    pub read: bool,
}

impl Entry {
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.pub_date.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Render the entry content as plain text, wrapped to `width` columns
    pub fn content_text(&self, width: usize) -> String {
        let html = self.content.as_deref().unwrap_or("");
        html2text::from_read(html.as_bytes(), width).unwrap_or_else(|_| html.to_string())
    }

    /// A one-line preview of the content, at most `max_len` characters
    pub fn preview(&self, max_len: usize) -> String {
        let text = self.content_text(200);
        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if line.chars().count() <= max_len {
            return line;
        }

        let truncated: String = line.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Read/unread keyword accepted by status-change operations.
///
/// Parsing rejects anything else before a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    Read,
    Unread,
}

impl ReadStatus {
    pub fn as_bool(self) -> bool {
        matches!(self, ReadStatus::Read)
    }
}

impl FromStr for ReadStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(ReadStatus::Read),
            "unread" => Ok(ReadStatus::Unread),
            other => Err(Error::Validation(format!(
                "invalid read status '{}' (expected 'read' or 'unread')",
                other
            ))),
        }
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadStatus::Read => write!(f, "read"),
            ReadStatus::Unread => write!(f, "unread"),
        }
    }
}
