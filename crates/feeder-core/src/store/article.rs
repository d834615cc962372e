//! The single "currently open" article.

use crate::api::ApiGateway;
use crate::models::{Entry, ReadStatus};
use crate::{Error, Result};

/// Singleton slot for the article being read, overwritten on navigation.
///
/// Status mutations go to the server first; the local flag flips only after
/// the acknowledgment, so a failed call leaves the slot consistent with the
/// last known server state.
#[derive(Debug, Default)]
pub struct CurrentArticle {
    entry: Option<Entry>,
    epoch: u64,
}

impl CurrentArticle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the entry with full content and replace the slot
    pub async fn update(&mut self, gateway: &ApiGateway, id: i64) -> Result<()> {
        let stamp = self.begin();
        let entry = gateway.entry(id).await?;
        self.commit(stamp, entry);
        Ok(())
    }

    /// Stamp a new navigation, invalidating any in-flight fetch
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Install a fetched entry unless `stamp` has been superseded
    pub fn commit(&mut self, stamp: u64, entry: Entry) -> bool {
        if stamp != self.epoch {
            tracing::debug!(id = entry.id, stamp, epoch = self.epoch, "discarding stale fetch");
            return false;
        }
        self.entry = Some(entry);
        true
    }

    pub fn article(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    pub async fn mark_read(&mut self, gateway: &ApiGateway) -> Result<()> {
        self.set_read(gateway, true).await
    }

    pub async fn mark_unread(&mut self, gateway: &ApiGateway) -> Result<()> {
        self.set_read(gateway, false).await
    }

    /// Mutate the read status from a keyword, validating it before any
    /// network call is made
    pub async fn set_status(&mut self, gateway: &ApiGateway, status: &str) -> Result<()> {
        let status: ReadStatus = status.parse()?;
        self.set_read(gateway, status.as_bool()).await
    }

    async fn set_read(&mut self, gateway: &ApiGateway, read: bool) -> Result<()> {
        let id = self
            .entry
            .as_ref()
            .map(|entry| entry.id)
            .ok_or_else(|| Error::Validation("no article is open".to_string()))?;

        gateway.set_read(&[id], read).await?;

        if let Some(entry) = self.entry.as_mut() {
            entry.read = read;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.begin();
        self.entry = None;
    }
}
