//! Cached subscription list.

use url::Url;

use crate::api::ApiGateway;
use crate::models::Feed;
use crate::{Error, Result};

/// The user's subscribed feeds, refreshed wholesale from the server.
///
/// Mutations never patch the cache locally; add and remove re-fetch the
/// authoritative list after the server acknowledges.
#[derive(Debug, Default)]
pub struct FeedList {
    feeds: Vec<Feed>,
    unreads: u32,
}

impl FeedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list with the server's and recompute the total
    /// unread count
    pub async fn update(&mut self, gateway: &ApiGateway) -> Result<()> {
        let feeds = gateway.feeds().await?;
        self.replace(feeds);
        Ok(())
    }

    /// Subscribe to a feed, then re-fetch the list
    pub async fn add(&mut self, gateway: &ApiGateway, url: &str) -> Result<()> {
        Url::parse(url)
            .map_err(|_| Error::Validation(format!("'{}' is not a valid feed URL", url)))?;

        gateway.subscribe(url).await?;
        self.update(gateway).await
    }

    /// Subscribe to a batch of feeds, one request per URL.
    ///
    /// Individually failing URLs are logged and skipped; the list is
    /// re-fetched once after all requests settle. Returns how many
    /// subscriptions succeeded.
    pub async fn add_many(&mut self, gateway: &ApiGateway, urls: &[String]) -> Result<usize> {
        let mut added = 0;

        for url in urls {
            match gateway.subscribe(url).await {
                Ok(()) => added += 1,
                Err(err) => tracing::warn!(%url, "failed to subscribe: {}", err),
            }
        }

        self.update(gateway).await?;
        Ok(added)
    }

    /// Unsubscribe from a feed, then re-fetch the list
    pub async fn remove(&mut self, gateway: &ApiGateway, id: i64) -> Result<()> {
        gateway.unsubscribe(id).await?;
        self.update(gateway).await
    }

    /// Look up a cached feed by id (linear scan; the list is small)
    pub fn get(&self, id: i64) -> Option<&Feed> {
        self.feeds.iter().find(|feed| feed.id == id)
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    /// Total unread count across all feeds
    pub fn unreads(&self) -> u32 {
        self.unreads
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn clear(&mut self) {
        self.feeds.clear();
        self.unreads = 0;
    }

    fn replace(&mut self, feeds: Vec<Feed>) {
        self.unreads = feeds.iter().map(|feed| feed.unreads).sum();
        self.feeds = feeds;
    }
}
