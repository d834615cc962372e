//! Cached article list for the currently selected feed.

use crate::api::ApiGateway;
use crate::models::Entry;
use crate::Result;

/// Projection applied when reading the cached list. Never mutates the cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EntryFilter {
    #[default]
    All,
    Read,
    Unread,
    /// Show exactly these entries regardless of read status
    Ids(Vec<i64>),
}

impl EntryFilter {
    fn matches(&self, entry: &Entry) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::Read => entry.read,
            EntryFilter::Unread => !entry.read,
            EntryFilter::Ids(ids) => ids.contains(&entry.id),
        }
    }
}

/// Entry summaries for one feed at a time, replaced wholesale on navigation.
///
/// Each navigation stamps a generation counter; a fetch committed with a
/// stale stamp is discarded, so a late-arriving response for a superseded
/// navigation cannot overwrite newer state.
#[derive(Debug)]
pub struct ArticleList {
    feed_id: Option<i64>,
    entries: Vec<Entry>,
    filter: EntryFilter,
    epoch: u64,
    truncate: u32,
}

impl ArticleList {
    /// `truncate` is the preview length requested for list fetches
    pub fn new(truncate: u32) -> Self {
        Self {
            feed_id: None,
            entries: Vec::new(),
            filter: EntryFilter::default(),
            epoch: 0,
            truncate,
        }
    }

    /// Fetch the entry list for `feed_id`, replacing the cache.
    ///
    /// Re-entering the feed already held is a no-op; use [`refresh`] to
    /// force a refetch.
    ///
    /// [`refresh`]: ArticleList::refresh
    pub async fn update(&mut self, gateway: &ApiGateway, feed_id: i64) -> Result<()> {
        if self.feed_id == Some(feed_id) {
            return Ok(());
        }
        self.fetch_into(gateway, feed_id).await
    }

    /// Refetch the currently held feed. No-op when no feed is selected.
    pub async fn refresh(&mut self, gateway: &ApiGateway) -> Result<()> {
        match self.feed_id {
            Some(feed_id) => self.fetch_into(gateway, feed_id).await,
            None => Ok(()),
        }
    }

    async fn fetch_into(&mut self, gateway: &ApiGateway, feed_id: i64) -> Result<()> {
        let stamp = self.begin();

        let ids = gateway.feed_entry_ids(feed_id, None).await?;
        // An empty feed is a valid result, not an error
        let entries = if ids.is_empty() {
            Vec::new()
        } else {
            gateway.entries(&ids, Some(self.truncate)).await?
        };

        self.commit(stamp, feed_id, entries);
        Ok(())
    }

    /// Stamp a new navigation, invalidating any in-flight fetch
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Install a fetch result. Returns false (and leaves the cache alone)
    /// when `stamp` has been superseded by a newer navigation.
    pub fn commit(&mut self, stamp: u64, feed_id: i64, entries: Vec<Entry>) -> bool {
        if stamp != self.epoch {
            tracing::debug!(feed_id, stamp, epoch = self.epoch, "discarding stale fetch");
            return false;
        }
        self.feed_id = Some(feed_id);
        self.entries = entries;
        true
    }

    /// Reconcile the cached summary for `article` with its read flag.
    ///
    /// At most one cached entry can disagree with the open article at a
    /// time; this copies the flag across and leaves every other entry
    /// untouched. Idempotent.
    pub fn push(&mut self, article: Option<&Entry>) {
        let Some(article) = article else {
            return;
        };

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == article.id) {
            entry.read = article.read;
        }
    }

    pub fn set_filter(&mut self, filter: EntryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    /// The cached entries under the current filter
    pub fn filtered(&self) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The feed the cache belongs to, if any
    pub fn feed_id(&self) -> Option<i64> {
        self.feed_id
    }

    pub fn clear(&mut self) {
        // Bump the epoch so an in-flight fetch cannot resurrect the cache
        self.begin();
        self.feed_id = None;
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, read: bool) -> Entry {
        Entry {
            id,
            feed_id: 1,
            title: format!("entry {}", id),
            author: None,
            url: None,
            content: None,
            pub_date: None,
            read,
        }
    }

    #[test]
    fn test_push_copies_flag_to_matching_entry_only() {
        let mut list = ArticleList::new(300);
        let stamp = list.begin();
        list.commit(stamp, 1, vec![entry(41, false), entry(42, false), entry(43, true)]);

        let opened = entry(42, true);
        list.push(Some(&opened));

        assert!(list.entries()[1].read);
        assert!(!list.entries()[0].read);
        assert!(list.entries()[2].read);
    }

    #[test]
    fn test_push_is_idempotent() {
        let mut list = ArticleList::new(300);
        let stamp = list.begin();
        list.commit(stamp, 1, vec![entry(1, false), entry(2, false)]);

        let opened = entry(2, true);
        list.push(Some(&opened));
        let after_first: Vec<Entry> = list.entries().to_vec();
        list.push(Some(&opened));

        assert_eq!(list.entries(), after_first.as_slice());
    }

    #[test]
    fn test_push_without_open_article_is_noop() {
        let mut list = ArticleList::new(300);
        let stamp = list.begin();
        list.commit(stamp, 1, vec![entry(1, false)]);

        list.push(None);
        assert!(!list.entries()[0].read);
    }

    #[test]
    fn test_stale_commit_is_discarded() {
        let mut list = ArticleList::new(300);

        let first = list.begin();
        let second = list.begin();

        // The newer navigation's result lands first
        assert!(list.commit(second, 8, vec![entry(80, false)]));
        // The superseded one must not overwrite it
        assert!(!list.commit(first, 7, vec![entry(70, false)]));

        assert_eq!(list.feed_id(), Some(8));
        assert_eq!(list.entries().len(), 1);
        assert_eq!(list.entries()[0].id, 80);
    }

    #[test]
    fn test_filter_is_a_pure_projection() {
        let mut list = ArticleList::new(300);
        let stamp = list.begin();
        list.commit(stamp, 1, vec![entry(1, true), entry(2, false), entry(3, false)]);

        list.set_filter(EntryFilter::Unread);
        let unread: Vec<i64> = list.filtered().iter().map(|e| e.id).collect();
        assert_eq!(unread, vec![2, 3]);

        list.set_filter(EntryFilter::Read);
        let read: Vec<i64> = list.filtered().iter().map(|e| e.id).collect();
        assert_eq!(read, vec![1]);

        list.set_filter(EntryFilter::Ids(vec![1, 3]));
        let picked: Vec<i64> = list.filtered().iter().map(|e| e.id).collect();
        assert_eq!(picked, vec![1, 3]);

        // The cache itself is untouched
        list.set_filter(EntryFilter::All);
        assert_eq!(list.entries().len(), 3);
    }

    #[test]
    fn test_clear_invalidates_in_flight_fetch() {
        let mut list = ArticleList::new(300);
        let stamp = list.begin();
        list.clear();

        assert!(!list.commit(stamp, 3, vec![entry(1, false)]));
        assert_eq!(list.feed_id(), None);
        assert!(list.entries().is_empty());
    }
}
