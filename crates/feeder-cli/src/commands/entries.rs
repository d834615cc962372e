use anyhow::Result;
use chrono::Local;

use feeder_core::{ApiGateway, AppConfig, ArticleList, EntryFilter, FeedList, Session};

pub async fn run(
    session: &Session,
    gateway: &ApiGateway,
    config: &AppConfig,
    feed_id: i64,
    read_only: bool,
    unread_only: bool,
) -> Result<()> {
    super::require_auth(session)?;

    let mut feeds = FeedList::new();
    feeds.update(gateway).await?;

    let mut list = ArticleList::new(config.server.truncate_length);
    list.update(gateway, feed_id).await?;

    if read_only {
        list.set_filter(EntryFilter::Read);
    } else if unread_only {
        list.set_filter(EntryFilter::Unread);
    }

    match feeds.get(feed_id) {
        Some(feed) => println!("{} ({} unread)\n", feed.name, feed.unreads),
        None => println!("Feed {}\n", feed_id),
    }

    let entries = list.filtered();
    if entries.is_empty() {
        println!("No articles.");
        return Ok(());
    }

    for entry in entries {
        let marker = if entry.read { " " } else { "*" };
        let date = entry
            .published()
            .map(|date| date.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        println!("{} [{}] {}  {}", marker, entry.id, entry.title, date);

        let preview = entry.preview(76);
        if !preview.is_empty() {
            println!("      {}", preview);
        }
    }

    Ok(())
}
