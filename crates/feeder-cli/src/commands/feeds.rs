use anyhow::Result;

use feeder_core::{ApiGateway, FeedList, Session};

pub async fn run(session: &Session, gateway: &ApiGateway) -> Result<()> {
    super::require_auth(session)?;

    let mut feeds = FeedList::new();
    feeds.update(gateway).await?;

    if feeds.is_empty() {
        println!("No subscriptions yet.");
        println!("\nTo subscribe to a feed, run:");
        println!("  feeder subscribe <url>");
        return Ok(());
    }

    println!("Subscriptions ({}):\n", feeds.feeds().len());

    for feed in feeds.feeds() {
        let unread = if feed.unreads > 0 {
            format!(" ({} unread)", feed.unreads)
        } else {
            String::new()
        };

        println!("  [{}] {}{}", feed.id, feed.name, unread);
        println!("      {}", feed.url);
    }

    println!("\nTotal unread: {}", feeds.unreads());
    Ok(())
}
