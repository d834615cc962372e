use anyhow::Result;

use feeder_core::{ApiGateway, FeedList, Session};

pub async fn run(session: &Session, gateway: &ApiGateway, url: &str) -> Result<()> {
    super::require_auth(session)?;

    println!("Subscribing to feed: {}", url);

    let mut feeds = FeedList::new();
    feeds.add(gateway, url).await?;

    match feeds.feeds().iter().find(|feed| feed.url == url) {
        Some(feed) => println!("Subscribed to '{}' (feed {}).", feed.name, feed.id),
        None => println!("Subscribed. You now have {} feeds.", feeds.feeds().len()),
    }

    Ok(())
}
