use anyhow::Result;

use feeder_core::{ApiGateway, Error, FeedList, Session};

pub async fn run(session: &Session, gateway: &ApiGateway, id: i64) -> Result<()> {
    super::require_auth(session)?;

    let mut feeds = FeedList::new();

    match feeds.remove(gateway, id).await {
        Ok(()) => {
            println!("Unsubscribed from feed {}.", id);
            Ok(())
        }
        Err(Error::NotFound(_)) => {
            println!("Feed {} not found.", id);

            feeds.update(gateway).await?;
            if !feeds.is_empty() {
                println!("\nAvailable subscriptions:");
                for feed in feeds.feeds() {
                    println!("  [{}] {}", feed.id, feed.name);
                }
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
