use std::path::Path;

use anyhow::Result;

use feeder_core::opml::parse_opml_file;
use feeder_core::{ApiGateway, FeedList, Session};

pub async fn run(session: &Session, gateway: &ApiGateway, path: &Path) -> Result<()> {
    super::require_auth(session)?;

    let outlines = parse_opml_file(path)?;
    if outlines.is_empty() {
        println!("No feeds found in {}.", path.display());
        return Ok(());
    }

    println!("Importing {} feeds...", outlines.len());

    let urls: Vec<String> = outlines.into_iter().map(|outline| outline.url).collect();
    let total = urls.len();

    let mut feeds = FeedList::new();
    let added = feeds.add_many(gateway, &urls).await?;

    println!("Subscribed to {} of {} feeds.", added, total);
    if added < total {
        println!("Run with RUST_LOG=warn to see which imports failed.");
    }

    Ok(())
}
