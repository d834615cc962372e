use anyhow::Result;
use chrono::Local;

use feeder_core::{ApiGateway, AppConfig, ArticleList, CurrentArticle, Session};

pub async fn run(
    session: &Session,
    gateway: &ApiGateway,
    config: &AppConfig,
    id: i64,
    keep_unread: bool,
) -> Result<()> {
    super::require_auth(session)?;

    let mut current = CurrentArticle::new();
    current.update(gateway, id).await?;

    let Some(feed_id) = current.article().map(|article| article.feed_id) else {
        anyhow::bail!("article {} could not be loaded", id);
    };

    // Cache the feed's list up front; the flag change below is pushed into
    // it instead of refetched
    let mut list = ArticleList::new(config.server.truncate_length);
    list.update(gateway, feed_id).await?;

    // Opening an article marks it read
    if !keep_unread {
        current.mark_read(gateway).await?;
        list.push(current.article());
    }

    let Some(article) = current.article() else {
        anyhow::bail!("article {} could not be loaded", id);
    };

    println!("{}", article.title);
    if let Some(author) = &article.author {
        println!("by {}", author);
    }
    if let Some(date) = article.published() {
        println!("{}", date.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    }
    if let Some(url) = &article.url {
        println!("{}", url);
    }

    println!();
    println!("{}", article.content_text(80));

    let unread = list.entries().iter().filter(|entry| !entry.read).count();
    println!();
    println!("{} unread left in this feed", unread);

    Ok(())
}
