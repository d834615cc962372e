use anyhow::{bail, Result};

use feeder_core::{ApiGateway, Session};

pub async fn run(session: &Session, gateway: &ApiGateway, id: i64) -> Result<()> {
    super::require_auth(session)?;

    let entry = gateway.entry(id).await?;

    let Some(url) = entry.url else {
        bail!("entry {} has no link", id);
    };

    println!("Opening {}", url);
    open::that(&url)?;
    Ok(())
}
