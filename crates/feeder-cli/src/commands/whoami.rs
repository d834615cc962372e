use anyhow::Result;

use feeder_core::{ApiGateway, Session};

pub async fn run(session: &Session, gateway: &ApiGateway) -> Result<()> {
    super::require_auth(session)?;

    let user = gateway.current_user().await?;
    println!("{}", user.username);
    Ok(())
}
