use anyhow::Result;

use feeder_core::{ApiGateway, Session};

pub async fn run(
    session: &mut Session,
    gateway: &ApiGateway,
    username: &str,
    password: &str,
) -> Result<()> {
    session.login(gateway, username, password).await?;
    println!("Logged in as {}.", username);
    Ok(())
}
