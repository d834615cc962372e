use anyhow::Result;

use feeder_core::{ApiGateway, Session};

pub async fn run(
    session: &mut Session,
    gateway: &ApiGateway,
    username: &str,
    password: &str,
) -> Result<()> {
    session.register(gateway, username, password).await?;
    println!("Account created. Logged in as {}.", username);
    Ok(())
}
