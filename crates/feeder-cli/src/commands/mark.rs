use anyhow::Result;

use feeder_core::{ApiGateway, ReadStatus, Session};

pub async fn run(session: &Session, gateway: &ApiGateway, id: i64, status: &str) -> Result<()> {
    super::require_auth(session)?;

    // Reject a bad keyword before anything goes over the wire
    let status: ReadStatus = status.parse()?;

    gateway.set_read(&[id], status.as_bool()).await?;
    println!("Marked entry {} as {}.", id, status);
    Ok(())
}
