use anyhow::bail;
use feeder_core::Session;

pub mod entries;
pub mod feeds;
pub mod import;
pub mod login;
pub mod logout;
pub mod mark;
pub mod open;
pub mod register;
pub mod show;
pub mod subscribe;
pub mod unsubscribe;
pub mod whoami;

/// Guard for commands that need an authenticated session
pub fn require_auth(session: &Session) -> anyhow::Result<()> {
    if !session.is_authenticated() {
        bail!("not logged in; run `feeder login <username> <password>` first");
    }
    Ok(())
}
