use anyhow::Result;

use feeder_core::Session;

pub fn run(session: &mut Session) -> Result<()> {
    if !session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    session.logout();
    println!("Logged out.");
    Ok(())
}
