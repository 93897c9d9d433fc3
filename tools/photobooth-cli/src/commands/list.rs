//! Print a session's capture URLs.

use photobooth_common::config::AppConfig;
use photobooth_session_store::{SessionId, SessionStore};

pub fn run(config: &AppConfig, session: String) -> anyhow::Result<()> {
    let session = SessionId::parse(session)?;
    let listing = SessionStore::new(config.storage.clone()).list_photos(&session)?;

    if !listing.session_found {
        anyhow::bail!("Session not found: {session}");
    }
    if listing.photos.is_empty() {
        println!("Session {session} has no captures.");
    }
    for url in &listing.photos {
        println!("{url}");
    }
    Ok(())
}
