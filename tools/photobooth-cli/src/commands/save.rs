//! Store a capture from a local image file.

use std::path::PathBuf;

use photobooth_common::config::AppConfig;
use photobooth_session_store::{SessionId, SessionStore};

pub fn run(config: &AppConfig, session: String, index: u32, image: PathBuf) -> anyhow::Result<()> {
    let session = SessionId::parse(session)?;
    let bytes = std::fs::read(&image)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", image.display()))?;

    let store = SessionStore::new(config.storage.clone());
    let file_name = store.save_photo(&session, index, &bytes)?;

    println!("Saved {}", store.session_dir(&session).join(file_name).display());
    Ok(())
}
