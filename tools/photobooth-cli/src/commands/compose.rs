//! Compose a strip from stored captures.

use std::sync::Arc;

use photobooth_common::clock::LocalClock;
use photobooth_common::config::AppConfig;
use photobooth_render_engine::{CompositeExporter, Selection};
use photobooth_session_store::SessionId;

pub fn run(
    config: &AppConfig,
    session: String,
    frame: String,
    indices: Vec<u32>,
) -> anyhow::Result<()> {
    let session = SessionId::parse(session)?;
    let exporter = CompositeExporter::new(config, Arc::new(LocalClock));

    println!("Composing {session} with frame {frame} ...");
    let artifact = exporter.compose_and_store(&session, &Selection::new(indices, frame))?;

    println!("  File: {}", artifact.path.display());
    println!("  URL:  {}", artifact.public_url);
    Ok(())
}
