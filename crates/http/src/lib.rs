//! Photobooth HTTP Transport
//!
//! Thin axum layer over the session store and composite exporter. Every
//! JSON response carries `success`; failures carry a short `message`
//! safe to show to the end user.

pub mod error;
pub mod payload;
pub mod routes;

use std::sync::Arc;

use photobooth_common::clock::{DateClock, LocalClock};
use photobooth_common::config::AppConfig;
use photobooth_render_engine::CompositeExporter;

pub use routes::create_router;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub exporter: Arc<CompositeExporter>,
}

impl AppState {
    pub fn new(config: AppConfig, clock: Arc<dyn DateClock>) -> Self {
        let exporter = CompositeExporter::new(&config, clock);
        Self {
            config: Arc::new(config),
            exporter: Arc::new(exporter),
        }
    }
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let bind = config.server.bind.clone();
    let state = AppState::new(config, Arc::new(LocalClock));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "Photobooth listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Photobooth stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
