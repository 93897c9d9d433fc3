//! Run the HTTP service.

use photobooth_common::config::AppConfig;

pub async fn run(mut config: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    tracing::info!(
        root = %config.storage.root.display(),
        frames = %config.assets.frames_dir.display(),
        "Starting photobooth service"
    );
    photobooth_http::serve(config).await
}
