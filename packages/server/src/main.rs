use anyhow::Context;
use common::storage::open_blob_store;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before the subscriber, so RUST_LOG may come from .env
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::load().context("Failed to load config")?;
    info!(
        backend = ?config.storage.backend,
        image_container = %config.gallery.image_container,
        thumbnail_container = %config.gallery.thumbnail_container,
        "Configuration loaded"
    );

    let blob_store = open_blob_store(&config.storage)
        .await
        .context("Failed to open blob storage")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = server::build_router(AppState::new(config, blob_store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gallery running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
