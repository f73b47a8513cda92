use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use reelpick_api::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::catalog::{CachedCatalog, CatalogClient, TmdbCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let tmdb: Arc<dyn CatalogClient> = Arc::new(TmdbCatalog::new(
        config.catalog_api_key.clone(),
        config.catalog_api_url.clone(),
        config.catalog_image_url.clone(),
    ));

    let (catalog, cache_writer) = match config.redis_url.as_deref() {
        Some(redis_url) => {
            let (cache, writer) = Cache::new(create_redis_client(redis_url)?).await;
            let catalog: Arc<dyn CatalogClient> = Arc::new(CachedCatalog::new(tmdb, cache));
            (catalog, Some(writer))
        }
        None => {
            tracing::info!("REDIS_URL not set, catalog responses will not be cached");
            (tmdb, None)
        }
    };

    let state = Arc::new(AppState::in_memory(
        catalog,
        Duration::from_millis(config.search_debounce_ms),
    ));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(writer) = cache_writer {
        writer.shutdown().await;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
