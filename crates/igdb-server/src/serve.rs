use crate::config::AddonConfig;
use crate::igdb::IgdbClient;
use igdb_core::{Addon, GameSource};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the addon against the live IGDB API.
pub fn build_addon(config: &AddonConfig) -> anyhow::Result<crate::http::SharedAddon> {
    let client = IgdbClient::new(&config.igdb)?;
    let source: Arc<dyn GameSource> = Arc::new(client);
    Ok(Addon::new(source, config.manifest()))
}

pub async fn run(config: AddonConfig) -> anyhow::Result<()> {
    info!("Starting IGDB addon v{}", env!("CARGO_PKG_VERSION"));

    // Fail fast on missing credentials or a bad listen address.
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            warn!("Config: {}", e);
        }
        anyhow::bail!("Invalid configuration ({} problem(s)); see `igdb-addon config validate`", errors.len());
    }

    let addr = config.http_addr()?;
    info!("HTTP: {}", addr);
    info!("Upstream: {}", config.igdb.base_url);

    let addon = build_addon(&config)?;
    let app = crate::http::create_router(crate::http::AppState::new(addon));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Manifest available at http://{}/manifest.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, terminating...");
}
