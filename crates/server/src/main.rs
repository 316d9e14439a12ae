use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelshelf_core::{
    load_config, validate_config, CatalogCache, CatalogFetcher, CatalogService, DurableSlot,
    MetadataSource, OmdbClient, SqliteSlot,
};
use reelshelf_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("REELSHELF_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!(
        query = %config.catalog.query,
        media_type = %config.catalog.media_type,
        "Catalog query configured"
    );

    // Metadata API client
    let source: Arc<dyn MetadataSource> =
        Arc::new(OmdbClient::new(config.omdb.clone()).context("Failed to create OMDb client")?);
    info!("Using metadata API at {}", config.omdb.base_url);

    // Durable slot backing the catalog cache
    let slot: Arc<dyn DurableSlot> = Arc::new(
        SqliteSlot::new(&config.database.path).context("Failed to open catalog database")?,
    );
    let cache = Arc::new(CatalogCache::new(slot, config.catalog.slot_key.clone()));
    info!("Catalog cache initialized (slot: {})", cache.key());

    let fetcher = CatalogFetcher::new(
        source,
        cache,
        config.catalog.catalog_query(),
        config.omdb.poster_prefix.clone(),
    )
    .with_max_concurrent_details(config.catalog.max_concurrent_details);
    let catalog = CatalogService::new(Arc::new(fetcher));

    if config.catalog.preload_on_start {
        info!("Preloading catalog");
        // Runs in the background; the outcome is logged and broadcast
        let _ = catalog.load_catalog();
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), catalog));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
