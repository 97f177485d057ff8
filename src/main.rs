//! Main entry point for the Catalog Service

use catalog_service::{
    api,
    catalog::{fixtures::Fixtures, CatalogStore, InMemoryStore},
    config::Settings,
    AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.logging.format == "pretty" {
        registry.with(fmt::layer().pretty()).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }

    info!("Starting Catalog Service");
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    let store: Arc<dyn CatalogStore> = Arc::new(InMemoryStore::new());

    // Seed the store from fixtures
    if let Some(path) = &settings.storage.fixtures {
        let (categories, products) = Fixtures::from_path(path)?.apply(store.as_ref()).await?;
        info!(path = %path, categories, products, "Applied fixtures");
    }

    let addr = settings.bind_address();

    // Create application state
    let app_state = Arc::new(AppState::new(settings, store));

    // Build the router
    let app = api::routes::create_router(app_state);

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
