/// Server setup and initialization
///
/// Wires together the project store, the inspector and the HTTP routes.
/// Owns the store lifecycle: opened (and migrated) before serving, closed after shutdown.

use crate::{
    api::{create_database_routes, create_project_routes, AppState},
    config::Config,
    project::ProjectStore,
};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;

/// Open the project store at the configured location
///
/// Creates the data directory if needed and runs schema reconciliation.
pub async fn open_store(config: &Config) -> Result<ProjectStore> {
    let db_path = config.database.database_path();
    tracing::info!("📁 Using data directory: {}", config.database.data_dir.display());

    let store = ProjectStore::open(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize database at {}: {}", db_path.display(), e))?;

    tracing::info!("🔄 Schema reconciliation: {}", store.migration());

    Ok(store)
}

/// Create the Axum application with all routes
pub fn create_app(store: ProjectStore) -> Router {
    let state = AppState::new(store);

    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Project API routes
        .merge(create_project_routes())
        // Database inspector routes
        .merge(create_database_routes())
        .with_state(state)
}

/// Install the tracing subscriber
///
/// Level comes from RUST_LOG, defaulting to info.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();
}

/// Start the HTTP server with the given configuration
///
/// Serves until Ctrl-C, then closes the database.
pub async fn start_server(config: Config) -> Result<()> {
    init_tracing();

    tracing::info!("Starting presentation builder store...");

    let store = open_store(&config).await?;
    let app = create_app(store.clone());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown requested");
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
