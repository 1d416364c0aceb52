/// Presentation builder project store
///
/// Entry point for the local service the desktop UI talks to.

use presentation_builder::{config::Config, server::start_server};

/// Application entry point
///
/// Loads configuration from the environment and serves:
/// - Project API at /api/projects
/// - Database inspector at /api/db/tables
/// - Health check at /healthz
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
