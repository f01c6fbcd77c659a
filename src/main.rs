use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoominfo_relay::app::build_router;
use zoominfo_relay::config::Config;
use zoominfo_relay::handlers::AppState;

/// Main entry point for the relay server.
///
/// Initializes tracing, loads the configuration (missing ZoomInfo
/// credentials abort startup), builds the shared state and serves the
/// router until Ctrl+C.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zoominfo_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let port = config.port;
    tracing::info!("Enrich profile: {:?}", config.enrich_profile);

    let app_state = Arc::new(AppState::new(&config)?);
    tracing::info!("✓ ZoomInfo relay initialized");

    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
