//! Gleaner REST API Server
//!
//! This binary serves the harvested record store over HTTP, exposing
//! endpoints for paging through users and listing their repositories.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use gleaner_db::SqliteStore;
use gleaner_server::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let config = ServerConfig::parse();

    // Open the record store
    info!("Opening record store at {}", config.db.display());
    let store = SqliteStore::open(&config.db)
        .await
        .context("Failed to open record store")?;
    info!("Record store ready");

    // Create application state
    let app_state = AppState::new(store);

    // Build router
    let app = create_router(app_state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid address")?;

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Starting Gleaner API server on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
