//! Orders API server.
//!
//! Serves the health check and order CRUD routes, and publishes the id of
//! every created order to the payments and notifications queues.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::ServiceExt;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orders::{build_app, AppState, Config, InMemoryOrderService, QueuePublisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("orders_api_starting");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        bind_address = %config.bind_address,
        port = config.port,
        queue_connection_configured = config.queue_connection_string.is_some(),
        "config_loaded"
    );

    // A missing connection string is fatal
    let publisher =
        QueuePublisher::from_config(&config).context("Failed to create queue publisher")?;

    let state = AppState::new(Arc::new(InMemoryOrderService::new()), publisher.clone());
    let app = build_app(state);

    let addr = SocketAddr::new(config.bind_address, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "orders_api_listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    publisher.close().await;

    info!("orders_api_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
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
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("orders_api_shutting_down");
}
