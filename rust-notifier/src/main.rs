//! PostalNotify Web Server - Postal webhook receiver.
//!
//! This binary provides a thin web server that:
//! - Receives webhook callbacks from a Postal mail server
//! - Renders each event into a markdown notification
//! - Pushes the notification to Gotify
//!
//! Each request is handled independently; decode and formatting are pure
//! in-memory transformations over the request body.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use postal_notify::web::{health, postal_webhook, AppState};
use postal_notify::{Config, Notifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        gotify_url = %config.gotify_url,
        gotify_token_configured = !config.gotify_token.is_empty(),
        link_defaults_configured = config.default_link_context().is_some(),
        verbose = config.verbose,
        "config_loaded"
    );

    // Create Gotify push client
    let notifier = Notifier::new(
        &config.gotify_url,
        &config.gotify_token,
        config.request_timeout_ms,
    )
    .context("Failed to create Gotify client")?;
    info!("gotify_client_created");

    // Create application state
    let state = AppState::new(config.clone(), notifier);

    // Build the router
    let app = Router::new()
        .route("/health", get(health))
        .route("/webhooks/postal", post(postal_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

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

    info!("web_server_shutting_down");
}
