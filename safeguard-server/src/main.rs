//! HTTP boundary for the safety-aware routing engine.
//!
//! Loads the road network once at startup, then serves planning requests
//! that re-read the point/report documents and build a fresh hazard overlay
//! per cycle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::BoxError;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use clap::Parser;
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod routes;
mod store;

use config::ServerConfig;
use routes::AppState;
use store::DocumentStore;

#[derive(Parser, Debug)]
#[command(about = "Safety-aware shortest-route server")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "safeguard.toml")]
    config: PathBuf,
    /// Override the listen address from the configuration
    #[arg(long)]
    listen: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_file(&cli.config)?;
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    let network = safeguard_core::loading::create_road_network(&config.network_snapshot)?;
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "road network loaded"
    );

    let state = AppState {
        network: Arc::new(network),
        store: DocumentStore::new(config.points_path.clone(), config.reports_path.clone()),
        planning: config.planning.clone().into(),
    };

    let app = routes::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            // The mobile clients call from arbitrary origins
            .layer(CorsLayer::permissive())
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(ConcurrencyLimitLayer::new(config.max_in_flight))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            ))),
    );

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("listening on {}", config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// The bidirectional search has no step cap, so the whole request carries a
/// deadline instead; everything past it is a 408.
async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            "planning request timed out".to_string(),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("internal error: {err}"),
        )
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {err}");
    }
    info!("shutting down");
}
