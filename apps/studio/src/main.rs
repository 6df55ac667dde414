mod backend;
mod config;
mod editors;
mod errors;
mod import;
mod models;
mod panel;
mod render;
mod review;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::http::HttpBackend;
use crate::config::Config;
use crate::routes::build_router;
use crate::session::registry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume studio v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the resume service client
    let backend = HttpBackend::new(
        &config.backend_api_url,
        config.backend_api_token.clone(),
        config.review_timeout,
    )?;
    info!("Resume service client initialized ({})", config.backend_api_url);

    let settings = config.session_settings();
    info!(
        "Autosave after {}ms of quiet, reorder rollback {}",
        settings.debounce.as_millis(),
        if settings.rollback_failed_reorder { "on" } else { "off" }
    );

    let state = AppState::new(Arc::new(backend), settings);

    match config.session_idle_timeout {
        Some(idle) => {
            tokio::spawn(registry::run_sweeper(state.registry.clone(), idle));
            info!("Idle sessions close after {}s", idle.as_secs());
        }
        None => info!("Idle session expiry disabled"),
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
