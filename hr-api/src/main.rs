//! hr-api: HR administration service
//!
//! Long-running HTTP service that:
//! - Manages the Location → Department → Employee graph
//! - Guards every mutation with cross-entity integrity checks
//! - Gates the API behind cookie sessions issued at `/login`

mod api;
mod auth;
mod config;
mod db;
mod error;
mod guard;
mod logger;
mod state;
mod validation;

use std::net::SocketAddr;
use std::time::Duration;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(config.log_dir.as_deref());

    tracing::info!("Starting hr-api (env: {})", config.environment);

    // Store is ready (or startup failed) before the listener binds
    let state = AppState::new(config).await?;
    let app = api::create_router(state.clone());

    // Periodic session purge and rate limiter cleanup (every 5 minutes)
    let sessions = state.sessions.clone();
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::debug!(purged = n, "Expired sessions removed"),
                Err(e) => tracing::warn!(error = %e, "Session purge failed"),
            }
            rate_limiter.cleanup().await;
        }
    });

    let http_addr = format!("0.0.0.0:{}", state.config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("hr-api HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("hr-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
