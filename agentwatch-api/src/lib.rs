// ---------------------------------------------------------------------------
// Dashboard HTTP server
// ---------------------------------------------------------------------------
//
// Serves the findings API, the intel report, the forecast endpoints, and the
// two server-rendered pages.

pub mod error;
mod pages;
mod routes;
pub mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agentwatch_search::Credentials;
use state::AppState;
use tracing::{info, warn};

/// Configuration for the API server.
pub struct ApiConfig {
    pub listen_addr: SocketAddr,
    /// Path of the persisted findings file.
    pub results_path: PathBuf,
    /// Search API credentials; `None` leaves scan endpoints answering 503.
    pub credentials: Option<Credentials>,
    /// Re-run the search on this interval. `None` disables periodic scans.
    pub rescan_interval: Option<Duration>,
}

/// Build the axum Router (useful for testing).
pub fn build_router(state: Arc<AppState>) -> axum::Router {
    routes::build_router(state)
}

/// Start the API server and block until shutdown (Ctrl+C).
pub async fn start_server(config: ApiConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.results_path, config.credentials));

    if let Some(interval) = config.rescan_interval {
        spawn_rescan_task(state.clone(), interval);
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server shut down");
    Ok(())
}

/// Periodically re-run the search and persist the results.
///
/// Runs are not guarded against overlap: a slow scan can still be in flight
/// when the next tick fires, and whichever finishes last wins the store
/// write.
fn spawn_rescan_task(state: Arc<AppState>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // the first tick fires immediately; skip it
        loop {
            ticker.tick().await;
            match state.scanner.search().await {
                Ok(findings) => {
                    info!(count = findings.len(), "periodic scan complete");
                    if let Err(e) = state.store.save(&findings) {
                        warn!(error = %e, "periodic scan failed to save results");
                    }
                }
                Err(e) => warn!(error = %e, "periodic scan failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
