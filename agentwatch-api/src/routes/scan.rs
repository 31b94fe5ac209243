// ---------------------------------------------------------------------------
// Scan routes: trigger, manual fingerprint, debug search
// ---------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use agentwatch_probe::Fingerprint;
use agentwatch_search::SearchHit;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: String,
    pub total_found: usize,
}

/// POST /api/scan: run a full search synchronously and persist the results.
///
/// Deliberately not serialized against the periodic rescan task: concurrent
/// runs both complete and the last store write wins.
pub async fn run_scan(State(state): State<Arc<AppState>>) -> Result<Json<ScanResponse>, ApiError> {
    let findings = state.scanner.search().await?;
    state.store.save(&findings)?;
    info!(total = findings.len(), "manual scan complete");
    Ok(Json(ScanResponse {
        status: "completed".into(),
        total_found: findings.len(),
    }))
}

/// GET /api/fingerprint?host=&port=: fingerprint one address on demand.
pub async fn fingerprint_host(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Fingerprint>, ApiError> {
    let host = params
        .get("host")
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing 'host' parameter".into()))?;
    let port: u16 = params
        .get("port")
        .ok_or_else(|| ApiError::BadRequest("missing 'port' parameter".into()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("'port' must be a port number".into()))?;

    let fp = state.fingerprinter.identify(host, port).await;
    Ok(Json(fp))
}

#[derive(Debug, Serialize)]
pub struct DebugQueryHits {
    pub query: u16,
    pub hits: Vec<SearchHit>,
}

/// GET /api/debug/search: raw per-query hits, no dedup, no fingerprinting.
pub async fn debug_search(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DebugQueryHits>>, ApiError> {
    let raw = state.scanner.raw_search().await?;
    Ok(Json(
        raw.into_iter()
            .map(|(query, hits)| DebugQueryHits { query, hits })
            .collect(),
    ))
}
