// ---------------------------------------------------------------------------
// Route registration
// ---------------------------------------------------------------------------

mod findings;
mod forecast;
mod intel;
mod scan;
mod system;

pub(crate) use findings::compute_stats;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::pages;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    // The API is read-mostly and unauthenticated; allow any origin so other
    // dashboards can embed the JSON endpoints.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(pages::dashboard))
        .route("/surf", get(pages::surf))
        .route("/api/health", get(system::health_check))
        .route("/api/results", get(findings::results))
        .route("/api/stats", get(findings::stats))
        .route("/api/scan", post(scan::run_scan))
        .route("/api/fingerprint", get(scan::fingerprint_host))
        .route("/api/debug/search", get(scan::debug_search))
        .route("/api/intel", get(intel::report))
        .route("/api/surf/forecast", get(forecast::forecast))
        .route("/api/surf/multi-day", get(forecast::multi_day))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(64 * 1024)) // no endpoint takes a large body
        .with_state(state)
}
