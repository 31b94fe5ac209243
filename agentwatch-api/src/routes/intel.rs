// ---------------------------------------------------------------------------
// Intel route
// ---------------------------------------------------------------------------

use axum::Json;

use agentwatch_intel::{build_discussions, build_report, BundledSource, IntelReport};

/// GET /api/intel: the aggregated security-discussion report. Rebuilt per
/// request from the bundled dataset.
pub async fn report() -> Json<IntelReport> {
    Json(build_report(build_discussions(&BundledSource)))
}
