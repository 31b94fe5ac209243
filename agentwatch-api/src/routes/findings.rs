// ---------------------------------------------------------------------------
// Findings routes: results + aggregate stats
// ---------------------------------------------------------------------------

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use agentwatch_types::Finding;

use crate::error::ApiError;
use crate::state::AppState;

/// A finding as served by the API: the stored record plus the
/// request-time-only exploitation-window label.
#[derive(Debug, Serialize)]
pub struct FindingOut {
    #[serde(flatten)]
    pub finding: Finding,
    pub time_to_compromise: &'static str,
}

impl From<Finding> for FindingOut {
    fn from(finding: Finding) -> Self {
        let time_to_compromise = finding.time_to_compromise();
        Self {
            finding,
            time_to_compromise,
        }
    }
}

/// GET /api/results
pub async fn results(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FindingOut>>, ApiError> {
    let findings = state.store.load()?;
    Ok(Json(findings.into_iter().map(FindingOut::from).collect()))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: usize,
    /// Findings with risk score above 70.
    pub high_risk: usize,
    pub avg_risk: f64,
    pub countries: Vec<String>,
    pub api_connected: bool,
}

/// GET /api/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let findings = state.store.load()?;
    Ok(Json(compute_stats(&findings, state.scanner.has_credentials())))
}

pub(crate) fn compute_stats(findings: &[Finding], api_connected: bool) -> StatsResponse {
    let total = findings.len();
    let high_risk = findings.iter().filter(|f| f.risk_score > 70).count();
    let sum: u64 = findings.iter().map(|f| u64::from(f.risk_score)).sum();
    let avg_risk = sum as f64 / total.max(1) as f64;

    let countries: BTreeSet<String> = findings
        .iter()
        .map(|f| {
            f.location
                .country
                .clone()
                .unwrap_or_else(|| "Unknown".to_string())
        })
        .collect();

    StatsResponse {
        total,
        high_risk,
        avg_risk,
        countries: countries.into_iter().collect(),
        api_connected,
    }
}
