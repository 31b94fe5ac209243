// ---------------------------------------------------------------------------
// Forecast analysis
// ---------------------------------------------------------------------------
//
// Fetches hourly marine + wind forecasts and scores each hour and day for a
// wind-sport window using fixed heuristic rules.

mod analyzer;
mod api;

pub use analyzer::{analyze_day, analyze_days, best_hour, is_good_hour, score_hour, score_hours};
pub use api::{ForecastClient, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Request(String),
    #[error("forecast API returned status {0}")]
    Status(u16),
    #[error("forecast response decode failed: {0}")]
    Decode(String),
}
