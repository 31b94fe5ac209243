// ---------------------------------------------------------------------------
// Forecast routes
// ---------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use agentwatch_forecast::{analyze_days, best_hour, score_hours};
use agentwatch_types::{DayForecast, ScoredHour};

use crate::error::ApiError;
use crate::state::AppState;

/// Days fetched for the hourly forecast view.
const FORECAST_DAYS: u8 = 2;
/// Default and maximum span of the multi-day view.
const MULTI_DAY_DEFAULT: u8 = 3;
const MULTI_DAY_MAX: u8 = 7;

fn parse_coords(params: &HashMap<String, String>) -> Result<(f64, f64), ApiError> {
    let lat: f64 = params
        .get("lat")
        .ok_or_else(|| ApiError::BadRequest("missing 'lat' parameter".into()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("'lat' must be a number".into()))?;
    let lon: f64 = params
        .get("lon")
        .ok_or_else(|| ApiError::BadRequest("missing 'lon' parameter".into()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("'lon' must be a number".into()))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::BadRequest("'lat' out of range [-90, 90]".into()));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::BadRequest("'lon' out of range [-180, 180]".into()));
    }
    Ok((lat, lon))
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub best_time: Option<ScoredHour>,
    pub hours: Vec<ScoredHour>,
}

/// GET /api/surf/forecast?lat=&lon=
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let (lat, lon) = parse_coords(&params)?;
    let samples = state.forecast.fetch_hourly(lat, lon, FORECAST_DAYS).await?;

    Ok(Json(ForecastResponse {
        latitude: lat,
        longitude: lon,
        best_time: best_hour(&samples),
        hours: score_hours(&samples),
    }))
}

#[derive(Debug, Serialize)]
pub struct MultiDayResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub days: Vec<DayForecast>,
    pub best_day: Option<DayForecast>,
}

/// GET /api/surf/multi-day?lat=&lon=&days=
pub async fn multi_day(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MultiDayResponse>, ApiError> {
    let (lat, lon) = parse_coords(&params)?;
    let days: u8 = match params.get("days") {
        Some(raw) => raw
            .parse()
            .ok()
            .filter(|d| (1..=MULTI_DAY_MAX).contains(d))
            .ok_or_else(|| {
                ApiError::BadRequest(format!("'days' must be in [1, {MULTI_DAY_MAX}]"))
            })?,
        None => MULTI_DAY_DEFAULT,
    };

    let samples = state.forecast.fetch_hourly(lat, lon, days).await?;
    let ranked = analyze_days(&samples);

    Ok(Json(MultiDayResponse {
        latitude: lat,
        longitude: lon,
        best_day: ranked.first().cloned(),
        days: ranked,
    }))
}
