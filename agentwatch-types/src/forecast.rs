use serde::{Deserialize, Serialize};

/// One hour of combined marine + weather forecast data.
///
/// Values are zipped out of the upstream API's parallel arrays; a missing
/// (null) value defaults to 0.0 so an incomplete hour still scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlySample {
    /// Local ISO 8601 timestamp, e.g. "2026-08-07T14:00".
    pub time: String,
    /// Wave height in meters.
    pub wave_height: f64,
    /// Wave direction in degrees.
    pub wave_direction: f64,
    /// Wave period in seconds.
    pub wave_period: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_direction: f64,
}

/// An hourly sample with its heuristic activity score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredHour {
    #[serde(flatten)]
    pub sample: HourlySample,
    pub score: i32,
}

/// One calendar day reduced to its rideable-conditions summary.
#[derive(Debug, Clone, Serialize)]
pub struct DayForecast {
    /// ISO date, e.g. "2026-08-07".
    pub date: String,
    /// Hours with wind in [10, 40] km/h during daylight ([6, 19] local).
    pub good_hours: u32,
    pub min_wind: f64,
    pub max_wind: f64,
    pub mean_wind: f64,
    pub score: i32,
}
