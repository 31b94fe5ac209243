use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use agentwatch_types::HourlySample;

use crate::ForecastError;

/// Default spot when the caller does not supply coordinates.
pub const DEFAULT_LATITUDE: f64 = 32.0853;
pub const DEFAULT_LONGITUDE: f64 = 34.7818;

const MARINE_BASE_URL: &str = "https://marine-api.open-meteo.com";
const WEATHER_BASE_URL: &str = "https://api.open-meteo.com";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Parallel hourly arrays as returned by Open-Meteo. Nulls deserialize to
/// `None` and default to 0.0 when zipped.
#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    wave_height: Vec<Option<f64>>,
    #[serde(default)]
    wave_direction: Vec<Option<f64>>,
    #[serde(default)]
    wave_period: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    wind_direction_10m: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    hourly: HourlyBlock,
}

/// Client for the Open-Meteo marine and weather APIs.
pub struct ForecastClient {
    client: reqwest::Client,
    marine_base: String,
    weather_base: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_urls(MARINE_BASE_URL, WEATHER_BASE_URL)
    }

    pub fn with_base_urls(marine_base: &str, weather_base: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            marine_base: marine_base.trim_end_matches('/').to_string(),
            weather_base: weather_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and merge hourly marine + wind series for a location.
    ///
    /// The weather series is the spine: one sample per wind timestamp, with
    /// wave values matched by index. A missing wave series (inland spots)
    /// yields zeros rather than an error.
    pub async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<HourlySample>, ForecastError> {
        let weather_url = format!(
            "{}/v1/forecast?latitude={latitude}&longitude={longitude}\
             &hourly=wind_speed_10m,wind_direction_10m&wind_speed_unit=kmh\
             &timezone=auto&forecast_days={days}",
            self.weather_base
        );
        let marine_url = format!(
            "{}/v1/marine?latitude={latitude}&longitude={longitude}\
             &hourly=wave_height,wave_direction,wave_period\
             &timezone=auto&forecast_days={days}",
            self.marine_base
        );

        let weather = self.fetch(&weather_url).await?;
        // Marine data is best-effort: plenty of valid coordinates have wind
        // but no wave model coverage.
        let marine = match self.fetch(&marine_url).await {
            Ok(m) => m,
            Err(e) => {
                debug!(error = %e, "marine fetch failed, continuing with wind only");
                HourlyBlock::default()
            }
        };

        let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten().unwrap_or(0.0);

        let samples = weather
            .time
            .iter()
            .enumerate()
            .map(|(i, time)| HourlySample {
                time: time.clone(),
                wind_speed: at(&weather.wind_speed_10m, i),
                wind_direction: at(&weather.wind_direction_10m, i),
                wave_height: at(&marine.wave_height, i),
                wave_direction: at(&marine.wave_direction, i),
                wave_period: at(&marine.wave_period, i),
            })
            .collect();

        Ok(samples)
    }

    async fn fetch(&self, url: &str) -> Result<HourlyBlock, ForecastError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ForecastError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ForecastError::Status(resp.status().as_u16()));
        }

        let body: ForecastResponse = resp
            .json()
            .await
            .map_err(|e| ForecastError::Decode(e.to_string()))?;
        Ok(body.hourly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    async fn spawn_meteo_mock() -> String {
        async fn weather() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "hourly": {
                    "time": ["2026-08-07T10:00", "2026-08-07T11:00", "2026-08-07T12:00"],
                    "wind_speed_10m": [18.0, null, 25.0],
                    "wind_direction_10m": [270.0, 280.0, 290.0]
                }
            }))
        }
        async fn marine() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "hourly": {
                    "time": ["2026-08-07T10:00", "2026-08-07T11:00", "2026-08-07T12:00"],
                    "wave_height": [0.2, 0.4, null],
                    "wave_direction": [300.0, 300.0, 310.0],
                    "wave_period": [8.0, 9.0, 11.0]
                }
            }))
        }

        let app = Router::new()
            .route("/v1/forecast", get(weather))
            .route("/v1/marine", get(marine));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_zips_parallel_arrays() {
        let base = spawn_meteo_mock().await;
        let client = ForecastClient::with_base_urls(&base, &base);

        let samples = client.fetch_hourly(32.0853, 34.7818, 1).await.unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].wind_speed, 18.0);
        assert_eq!(samples[0].wave_height, 0.2);
        // Nulls default to zero.
        assert_eq!(samples[1].wind_speed, 0.0);
        assert_eq!(samples[2].wave_height, 0.0);
        assert_eq!(samples[2].wave_period, 11.0);
    }

    #[tokio::test]
    async fn marine_failure_degrades_to_wind_only() {
        let base = spawn_meteo_mock().await;
        // Point marine at a URL that 404s; weather still works.
        let client = ForecastClient::with_base_urls(&format!("{base}/missing"), &base);

        let samples = client.fetch_hourly(32.0853, 34.7818, 1).await.unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].wave_height, 0.0);
        assert_eq!(samples[0].wind_speed, 18.0);
    }

    #[tokio::test]
    async fn weather_failure_is_an_error() {
        let base = spawn_meteo_mock().await;
        let client = ForecastClient::with_base_urls(&base, &format!("{base}/missing"));

        assert!(client.fetch_hourly(32.0853, 34.7818, 1).await.is_err());
    }
}
