use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use agentwatch_types::Location;

use crate::SearchError;

/// Production API endpoint. Tests point at a local mock.
pub const DEFAULT_BASE_URL: &str = "https://search.censys.io";

/// Maximum hits requested per query.
const PER_PAGE: usize = 50;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Basic-auth credential pair for the search API. Always passed in
/// explicitly; the client never reads process environment itself.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_id: String,
    pub api_secret: String,
}

/// One host hit as returned by the search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub ip: String,
    #[serde(default)]
    pub location: HitLocation,
    #[serde(default)]
    pub services: Vec<HitService>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitService {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub service_name: Option<String>,
}

impl From<HitLocation> for Location {
    fn from(loc: HitLocation) -> Self {
        let coords = loc.coordinates.unwrap_or_default();
        Location {
            city: loc.city,
            country: loc.country,
            latitude: coords.latitude,
            longitude: coords.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: SearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

/// HTTP client for the Censys v2 hosts-search endpoint.
pub struct CensysClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl CensysClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Run one search query and return its hits.
    ///
    /// 401 maps to [`SearchError::AuthFailed`]; any other non-200 status,
    /// transport error, or decode failure maps to its own variant so the
    /// caller can decide which failures abort and which degrade.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!(
            "{}/api/v2/hosts/search?q={}&per_page={}",
            self.base_url, query, PER_PAGE
        );

        let resp = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.api_id, Some(&self.credentials.api_secret))
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(SearchError::AuthFailed);
        }
        if !resp.status().is_success() {
            return Err(SearchError::Status(resp.status().as_u16()));
        }

        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(body.result.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_deserializes_with_missing_fields() {
        let json = r#"{"ip":"203.0.113.9"}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.ip, "203.0.113.9");
        assert!(hit.services.is_empty());
        assert!(hit.location.country.is_none());
    }

    #[test]
    fn hit_location_converts_to_location() {
        let json = r#"{
            "ip": "203.0.113.9",
            "location": {
                "city": "Frankfurt",
                "country": "Germany",
                "coordinates": {"latitude": 50.1, "longitude": 8.7}
            },
            "services": [{"port": 3000, "service_name": "HTTP"}]
        }"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        let loc: Location = hit.location.into();
        assert_eq!(loc.city.as_deref(), Some("Frankfurt"));
        assert_eq!(loc.latitude, Some(50.1));
    }
}
