use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Geolocation attached to a finding. All fields are optional; the search
/// API frequently omits city or coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// One verified candidate host: the address that was fingerprinted, the
/// vulnerability tags the probes produced, and the risk score derived from
/// them. Findings are immutable once written to the results store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub ip: String,
    pub port: u16,
    #[serde(default)]
    pub location: Location,
    /// Vulnerability tags. A set, not a list: probes may report the same
    /// tag through different paths.
    pub vulns: BTreeSet<String>,
    /// Heuristic risk score in [0, 100].
    pub risk_score: u8,
    /// Label of the search query that surfaced this host.
    pub service: String,
    /// RFC 3339 timestamp of when the finding was built.
    pub timestamp: String,
    /// Free-form probe metadata (version strings, surface flags).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_info: BTreeMap<String, serde_json::Value>,
}

impl Finding {
    /// Rough exploitation-window label derived from the risk score.
    /// Computed per request and never persisted.
    pub fn time_to_compromise(&self) -> &'static str {
        match self.risk_score {
            90..=100 => "minutes",
            70..=89 => "hours",
            50..=69 => "days",
            _ => "weeks",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_serde_roundtrip() {
        let mut vulns = BTreeSet::new();
        vulns.insert("no_auth".to_string());
        vulns.insert("exposed_api".to_string());

        let finding = Finding {
            ip: "203.0.113.50".into(),
            port: 3000,
            location: Location {
                city: Some("Frankfurt".into()),
                country: Some("Germany".into()),
                latitude: Some(50.11),
                longitude: Some(8.68),
            },
            vulns,
            risk_score: 90,
            service: "Web UI".into(),
            timestamp: "2026-08-07T10:00:00Z".into(),
            service_info: BTreeMap::new(),
        };

        let json = serde_json::to_string(&finding).unwrap();
        let back: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ip, "203.0.113.50");
        assert_eq!(back.vulns.len(), 2);
        assert_eq!(back.risk_score, 90);
    }

    #[test]
    fn empty_service_info_skipped_in_json() {
        let finding = Finding {
            ip: "198.51.100.7".into(),
            port: 18789,
            location: Location::default(),
            vulns: BTreeSet::new(),
            risk_score: 50,
            service: "Gateway".into(),
            timestamp: "2026-08-07T10:00:00Z".into(),
            service_info: BTreeMap::new(),
        };
        let json = serde_json::to_string(&finding).unwrap();
        assert!(!json.contains("service_info"));

        // Old JSON without location/service_info should deserialize cleanly
        let old = r#"{"ip":"10.0.0.1","port":3000,"vulns":[],"risk_score":50,
                      "service":"Web UI","timestamp":"2026-01-01T00:00:00Z"}"#;
        let parsed: Finding = serde_json::from_str(old).unwrap();
        assert!(parsed.location.country.is_none());
        assert!(parsed.service_info.is_empty());
    }

    #[test]
    fn time_to_compromise_buckets() {
        let mut f = Finding {
            ip: "10.0.0.1".into(),
            port: 3000,
            location: Location::default(),
            vulns: BTreeSet::new(),
            risk_score: 95,
            service: "Web UI".into(),
            timestamp: String::new(),
            service_info: BTreeMap::new(),
        };
        assert_eq!(f.time_to_compromise(), "minutes");
        f.risk_score = 75;
        assert_eq!(f.time_to_compromise(), "hours");
        f.risk_score = 55;
        assert_eq!(f.time_to_compromise(), "days");
        f.risk_score = 40;
        assert_eq!(f.time_to_compromise(), "weeks");
    }
}
