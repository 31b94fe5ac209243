// ---------------------------------------------------------------------------
// Demo dataset
// ---------------------------------------------------------------------------
//
// Served when no scan has run yet. Risk scores are computed from the same
// weight table as live findings so the demo rows obey the same invariants.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use agentwatch_intel::risk_score;
use agentwatch_types::{Finding, Location};

fn demo(ip: &str, port: u16, city: &str, country: &str, service: &str, vulns: &[&str]) -> Finding {
    let tags: BTreeSet<String> = vulns.iter().map(|v| v.to_string()).collect();
    let score = risk_score(tags.iter().map(String::as_str));
    Finding {
        ip: ip.into(),
        port,
        location: Location {
            city: Some(city.into()),
            country: Some(country.into()),
            latitude: None,
            longitude: None,
        },
        vulns: tags,
        risk_score: score,
        service: service.into(),
        timestamp: Utc::now().to_rfc3339(),
        service_info: BTreeMap::new(),
    }
}

/// Fixed demo findings shown before the first scan persists real results.
pub fn demo_findings() -> Vec<Finding> {
    vec![
        demo(
            "192.168.1.100",
            3000,
            "Tel Aviv",
            "Israel",
            "Web UI",
            &["exposed_api", "no_auth"],
        ),
        demo(
            "10.0.0.55",
            3000,
            "New York",
            "United States",
            "Web UI",
            &["default_creds", "exposed_terminal"],
        ),
        demo(
            "172.16.0.23",
            8080,
            "Berlin",
            "Germany",
            "Web UI",
            &["outdated_version"],
        ),
        demo(
            "185.220.101.42",
            18789,
            "Frankfurt",
            "Germany",
            "Gateway",
            &["exposed_api", "http_only"],
        ),
        demo(
            "91.207.174.23",
            18791,
            "Moscow",
            "Russia",
            "Browser control",
            &["gateway_exposed"],
        ),
    ]
}
