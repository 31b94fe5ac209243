use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use agentwatch_types::tags;

use crate::probe::{fetch_json, fetch_ok, fetch_text, PROBE_TIMEOUT};

/// Default gateway port of the target product.
pub const GATEWAY_PORT: u16 = 18789;
/// Default web UI port.
pub const WEB_UI_PORT: u16 = 3000;
/// Default browser-control port.
pub const BROWSER_CONTROL_PORT: u16 = 18791;

/// Product name markers looked for in the root page body.
const PRODUCT_MARKERS: &[&str] = &["clawdbot", "claude"];

/// Outcome of fingerprinting one address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Fingerprint {
    pub is_match: bool,
    pub vulns: BTreeSet<String>,
    pub service_info: BTreeMap<String, Value>,
}

/// Probes an address with a fixed sequence of HTTP requests and collects
/// whatever signals come back.
///
/// The match rule is deliberately loose: any probe signal at all counts as a
/// match, so a generic HTTP server answering 200 with a JSON `"ok"` body is
/// a known false positive. This mirrors the scoring pipeline's intent of
/// over-reporting rather than under-reporting and must not be tightened.
pub struct Fingerprinter {
    client: reqwest::Client,
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprinter {
    pub fn new() -> Self {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Run the probe sequence against `host:port`.
    ///
    /// Probes execute strictly one after another; each degrades silently to
    /// "no signal" on failure.
    pub async fn identify(&self, host: &str, port: u16) -> Fingerprint {
        let base = format!("http://{host}:{port}");
        let mut vulns: BTreeSet<String> = BTreeSet::new();
        let mut info: BTreeMap<String, Value> = BTreeMap::new();

        // Probe 1: gateway health endpoint.
        if let Some(body) = fetch_json(&self.client, &format!("{base}/api/health")).await {
            if body.get("status").and_then(Value::as_str) == Some("ok") {
                vulns.insert(tags::EXPOSED_API.to_string());
                info.insert("gateway".into(), Value::Bool(true));
            }
        }

        // Probe 2: status endpoint. Reported version plus auth state.
        if let Some(body) = fetch_json(&self.client, &format!("{base}/api/status")).await {
            let version = body
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            info.insert("version".into(), Value::String(version.to_string()));
            let auth_enabled = body
                .pointer("/auth/enabled")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if !auth_enabled {
                vulns.insert(tags::NO_AUTH.to_string());
            }
        }

        // Probe 3: root page. Product markers and a login check.
        if let Some(body) = fetch_text(&self.client, &base).await {
            let lower = body.to_lowercase();
            if PRODUCT_MARKERS.iter().any(|m| lower.contains(m)) {
                info.insert("web_ui".into(), Value::Bool(true));
                if !lower.contains("login") && !lower.contains("sign in") {
                    vulns.insert(tags::NO_AUTH.to_string());
                }
            }
        }

        // Probe 4: bare gateway health, only on the gateway port itself.
        if port == GATEWAY_PORT && fetch_ok(&self.client, &format!("{base}/health")).await {
            info.insert("gateway_direct".into(), Value::Bool(true));
            vulns.insert(tags::GATEWAY_EXPOSED.to_string());
        }

        // Probe 5: bare status, only on the browser-control port.
        if port == BROWSER_CONTROL_PORT && fetch_ok(&self.client, &format!("{base}/status")).await {
            info.insert("browser_control".into(), Value::Bool(true));
            vulns.insert(tags::BROWSER_CONTROL_EXPOSED.to_string());
        }

        let is_match = !info.is_empty();
        debug!(host, port, is_match, vulns = ?vulns, "fingerprint complete");

        Fingerprint {
            is_match,
            vulns,
            service_info: info,
        }
    }
}
