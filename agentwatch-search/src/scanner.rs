use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use agentwatch_intel::risk_score;
use agentwatch_probe::{Fingerprinter, BROWSER_CONTROL_PORT, GATEWAY_PORT, WEB_UI_PORT};
use agentwatch_types::{tags, Finding};

use crate::censys::{CensysClient, Credentials, SearchHit};
use crate::SearchError;

/// Fixed search queries: one per product port, with the service label
/// attached to findings it surfaces.
pub const SEARCH_QUERIES: &[(u16, &str)] = &[
    (GATEWAY_PORT, "Gateway"),
    (WEB_UI_PORT, "Web UI"),
    (BROWSER_CONTROL_PORT, "Browser control"),
];

/// Runs the full discovery pass: search, dedup, fingerprint, score.
pub struct Scanner {
    client: Option<CensysClient>,
    fingerprinter: Fingerprinter,
}

impl Scanner {
    /// `credentials: None` produces a scanner whose searches fail with
    /// [`SearchError::MissingCredentials`], letting the server start
    /// unconfigured and report the condition per request.
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self::with_base_url(credentials, crate::censys::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Option<Credentials>, base_url: &str) -> Self {
        Self {
            client: credentials.map(|c| CensysClient::with_base_url(c, base_url)),
            fingerprinter: Fingerprinter::new(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.client.is_some()
    }

    /// Run all fixed queries and return verified findings.
    ///
    /// An auth failure on any query aborts the whole search. Any other
    /// per-query failure is logged and contributes zero hits; remaining
    /// queries still run. Hosts are deduplicated by IP across queries.
    pub async fn search(&self) -> Result<Vec<Finding>, SearchError> {
        let client = self
            .client
            .as_ref()
            .ok_or(SearchError::MissingCredentials)?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut findings = Vec::new();

        for &(query_port, label) in SEARCH_QUERIES {
            let hits = match client.search(&query_port.to_string()).await {
                Ok(hits) => hits,
                Err(SearchError::AuthFailed) => return Err(SearchError::AuthFailed),
                Err(e) => {
                    warn!(query = query_port, error = %e, "search query failed");
                    continue;
                }
            };

            info!(query = query_port, hits = hits.len(), "search query complete");

            for hit in hits {
                if !seen.insert(hit.ip.clone()) {
                    continue;
                }

                let port = hit
                    .services
                    .first()
                    .and_then(|s| s.port)
                    .unwrap_or(query_port);

                let fp = self.fingerprinter.identify(&hit.ip, port).await;
                if !fp.is_match {
                    continue;
                }

                let mut vulns = fp.vulns;
                adjust_tags(&mut vulns, &fp.service_info, port);
                let score = risk_score(vulns.iter().map(String::as_str));

                findings.push(Finding {
                    ip: hit.ip,
                    port,
                    location: hit.location.into(),
                    vulns,
                    risk_score: score,
                    service: label.to_string(),
                    timestamp: Utc::now().to_rfc3339(),
                    service_info: fp.service_info,
                });
            }
        }

        info!(total = findings.len(), "search complete");
        Ok(findings)
    }

    /// Raw per-query hits with no dedup and no fingerprinting. Backs the
    /// debug endpoint. Auth failures still abort; other failures yield an
    /// empty hit list for that query.
    pub async fn raw_search(&self) -> Result<Vec<(u16, Vec<SearchHit>)>, SearchError> {
        let client = self
            .client
            .as_ref()
            .ok_or(SearchError::MissingCredentials)?;

        let mut out = Vec::with_capacity(SEARCH_QUERIES.len());
        for &(query_port, _) in SEARCH_QUERIES {
            let hits = match client.search(&query_port.to_string()).await {
                Ok(hits) => hits,
                Err(SearchError::AuthFailed) => return Err(SearchError::AuthFailed),
                Err(e) => {
                    warn!(query = query_port, error = %e, "debug search query failed");
                    Vec::new()
                }
            };
            out.push((query_port, hits));
        }
        Ok(out)
    }
}

/// Post-fingerprint tag adjustment.
///
/// A gateway or browser-control signature found on a port other than the
/// product's default for that surface means the service is reachable
/// somewhere unexpected; the corresponding exposure tag is added on top of
/// whatever the probes reported.
pub fn adjust_tags(vulns: &mut BTreeSet<String>, service_info: &BTreeMap<String, Value>, port: u16) {
    if service_info.contains_key("gateway") && port != GATEWAY_PORT {
        vulns.insert(tags::GATEWAY_EXPOSED.to_string());
    }
    if service_info.contains_key("browser_control") && port != BROWSER_CONTROL_PORT {
        vulns.insert(tags::BROWSER_CONTROL_EXPOSED.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // -----------------------------------------------------------------------
    // mock servers
    // -----------------------------------------------------------------------

    /// Mock search API: maps query strings to canned hit arrays; unknown
    /// queries answer 500.
    async fn spawn_search_api(responses: HashMap<String, Value>) -> String {
        async fn handler(
            State(responses): State<Arc<HashMap<String, Value>>>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Result<Json<Value>, StatusCode> {
            let q = params.get("q").cloned().unwrap_or_default();
            match responses.get(&q) {
                Some(hits) => Ok(Json(serde_json::json!({"result": {"hits": hits}}))),
                None => Err(StatusCode::INTERNAL_SERVER_ERROR),
            }
        }

        let app = Router::new()
            .route("/api/v2/hosts/search", get(handler))
            .with_state(Arc::new(responses));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Mock search API that rejects every request with 401.
    async fn spawn_auth_failing_api() -> String {
        async fn handler() -> StatusCode {
            StatusCode::UNAUTHORIZED
        }
        let app = Router::new().route("/api/v2/hosts/search", get(handler));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Mock product install answering the health probe.
    async fn spawn_product_host() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let body = r#"{"status":"ok"}"#;
                    let response = if request.starts_with("GET /api/health ") {
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    } else {
                        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string()
                    };
                    let _ = stream.write_all(response.as_bytes()).await;
                });
            }
        });
        port
    }

    fn creds() -> Credentials {
        Credentials {
            api_id: "test-id".into(),
            api_secret: "test-secret".into(),
        }
    }

    fn hit_json(ip: &str, port: u16) -> Value {
        serde_json::json!({"ip": ip, "services": [{"port": port}]})
    }

    // -----------------------------------------------------------------------
    // tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn missing_credentials_short_circuits() {
        let scanner = Scanner::new(None);
        assert!(matches!(
            scanner.search().await,
            Err(SearchError::MissingCredentials)
        ));
        assert!(!scanner.has_credentials());
    }

    #[tokio::test]
    async fn auth_failure_aborts_whole_search() {
        let base = spawn_auth_failing_api().await;
        let scanner = Scanner::with_base_url(Some(creds()), &base);
        assert!(matches!(scanner.search().await, Err(SearchError::AuthFailed)));
    }

    #[tokio::test]
    async fn dedups_shared_address_across_queries() {
        let product_port = spawn_product_host().await;
        let base = spawn_search_api(HashMap::from([
            (
                "18789".to_string(),
                serde_json::json!([hit_json("127.0.0.1", product_port)]),
            ),
            (
                "3000".to_string(),
                serde_json::json!([hit_json("127.0.0.1", product_port)]),
            ),
            ("18791".to_string(), serde_json::json!([])),
        ]))
        .await;

        let scanner = Scanner::with_base_url(Some(creds()), &base);
        let findings = scanner.search().await.unwrap();

        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.ip, "127.0.0.1");
        assert_eq!(f.port, product_port);
        // First query to surface the host labels it.
        assert_eq!(f.service, "Gateway");
        assert!(f.vulns.contains("exposed_api"));
        // Gateway signature on a non-gateway port adds the exposure tag,
        // and the score reflects the adjusted set.
        assert!(f.vulns.contains("gateway_exposed"));
        assert_eq!(f.risk_score, 85);
    }

    #[tokio::test]
    async fn failed_query_degrades_to_zero_results() {
        let product_port = spawn_product_host().await;
        // "18789" is unknown to the mock and answers 500; the others work.
        let base = spawn_search_api(HashMap::from([
            (
                "3000".to_string(),
                serde_json::json!([hit_json("127.0.0.1", product_port)]),
            ),
            ("18791".to_string(), serde_json::json!([])),
        ]))
        .await;

        let scanner = Scanner::with_base_url(Some(creds()), &base);
        let findings = scanner.search().await.unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].service, "Web UI");
    }

    #[tokio::test]
    async fn non_matching_hosts_are_discarded() {
        // Nothing listens on the hit's port: fingerprint yields no signal.
        let dead = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead_port = dead.local_addr().unwrap().port();
        drop(dead);

        let base = spawn_search_api(HashMap::from([
            (
                "18789".to_string(),
                serde_json::json!([hit_json("127.0.0.1", dead_port)]),
            ),
            ("3000".to_string(), serde_json::json!([])),
            ("18791".to_string(), serde_json::json!([])),
        ]))
        .await;

        let scanner = Scanner::with_base_url(Some(creds()), &base);
        let findings = scanner.search().await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn hit_without_services_uses_query_port() {
        let base = spawn_search_api(HashMap::from([
            (
                "18789".to_string(),
                serde_json::json!([{"ip": "127.0.0.1"}]),
            ),
            ("3000".to_string(), serde_json::json!([])),
            ("18791".to_string(), serde_json::json!([])),
        ]))
        .await;

        // The probe goes to 127.0.0.1:18789 where nothing listens, so no finding;
        // this exercises the representative-port fallback without asserting
        // on probe results.
        let scanner = Scanner::with_base_url(Some(creds()), &base);
        let findings = scanner.search().await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn raw_search_returns_unfiltered_hits_per_query() {
        let base = spawn_search_api(HashMap::from([
            (
                "18789".to_string(),
                serde_json::json!([hit_json("203.0.113.1", 18789), hit_json("203.0.113.1", 18789)]),
            ),
            ("3000".to_string(), serde_json::json!([hit_json("203.0.113.2", 3000)])),
            ("18791".to_string(), serde_json::json!([])),
        ]))
        .await;

        let scanner = Scanner::with_base_url(Some(creds()), &base);
        let raw = scanner.raw_search().await.unwrap();

        assert_eq!(raw.len(), 3);
        // No dedup in the debug path.
        assert_eq!(raw[0].1.len(), 2);
        assert_eq!(raw[1].1.len(), 1);
        assert!(raw[2].1.is_empty());
    }

    #[test]
    fn adjust_tags_gateway_on_foreign_port() {
        let mut vulns = BTreeSet::new();
        let mut info = BTreeMap::new();
        info.insert("gateway".to_string(), Value::Bool(true));

        adjust_tags(&mut vulns, &info, 8080);
        assert!(vulns.contains("gateway_exposed"));

        // On the canonical port the probes already tagged it; no extra tag.
        let mut vulns = BTreeSet::new();
        adjust_tags(&mut vulns, &info, GATEWAY_PORT);
        assert!(vulns.is_empty());
    }

    #[test]
    fn adjust_tags_browser_control_on_foreign_port() {
        let mut vulns = BTreeSet::new();
        let mut info = BTreeMap::new();
        info.insert("browser_control".to_string(), Value::Bool(true));

        adjust_tags(&mut vulns, &info, WEB_UI_PORT);
        assert!(vulns.contains("browser_control_exposed"));
    }
}
