use std::time::Duration;

use serde_json::Value;
use tracing::debug;

/// Per-probe timeout. Candidates are random internet hosts; anything slower
/// than this is treated as no signal.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Fetch a URL and parse the body as JSON.
///
/// Returns `None` on any failure: transport error, non-2xx status, or a
/// body that is not JSON. Failures log at debug level only.
pub(crate) async fn fetch_json(client: &reqwest::Client, url: &str) -> Option<Value> {
    let resp = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!(url, error = %e, "probe request failed");
            return None;
        }
    };
    if !resp.status().is_success() {
        debug!(url, status = %resp.status(), "probe returned non-success");
        return None;
    }
    match resp.json().await {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(url, error = %e, "probe body was not valid JSON");
            None
        }
    }
}

/// Fetch a URL and return the body text of a 2xx response.
pub(crate) async fn fetch_text(client: &reqwest::Client, url: &str) -> Option<String> {
    let resp = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!(url, error = %e, "probe request failed");
            return None;
        }
    };
    if !resp.status().is_success() {
        debug!(url, status = %resp.status(), "probe returned non-success");
        return None;
    }
    match resp.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            debug!(url, error = %e, "probe body read failed");
            None
        }
    }
}

/// Fetch a URL, caring only whether it answered 2xx.
pub(crate) async fn fetch_ok(client: &reqwest::Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(r) if r.status().is_success() => true,
        Ok(r) => {
            debug!(url, status = %r.status(), "probe returned non-success");
            false
        }
        Err(e) => {
            debug!(url, error = %e, "probe request failed");
            false
        }
    }
}
