//! Vulnerability tag names shared between the fingerprinter and the risk
//! scorer. The set is open-ended (unknown tags still score via a fallback
//! weight) but these are the ones the probes emit.

pub const EXPOSED_API: &str = "exposed_api";
pub const NO_AUTH: &str = "no_auth";
pub const GATEWAY_EXPOSED: &str = "gateway_exposed";
pub const BROWSER_CONTROL_EXPOSED: &str = "browser_control_exposed";
pub const EXPOSED_TERMINAL: &str = "exposed_terminal";
pub const OUTDATED_VERSION: &str = "outdated_version";
pub const DEFAULT_CREDS: &str = "default_creds";
pub const HTTP_ONLY: &str = "http_only";
