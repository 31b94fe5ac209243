// ---------------------------------------------------------------------------
// Host search
// ---------------------------------------------------------------------------
//
// Queries the Censys host-search API for candidates on the product's fixed
// ports, fingerprints each unique address, and assembles scored findings.

mod censys;
mod scanner;

pub use censys::{
    CensysClient, Coordinates, Credentials, HitLocation, HitService, SearchHit, DEFAULT_BASE_URL,
};
pub use scanner::{adjust_tags, Scanner, SEARCH_QUERIES};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// No credentials were provided; the search cannot start.
    #[error("search API credentials are not configured")]
    MissingCredentials,
    /// The API answered 401. Aborts the whole search: every remaining query
    /// would fail the same way.
    #[error("search API rejected the credentials")]
    AuthFailed,
    #[error("search API returned status {0}")]
    Status(u16),
    #[error("search request failed: {0}")]
    Request(String),
    #[error("search response decode failed: {0}")]
    Decode(String),
}
