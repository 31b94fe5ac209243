// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

use std::path::PathBuf;

use agentwatch_forecast::ForecastClient;
use agentwatch_probe::Fingerprinter;
use agentwatch_search::{Credentials, Scanner};
use agentwatch_store::FindingStore;

/// Global application state for the API server.
pub struct AppState {
    /// Persisted findings (JSON file, demo fallback when absent).
    pub store: FindingStore,
    /// Search + fingerprint pipeline. Holds the credentials, if any.
    pub scanner: Scanner,
    /// Fingerprinter for the manual single-host endpoint.
    pub fingerprinter: Fingerprinter,
    /// Forecast API client.
    pub forecast: ForecastClient,
}

impl AppState {
    pub fn new(results_path: PathBuf, credentials: Option<Credentials>) -> Self {
        Self::with_components(
            FindingStore::new(results_path),
            Scanner::new(credentials),
            ForecastClient::new(),
        )
    }

    /// Assemble state from pre-built components (used by tests to inject
    /// mock endpoints and temp stores).
    pub fn with_components(store: FindingStore, scanner: Scanner, forecast: ForecastClient) -> Self {
        Self {
            store,
            scanner,
            fingerprinter: Fingerprinter::new(),
            forecast,
        }
    }
}
