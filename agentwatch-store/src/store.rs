use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use agentwatch_types::Finding;

use crate::demo::demo_findings;
use crate::error::StoreError;

/// Default location of the results file, relative to the working directory.
pub const DEFAULT_RESULTS_PATH: &str = "data/results.json";

/// Findings persisted as one JSON array, overwritten wholesale on each
/// successful scan. Concurrent writers are not coordinated; the last write
/// wins.
pub struct FindingStore {
    path: PathBuf,
}

impl FindingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(DEFAULT_RESULTS_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted findings.
    ///
    /// A missing file is not an error: the bundled demo dataset is returned
    /// instead so the dashboard renders before the first scan. A present but
    /// unreadable or corrupt file is an error.
    pub fn load(&self) -> Result<Vec<Finding>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no results file, serving demo dataset");
            return Ok(demo_findings());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace the stored findings.
    pub fn save(&self, findings: &[Finding]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(findings)?)?;
        info!(count = findings.len(), path = %self.path.display(), "results saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    use agentwatch_types::Location;

    fn finding(ip: &str) -> Finding {
        Finding {
            ip: ip.into(),
            port: 3000,
            location: Location::default(),
            vulns: BTreeSet::from(["no_auth".to_string()]),
            risk_score: 75,
            service: "Web UI".into(),
            timestamp: "2026-08-07T10:00:00Z".into(),
            service_info: BTreeMap::new(),
        }
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FindingStore::new(dir.path().join("results.json"));

        store.save(&[finding("10.0.0.1"), finding("10.0.0.2")]).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].ip, "10.0.0.1");
    }

    #[test]
    fn missing_file_falls_back_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let store = FindingStore::new(dir.path().join("nope.json"));

        let loaded = store.load().unwrap();
        assert!(!loaded.is_empty());
        assert_eq!(loaded.len(), demo_findings().len());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FindingStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FindingStore::new(dir.path().join("nested/deep/results.json"));

        store.save(&[finding("10.0.0.3")]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = FindingStore::new(dir.path().join("results.json"));

        store.save(&[finding("10.0.0.1"), finding("10.0.0.2")]).unwrap();
        store.save(&[finding("10.0.0.3")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].ip, "10.0.0.3");
    }
}
