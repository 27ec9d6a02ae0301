//! Session listing source: the set of already-known incidents loaded at
//! startup. Backed by a JSON snapshot file; a missing or unreadable snapshot
//! is non-fatal and simply yields an empty collection.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::incident::IncidentRecord;

pub const DEFAULT_SNAPSHOT_PATH: &str = "config/incidents.json";
pub const ENV_SNAPSHOT_PATH: &str = "INCIDENTS_SNAPSHOT_PATH";

/// Load a snapshot from an explicit path.
pub fn load_snapshot_from(path: &Path) -> Result<Vec<IncidentRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading incident snapshot from {}", path.display()))?;
    let records: Vec<IncidentRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing incident snapshot at {}", path.display()))?;
    Ok(records)
}

/// Load the session seed: $INCIDENTS_SNAPSHOT_PATH, then the default path.
/// Any failure is logged and degrades to an empty starting collection.
pub fn load_snapshot_default() -> Vec<IncidentRecord> {
    let path = std::env::var(ENV_SNAPSHOT_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

    if !path.exists() {
        return Vec::new();
    }
    match load_snapshot_from(&path) {
        Ok(records) => {
            tracing::info!(count = records.len(), path = %path.display(), "seeded incidents from snapshot");
            records
        }
        Err(e) => {
            tracing::warn!(error = ?e, "incident snapshot unreadable; starting empty");
            Vec::new()
        }
    }
}
