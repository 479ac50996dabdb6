//! Snapshot persistence for fetched batches.

use std::fs;
use std::path::Path;

use atlas_types::{RepoSnapshot, Repository};
use tracing::info;

use crate::error::SourceError;

/// Write a fetched batch as a pretty-printed snapshot file, creating
/// parent directories as needed. Returns the stamped envelope.
pub fn save_snapshot(repositories: Vec<Repository>, path: &Path) -> Result<RepoSnapshot, SourceError> {
    let snapshot = RepoSnapshot::new(repositories);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)?;

    info!(
        count = snapshot.total_count,
        path = %path.display(),
        "Saved repository snapshot"
    );
    Ok(snapshot)
}
