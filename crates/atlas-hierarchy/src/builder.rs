//! Hierarchy assembly.
//!
//! The builder validates the batch, runs the grouping engine, the
//! cross-reference detector, and the statistics aggregator, and composes
//! their outputs into one immutable [`Hierarchy`]. Construction is
//! all-or-nothing: one malformed record fails the whole batch.

use std::fs;
use std::path::Path;

use atlas_types::{RepoSnapshot, Repository};
use serde::Serialize;
use tracing::info;

use crate::crossref::{detect_connections, TopicConnection};
use crate::error::HierarchyError;
use crate::group::{group_records, LanguageGroups, TopicGroups};
use crate::stats::{aggregate_stats, Stats};

/// Complete hierarchy output.
///
/// Field names and nesting are a compatibility contract with downstream
/// consumers; they match the persisted JSON exactly. Consumers treat
/// every field as read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Hierarchy {
    /// Topic name -> group, first-insertion order
    pub topics: TopicGroups,
    /// The input batch, unmodified and in input order
    pub all_repositories: Vec<Repository>,
    /// Multi-topic cross-references, input order
    pub topic_connections: Vec<TopicConnection>,
    /// Language name -> records, first-insertion order
    pub languages: LanguageGroups,
    /// Aggregate statistics
    pub stats: Stats,
}

impl Hierarchy {
    /// Write the hierarchy as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), HierarchyError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "Saved hierarchy data");
        Ok(())
    }
}

/// Builds the hierarchy from a batch of repository records.
pub struct HierarchyBuilder {
    repositories: Vec<Repository>,
}

impl HierarchyBuilder {
    /// Create a builder over an in-memory batch.
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self { repositories }
    }

    /// Create a builder from a fetched snapshot envelope.
    pub fn from_snapshot(snapshot: RepoSnapshot) -> Self {
        Self::new(snapshot.repositories)
    }

    /// Load a snapshot file written by the repository source.
    pub fn from_json_file(path: &Path) -> Result<Self, HierarchyError> {
        let data = fs::read_to_string(path)?;
        let snapshot: RepoSnapshot = serde_json::from_str(&data)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// The batch this builder operates on.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Build the complete hierarchy.
    ///
    /// Deterministic given input order; building twice over the same
    /// batch serializes byte-identically.
    pub fn build(&self) -> Result<Hierarchy, HierarchyError> {
        validate_records(&self.repositories)?;

        let (topics, languages) = group_records(&self.repositories);
        let topic_connections = detect_connections(&self.repositories);
        let stats = aggregate_stats(&self.repositories, &topics, &languages);

        Ok(Hierarchy {
            topics,
            all_repositories: self.repositories.clone(),
            topic_connections,
            languages,
            stats,
        })
    }
}

/// Reject the batch when any record has an empty mandatory field.
fn validate_records(records: &[Repository]) -> Result<(), HierarchyError> {
    for (index, repo) in records.iter().enumerate() {
        let field = if repo.name.is_empty() {
            Some("name")
        } else if repo.url.is_empty() {
            Some("url")
        } else {
            None
        };
        if let Some(field) = field {
            return Err(HierarchyError::MalformedRecord {
                index,
                name: repo.name.clone(),
                field,
            });
        }
    }
    Ok(())
}
