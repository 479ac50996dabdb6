//! Repository record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository's descriptive metadata, the atomic unit the hierarchy
/// core processes.
///
/// `name` and `url` are mandatory; every other field falls back to an
/// empty/zero default so a sparse record never fails on its own. Records
/// are created by the repository source and never mutated downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name, unique within a batch
    pub name: String,
    /// Owner-qualified name (e.g., "acme/widget")
    #[serde(default)]
    pub full_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical web URL
    pub url: String,
    /// Topic labels in the order the source reported them
    #[serde(default)]
    pub topics: Vec<String>,
    /// Primary language, if the source detected one
    #[serde(default)]
    pub language: Option<String>,
    /// Stargazer count
    #[serde(default)]
    pub stars: u64,
    /// Fork count
    #[serde(default)]
    pub forks: u64,
    /// Last update timestamp as reported by the source
    #[serde(default)]
    pub updated_at: String,
    /// Whether the repository is archived
    #[serde(default)]
    pub archived: bool,
    /// Whether the repository is itself a fork
    #[serde(default)]
    pub is_fork: bool,
}

impl Repository {
    /// Create a record with mandatory fields only.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: String::new(),
            description: None,
            url: url.into(),
            topics: Vec::new(),
            language: None,
            stars: 0,
            forks: 0,
            updated_at: String::new(),
            archived: false,
            is_fork: false,
        }
    }

    /// Set topic labels.
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    /// Set the primary language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set star and fork counts.
    pub fn with_counts(mut self, stars: u64, forks: u64) -> Self {
        self.stars = stars;
        self.forks = forks;
        self
    }
}

/// Persisted envelope for a fetched batch of records.
///
/// This is the on-disk contract between the repository source and the
/// hierarchy builder. `fetched_at` is absent in snapshots written by
/// older versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// The fetched records, source order preserved
    pub repositories: Vec<Repository>,
    /// Record count at fetch time
    pub total_count: usize,
    /// When the snapshot was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RepoSnapshot {
    /// Wrap a batch of records, stamping the current time.
    pub fn new(repositories: Vec<Repository>) -> Self {
        let total_count = repositories.len();
        Self {
            repositories,
            total_count,
            fetched_at: Some(Utc::now()),
        }
    }
}
