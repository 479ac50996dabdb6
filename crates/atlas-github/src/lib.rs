//! # atlas-github
//!
//! GitHub implementation of the repository source.
//!
//! Fetches an organization's repositories page by page from the GitHub
//! REST API, maps them into [`Repository`](atlas_types::Repository)
//! records, and persists the snapshot envelope the hierarchy builder
//! consumes. Transient failures retry with exponential backoff; rate
//! limiting surfaces as a distinct error.

pub mod error;
pub mod snapshot;
pub mod source;

pub use error::SourceError;
pub use snapshot::save_snapshot;
pub use source::{GitHubSource, GitHubSourceConfig, RepositorySource};
