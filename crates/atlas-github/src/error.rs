//! Repository source error types.

use thiserror::Error;

/// Errors from the GitHub repository source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Client construction or request configuration error
    #[error("Source configuration error: {0}")]
    Config(String),

    /// HTTP transport or non-success status
    #[error("API error: {0}")]
    Api(String),

    /// GitHub rate limit hit (HTTP 403/429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Response body did not parse
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem error while persisting a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
