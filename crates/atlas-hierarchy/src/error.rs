//! Hierarchy error types.

use thiserror::Error;

/// Errors that can occur while building a hierarchy.
///
/// Hierarchy construction is all-or-nothing: a single malformed record
/// aborts the whole batch, and no partial hierarchy is produced.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// A record is missing a mandatory field
    #[error("malformed record at index {index} (name {name:?}): empty required field `{field}`")]
    MalformedRecord {
        /// Position of the record in the input batch
        index: usize,
        /// Record name, possibly empty when the name itself is missing
        name: String,
        /// The mandatory field that was empty
        field: &'static str,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
