//! # atlas-types
//!
//! Shared data model for org-atlas.
//!
//! This crate defines the repository record consumed by every downstream
//! component, the persisted snapshot envelope exchanged with the
//! repository source, layered configuration, and the unified error type.

pub mod config;
pub mod error;
pub mod record;

pub use config::Settings;
pub use error::AtlasError;
pub use record::{RepoSnapshot, Repository};
