//! # atlas-hierarchy
//!
//! Hierarchy derivation and classification over repository records.
//!
//! Turns an unordered batch of [`Repository`](atlas_types::Repository)
//! records into topic groups, language groups, multi-topic
//! cross-references, and aggregate statistics, assembled into one
//! immutable [`Hierarchy`]. A keyword [`Classifier`] independently maps
//! each record to a product category and a difficulty tier for
//! presentation-side use.
//!
//! The whole pipeline is a pure, single-pass, deterministic
//! transformation: given the same batch in the same order, the built
//! hierarchy serializes byte-identically.

pub mod builder;
pub mod classify;
pub mod crossref;
pub mod error;
pub mod group;
pub mod stats;

pub use builder::{Hierarchy, HierarchyBuilder};
pub use classify::{CategoryRule, Classification, Classifier, TierRule, CATEGORY_NONE};
pub use crossref::{detect_connections, TopicConnection};
pub use error::HierarchyError;
pub use group::{
    group_records, LanguageGroup, LanguageGroups, TopicGroup, TopicGroups, UNCATEGORIZED,
    UNKNOWN_LANGUAGE,
};
pub use stats::{aggregate_stats, RankedEntry, Stats};
