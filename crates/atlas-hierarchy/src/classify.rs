//! Keyword classification of records into a product category and a
//! difficulty tier.
//!
//! Matching is substring-based over the lowercased concatenation of name,
//! description, and topics. That is intentional: short keywords like
//! "chat" or "test" commonly appear inside longer words, and the matching
//! policy trades precision for simplicity. The rule lists are plain
//! configuration data, so a different policy (word-boundary matching, a
//! trained model) can replace this one without touching the grouping or
//! statistics code.

use atlas_types::Repository;
use serde::{Deserialize, Serialize};

/// Category label returned when no rule matches or the record is
/// excluded from classification.
pub const CATEGORY_NONE: &str = "none";

/// One product-category rule: the first rule (in list order) with any
/// keyword match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label
    pub label: String,
    /// Keywords matched as substrings
    pub keywords: Vec<String>,
}

/// One difficulty-tier rule, evaluated in list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierRule {
    /// Tier label
    pub label: String,
    /// Keywords matched as substrings
    pub keywords: Vec<String>,
}

/// Advisory labels for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Product category, or `"none"`
    pub category: String,
    /// Difficulty tier, always assigned
    pub difficulty: String,
}

/// Keyword classifier with fixed, ordered rule lists.
#[derive(Debug, Clone)]
pub struct Classifier {
    categories: Vec<CategoryRule>,
    tiers: Vec<TierRule>,
    excluded_names: Vec<String>,
}

impl Classifier {
    /// Create a classifier with explicit rule lists. Rule order is
    /// priority order.
    pub fn new(
        categories: Vec<CategoryRule>,
        tiers: Vec<TierRule>,
        excluded_names: Vec<String>,
    ) -> Self {
        Self {
            categories,
            tiers,
            excluded_names,
        }
    }

    /// Classify one record. Total and deterministic; records named in the
    /// exclusion list get category `"none"` regardless of keywords.
    pub fn classify(&self, repo: &Repository) -> Classification {
        let text = combined_text(repo);
        Classification {
            category: self.category_of(repo, &text),
            difficulty: self.difficulty_of(repo, &text),
        }
    }

    fn category_of(&self, repo: &Repository, text: &str) -> String {
        if self.excluded_names.iter().any(|n| n == &repo.name) {
            return CATEGORY_NONE.to_string();
        }
        self.categories
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| CATEGORY_NONE.to_string())
    }

    fn difficulty_of(&self, repo: &Repository, text: &str) -> String {
        if let Some(rule) = self
            .tiers
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
        {
            return rule.label.clone();
        }
        // No keyword hit: richer topic lists suggest more moving parts
        if repo.topics.len() > 2 {
            "intermediate".to_string()
        } else {
            "beginner".to_string()
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_categories(), default_tiers(), vec![".github".to_string()])
    }
}

/// Lowercased name + description + topics, space-joined.
fn combined_text(repo: &Repository) -> String {
    let mut parts = Vec::with_capacity(2 + repo.topics.len());
    parts.push(repo.name.clone());
    if let Some(desc) = &repo.description {
        parts.push(desc.clone());
    }
    parts.extend(repo.topics.iter().cloned());
    parts.join(" ").to_lowercase()
}

fn rule_keywords(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

/// Built-in category rules, priority order: observability before
/// orchestration before framework.
fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule {
            label: "observability".to_string(),
            keywords: rule_keywords(&[
                "observability",
                "monitoring",
                "metrics",
                "tracing",
                "telemetry",
                "logging",
                "dashboard",
                "alerting",
            ]),
        },
        CategoryRule {
            label: "orchestration".to_string(),
            keywords: rule_keywords(&[
                "orchestration",
                "orchestrator",
                "workflow",
                "scheduler",
                "pipeline",
                "kubernetes",
                "operator",
                "deployment",
            ]),
        },
        CategoryRule {
            label: "framework".to_string(),
            keywords: rule_keywords(&[
                "framework",
                "sdk",
                "library",
                "toolkit",
                "boilerplate",
                "scaffold",
            ]),
        },
    ]
}

/// Built-in tier rules, evaluated beginner first.
fn default_tiers() -> Vec<TierRule> {
    vec![
        TierRule {
            label: "beginner".to_string(),
            keywords: rule_keywords(&[
                "tutorial",
                "example",
                "demo",
                "starter",
                "getting-started",
                "hello-world",
                "beginner",
            ]),
        },
        TierRule {
            label: "intermediate".to_string(),
            keywords: rule_keywords(&["cli", "client", "plugin", "integration", "automation"]),
        },
        TierRule {
            label: "advanced".to_string(),
            keywords: rule_keywords(&[
                "distributed",
                "concurrent",
                "compiler",
                "optimization",
                "performance",
                "protocol",
            ]),
        },
        TierRule {
            label: "expert".to_string(),
            keywords: rule_keywords(&["consensus", "cryptography", "lock-free", "jit", "verifier"]),
        },
    ]
}
