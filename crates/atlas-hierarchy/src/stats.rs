//! Statistics aggregation over groupings.
//!
//! All quantities are exact integers. Rankings use a stable sort so that
//! equal counts keep first-insertion order.

use atlas_types::Repository;
use serde::{Deserialize, Serialize};

use crate::group::{LanguageGroups, TopicGroups, UNCATEGORIZED, UNKNOWN_LANGUAGE};

/// Maximum entries in a top ranking.
const TOP_N: usize = 10;

/// One entry of a `top_topics`/`top_languages` ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Group name
    pub name: String,
    /// Member count at aggregation time
    pub count: usize,
}

/// Immutable aggregate statistics over one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Records in the batch
    pub total_repositories: usize,
    /// Distinct topics, the reserved `uncategorized` bucket excluded
    pub total_topics: usize,
    /// Distinct languages, `Unknown` excluded
    pub total_languages: usize,
    /// Sum of star counts
    pub total_stars: u64,
    /// Sum of fork counts
    pub total_forks: u64,
    /// Topics ranked by descending member count, at most ten
    pub top_topics: Vec<RankedEntry>,
    /// Languages ranked by descending member count, at most ten
    pub top_languages: Vec<RankedEntry>,
    /// Records listing more than one topic
    pub repos_with_multiple_topics: usize,
    /// Records listing no topics
    pub repos_without_topics: usize,
}

/// Compute the statistics snapshot from the groupings and the original
/// batch.
pub fn aggregate_stats(
    records: &[Repository],
    topics: &TopicGroups,
    languages: &LanguageGroups,
) -> Stats {
    let total_stars = records.iter().map(|r| r.stars).sum();
    let total_forks = records.iter().map(|r| r.forks).sum();

    let mut top_topics: Vec<RankedEntry> = topics
        .iter()
        .map(|g| RankedEntry {
            name: g.name.clone(),
            count: g.count,
        })
        .collect();
    // Stable sort: equal counts keep insertion order
    top_topics.sort_by(|a, b| b.count.cmp(&a.count));
    top_topics.truncate(TOP_N);

    let mut top_languages: Vec<RankedEntry> = languages
        .iter()
        .map(|g| RankedEntry {
            name: g.name.clone(),
            count: g.repositories.len(),
        })
        .collect();
    top_languages.sort_by(|a, b| b.count.cmp(&a.count));
    top_languages.truncate(TOP_N);

    Stats {
        total_repositories: records.len(),
        total_topics: topics.iter().filter(|g| g.name != UNCATEGORIZED).count(),
        total_languages: languages
            .iter()
            .filter(|g| g.name != UNKNOWN_LANGUAGE)
            .count(),
        total_stars,
        total_forks,
        top_topics,
        top_languages,
        repos_with_multiple_topics: records.iter().filter(|r| r.topics.len() > 1).count(),
        repos_without_topics: records.iter().filter(|r| r.topics.is_empty()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_records;

    fn repo(name: &str, topics: &[&str]) -> Repository {
        Repository::new(name, format!("https://example.com/{name}"))
            .with_topics(topics.iter().map(|t| t.to_string()).collect())
    }

    fn build_stats(records: &[Repository]) -> Stats {
        let (topics, languages) = group_records(records);
        aggregate_stats(records, &topics, &languages)
    }

    #[test]
    fn test_totals_exclude_reserved_buckets() {
        let mut records = vec![repo("a", &[]), repo("b", &["x"])];
        records[1].language = Some("Rust".to_string());

        let stats = build_stats(&records);
        assert_eq!(stats.total_topics, 1);
        assert_eq!(stats.total_languages, 1);
    }

    #[test]
    fn test_star_and_fork_sums() {
        let records = vec![
            repo("a", &[]).with_counts(10, 2),
            repo("b", &[]).with_counts(5, 1),
        ];
        let stats = build_stats(&records);
        assert_eq!(stats.total_stars, 15);
        assert_eq!(stats.total_forks, 3);
    }

    #[test]
    fn test_topic_counters() {
        let records = vec![repo("a", &[]), repo("b", &["x"]), repo("c", &["x", "y"])];
        let stats = build_stats(&records);
        assert_eq!(stats.repos_without_topics, 1);
        assert_eq!(stats.repos_with_multiple_topics, 1);
    }

    #[test]
    fn test_ranking_descends_by_count() {
        let records = vec![
            repo("a", &["rare"]),
            repo("b", &["common"]),
            repo("c", &["common"]),
        ];
        let stats = build_stats(&records);
        assert_eq!(stats.top_topics[0].name, "common");
        assert_eq!(stats.top_topics[0].count, 2);
        assert_eq!(stats.top_topics[1].name, "rare");
    }

    #[test]
    fn test_ranking_tie_keeps_insertion_order() {
        let records = vec![repo("a", &["first"]), repo("b", &["second"])];
        let stats = build_stats(&records);
        assert_eq!(stats.top_topics[0].name, "first");
        assert_eq!(stats.top_topics[1].name, "second");
    }

    #[test]
    fn test_ranking_capped_at_ten() {
        let records: Vec<Repository> = (0..15)
            .map(|i| {
                let topic = format!("t{i}");
                let mut r = repo(&format!("r{i}"), &[topic.as_str()]);
                r.language = Some(format!("L{i}"));
                r
            })
            .collect();

        let stats = build_stats(&records);
        assert_eq!(stats.top_topics.len(), 10);
        assert_eq!(stats.top_languages.len(), 10);
    }

    #[test]
    fn test_empty_batch() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_repositories, 0);
        assert_eq!(stats.total_stars, 0);
        assert!(stats.top_topics.is_empty());
        assert!(stats.top_languages.is_empty());
    }
}
