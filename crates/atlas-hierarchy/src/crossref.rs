//! Cross-reference detection for multi-topic records.

use atlas_types::Repository;
use serde::{Deserialize, Serialize};

/// A record that belongs to more than one topic, kept for relationship
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConnection {
    /// Name of the linking record
    pub repository: String,
    /// The record's full topic list
    pub topics: Vec<String>,
    /// Record URL
    pub url: String,
}

/// Emit one connection per record with more than one topic, input order
/// preserved. Records with zero or one topic are skipped.
pub fn detect_connections(records: &[Repository]) -> Vec<TopicConnection> {
    records
        .iter()
        .filter(|r| r.topics.len() > 1)
        .map(|r| TopicConnection {
            repository: r.name.clone(),
            topics: r.topics.clone(),
            url: r.url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, topics: &[&str]) -> Repository {
        Repository::new(name, format!("https://example.com/{name}"))
            .with_topics(topics.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_only_multi_topic_records() {
        let records = vec![repo("none", &[]), repo("one", &["x"]), repo("two", &["x", "y"])];
        let connections = detect_connections(&records);

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].repository, "two");
        assert_eq!(connections[0].topics, vec!["x", "y"]);
    }

    #[test]
    fn test_input_order_preserved() {
        let records = vec![repo("b", &["x", "y"]), repo("a", &["y", "z"])];
        let connections = detect_connections(&records);

        let names: Vec<&str> = connections.iter().map(|c| c.repository.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let connections = detect_connections(&[repo("r", &["x", "y"])]);
        let json = serde_json::to_value(&connections).unwrap();

        assert_eq!(json[0]["repository"], "r");
        assert_eq!(json[0]["url"], "https://example.com/r");
        assert!(json[0]["topics"].is_array());
    }

    #[test]
    fn test_empty_batch() {
        assert!(detect_connections(&[]).is_empty());
    }
}
