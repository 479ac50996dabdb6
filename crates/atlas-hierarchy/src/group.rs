//! Grouping engine: topic and language groups.
//!
//! Groups preserve first-seen insertion order. Ranking tie-breaks and the
//! serialized map order both depend on it, so groups are held in a `Vec`
//! with a name index on the side; the index is never iterated.

use std::collections::HashMap;

use atlas_types::Repository;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Reserved topic group for records with an empty topic list.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Reserved language group for records without a detected language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// All records sharing one topic label, plus the aggregate count.
#[derive(Debug, Clone, Serialize)]
pub struct TopicGroup {
    /// Topic label
    pub name: String,
    /// Member records in first-seen order
    pub repositories: Vec<Repository>,
    /// Always equals `repositories.len()`
    pub count: usize,
}

impl TopicGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            repositories: Vec::new(),
            count: 0,
        }
    }
}

/// Insertion-ordered collection of topic groups.
///
/// Serializes as a JSON object mapping topic name to
/// `{name, repositories, count}`, keys in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct TopicGroups {
    groups: Vec<TopicGroup>,
    index: HashMap<String, usize>,
}

impl TopicGroups {
    /// Append a record to the named group, creating the group on first use.
    fn append(&mut self, topic: &str, repo: &Repository) {
        let idx = match self.index.get(topic) {
            Some(&i) => i,
            None => {
                let i = self.groups.len();
                self.index.insert(topic.to_string(), i);
                self.groups.push(TopicGroup::new(topic));
                i
            }
        };
        let group = &mut self.groups[idx];
        group.repositories.push(repo.clone());
        group.count += 1;
    }

    /// Look up a group by topic name.
    pub fn get(&self, name: &str) -> Option<&TopicGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    /// Whether a group with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of groups, the reserved bucket included.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TopicGroup> {
        self.groups.iter()
    }
}

impl Serialize for TopicGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, group)?;
        }
        map.end()
    }
}

/// One language's records in first-seen order.
#[derive(Debug, Clone)]
pub struct LanguageGroup {
    /// Language name, or [`UNKNOWN_LANGUAGE`]
    pub name: String,
    /// Member records
    pub repositories: Vec<Repository>,
}

/// Insertion-ordered collection of language groups.
///
/// Serializes as a JSON object mapping language name to the plain array
/// of member records.
#[derive(Debug, Clone, Default)]
pub struct LanguageGroups {
    groups: Vec<LanguageGroup>,
    index: HashMap<String, usize>,
}

impl LanguageGroups {
    fn append(&mut self, language: &str, repo: &Repository) {
        let idx = match self.index.get(language) {
            Some(&i) => i,
            None => {
                let i = self.groups.len();
                self.index.insert(language.to_string(), i);
                self.groups.push(LanguageGroup {
                    name: language.to_string(),
                    repositories: Vec::new(),
                });
                i
            }
        };
        self.groups[idx].repositories.push(repo.clone());
    }

    /// Look up a group by language name.
    pub fn get(&self, name: &str) -> Option<&LanguageGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    /// Whether a group with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of groups, `Unknown` included.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageGroup> {
        self.groups.iter()
    }
}

impl Serialize for LanguageGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.repositories)?;
        }
        map.end()
    }
}

/// Single pass over the batch producing topic and language groups.
///
/// A record with N topics lands in N distinct topic groups, once each.
/// A record with no topics lands only in the reserved
/// [`UNCATEGORIZED`] group. Language grouping keys on the record's
/// language, falling back to [`UNKNOWN_LANGUAGE`] when absent or empty.
pub fn group_records(records: &[Repository]) -> (TopicGroups, LanguageGroups) {
    let mut topics = TopicGroups::default();
    let mut languages = LanguageGroups::default();

    for repo in records {
        for topic in &repo.topics {
            topics.append(topic, repo);
        }
        if repo.topics.is_empty() {
            topics.append(UNCATEGORIZED, repo);
        }

        match repo.language.as_deref() {
            Some(lang) if !lang.is_empty() => languages.append(lang, repo),
            _ => languages.append(UNKNOWN_LANGUAGE, repo),
        }
    }

    (topics, languages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, topics: &[&str]) -> Repository {
        Repository::new(name, format!("https://example.com/{name}"))
            .with_topics(topics.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_record_in_every_listed_topic() {
        let records = vec![repo("a", &["x", "y"])];
        let (topics, _) = group_records(&records);

        assert_eq!(topics.get("x").unwrap().count, 1);
        assert_eq!(topics.get("y").unwrap().count, 1);
        assert!(!topics.contains(UNCATEGORIZED));
    }

    #[test]
    fn test_uncategorized_iff_no_topics() {
        let records = vec![repo("bare", &[]), repo("tagged", &["x"])];
        let (topics, _) = group_records(&records);

        let bucket = topics.get(UNCATEGORIZED).unwrap();
        assert_eq!(bucket.count, 1);
        assert_eq!(bucket.repositories[0].name, "bare");

        let x = topics.get("x").unwrap();
        assert!(x.repositories.iter().all(|r| r.name != "bare"));
    }

    #[test]
    fn test_count_matches_members() {
        let records = vec![repo("a", &["x"]), repo("b", &["x"]), repo("c", &["x", "z"])];
        let (topics, _) = group_records(&records);

        for group in topics.iter() {
            assert_eq!(group.count, group.repositories.len());
        }
        assert_eq!(topics.get("x").unwrap().count, 3);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let records = vec![repo("a", &["beta"]), repo("b", &["alpha"]), repo("c", &["gamma"])];
        let (topics, _) = group_records(&records);

        let names: Vec<&str> = topics.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_language_grouping() {
        let mut r1 = repo("a", &[]);
        r1.language = Some("Go".to_string());
        let mut r2 = repo("b", &[]);
        r2.language = Some("Go".to_string());
        let r3 = repo("c", &[]);

        let (_, languages) = group_records(&[r1, r2, r3]);
        assert_eq!(languages.get("Go").unwrap().repositories.len(), 2);
        assert_eq!(languages.get(UNKNOWN_LANGUAGE).unwrap().repositories.len(), 1);
    }

    #[test]
    fn test_empty_string_language_is_unknown() {
        let mut r = repo("a", &[]);
        r.language = Some(String::new());
        let (_, languages) = group_records(&[r]);
        assert!(languages.contains(UNKNOWN_LANGUAGE));
        assert_eq!(languages.len(), 1);
    }

    #[test]
    fn test_topic_groups_serialize_as_map() {
        let records = vec![repo("a", &["x"])];
        let (topics, _) = group_records(&records);
        let json = serde_json::to_value(&topics).unwrap();

        assert_eq!(json["x"]["name"], "x");
        assert_eq!(json["x"]["count"], 1);
        assert_eq!(json["x"]["repositories"][0]["name"], "a");
    }

    #[test]
    fn test_language_groups_serialize_as_record_arrays() {
        let mut r = repo("a", &[]);
        r.language = Some("Rust".to_string());
        let (_, languages) = group_records(&[r]);
        let json = serde_json::to_value(&languages).unwrap();

        assert!(json["Rust"].is_array());
        assert_eq!(json["Rust"][0]["name"], "a");
    }

    #[test]
    fn test_empty_batch() {
        let (topics, languages) = group_records(&[]);
        assert!(topics.is_empty());
        assert!(languages.is_empty());
    }
}
