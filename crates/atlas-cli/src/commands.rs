//! Command implementations for the atlas binary.
//!
//! Handles:
//! - fetch: pull an organization's repositories and persist the snapshot
//! - build: derive the hierarchy from a snapshot and persist it
//! - stats: print the summary and classification breakdown
//! - run: fetch then build

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use atlas_github::{save_snapshot, GitHubSource, GitHubSourceConfig, RepositorySource};
use atlas_hierarchy::{Classifier, HierarchyBuilder, Stats};
use atlas_types::{Repository, Settings};

/// Load layered settings and apply CLI overrides.
pub fn load_settings(config_path: Option<&str>, log_level: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }
    Ok(settings)
}

/// Initialize logging once, env filter first, settings level as fallback.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Fetch an organization's repositories into a snapshot file.
pub async fn handle_fetch(
    settings: &Settings,
    org: Option<String>,
    output: Option<PathBuf>,
    include_forks: bool,
    include_archived: bool,
    token: Option<String>,
) -> Result<()> {
    let org = resolve_org(settings, org)?;
    let output = output.unwrap_or_else(|| settings.snapshot_path());

    let mut config = GitHubSourceConfig::new(token);
    config.include_forks = include_forks || settings.include_forks;
    config.include_archived = include_archived || settings.include_archived;

    info!(org = %org, "Fetching organization repositories");
    let source = GitHubSource::new(config).context("Failed to create GitHub client")?;
    let repos = source
        .fetch_org_repos(&org)
        .await
        .with_context(|| format!("Failed to fetch repositories for {org}"))?;

    let snapshot = save_snapshot(repos, &output)
        .with_context(|| format!("Failed to save snapshot to {}", output.display()))?;

    let topics: BTreeSet<&str> = snapshot
        .repositories
        .iter()
        .flat_map(|r| r.topics.iter().map(String::as_str))
        .collect();

    println!("\nSummary:");
    println!("  Total repositories: {}", snapshot.total_count);
    println!("  Unique topics: {}", topics.len());
    println!(
        "  Topics: {}",
        topics.into_iter().collect::<Vec<_>>().join(", ")
    );

    Ok(())
}

/// Build the hierarchy from a snapshot file and persist it.
pub fn handle_build(
    settings: &Settings,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = input.unwrap_or_else(|| settings.snapshot_path());
    let output = output.unwrap_or_else(|| settings.hierarchy_path());

    let hierarchy = build_from_file(&input)?;
    hierarchy
        .save(&output)
        .with_context(|| format!("Failed to save hierarchy to {}", output.display()))?;

    print_summary(&hierarchy.stats);
    Ok(())
}

/// Build in memory and print the summary plus the advisory
/// classification breakdown.
pub fn handle_stats(settings: &Settings, input: Option<PathBuf>) -> Result<()> {
    let input = input.unwrap_or_else(|| settings.snapshot_path());
    let hierarchy = build_from_file(&input)?;

    print_summary(&hierarchy.stats);
    print_classification(&hierarchy.all_repositories);
    Ok(())
}

/// Fetch then build, reusing an existing snapshot when asked.
#[allow(clippy::too_many_arguments)]
pub async fn handle_run(
    settings: &Settings,
    org: Option<String>,
    data_dir: Option<String>,
    skip_fetch: bool,
    include_forks: bool,
    include_archived: bool,
    token: Option<String>,
) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }

    let snapshot_path = settings.snapshot_path();
    if skip_fetch && snapshot_path.exists() {
        info!(path = %snapshot_path.display(), "Reusing existing snapshot");
    } else {
        handle_fetch(&settings, org, None, include_forks, include_archived, token).await?;
    }

    handle_build(&settings, None, None)
}

fn resolve_org(settings: &Settings, org: Option<String>) -> Result<String> {
    match org.or_else(|| settings.org.clone()) {
        Some(org) if !org.is_empty() => Ok(org),
        _ => bail!("No organization specified (use --org or set `org` in the config file)"),
    }
}

fn build_from_file(input: &Path) -> Result<atlas_hierarchy::Hierarchy> {
    let builder = HierarchyBuilder::from_json_file(input)
        .with_context(|| format!("Failed to load snapshot from {}", input.display()))?;
    builder.build().context("Failed to build hierarchy")
}

fn print_summary(stats: &Stats) {
    println!("\nHierarchy Summary:");
    println!("  Total repositories: {}", stats.total_repositories);
    println!("  Total topics: {}", stats.total_topics);
    println!("  Total languages: {}", stats.total_languages);
    println!("  Total stars: {}", stats.total_stars);
    println!(
        "  Repos with multiple topics: {}",
        stats.repos_with_multiple_topics
    );
    println!("  Repos without topics: {}", stats.repos_without_topics);

    println!("\nTop Topics:");
    for topic in stats.top_topics.iter().take(5) {
        println!("  {}: {} repos", topic.name, topic.count);
    }
}

fn print_classification(repos: &[Repository]) {
    let classifier = Classifier::default();
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    let mut difficulties: BTreeMap<String, usize> = BTreeMap::new();

    for repo in repos {
        let result = classifier.classify(repo);
        *categories.entry(result.category).or_insert(0) += 1;
        *difficulties.entry(result.difficulty).or_insert(0) += 1;
    }

    println!("\nCategories:");
    for (label, count) in &categories {
        println!("  {label}: {count} repos");
    }

    println!("\nDifficulty:");
    for (label, count) in &difficulties {
        println!("  {label}: {count} repos");
    }
}
