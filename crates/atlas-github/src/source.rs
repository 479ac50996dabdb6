//! GitHub organization fetch over the REST API.

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use atlas_types::Repository;

use crate::error::SourceError;

const GITHUB_API_VERSION: &str = "2022-11-28";
const PER_PAGE: u32 = 100;

/// Trait for producing a batch of repository records.
///
/// The hierarchy core only depends on this seam, so the GitHub client can
/// be swapped for a fixture-backed source in tests or another forge
/// entirely.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch all repositories of one organization.
    async fn fetch_org_repos(&self, org: &str) -> Result<Vec<Repository>, SourceError>;
}

/// Configuration for the GitHub source.
#[derive(Debug, Clone)]
pub struct GitHubSourceConfig {
    /// API base URL (overridable for tests/enterprise instances)
    pub base_url: String,

    /// Personal access token; anonymous requests work but rate-limit fast
    pub token: Option<SecretString>,

    /// Request timeout
    pub timeout: Duration,

    /// Maximum retries per page on transient failure
    pub max_retries: u32,

    /// Keep forked repositories
    pub include_forks: bool,

    /// Keep archived repositories
    pub include_archived: bool,
}

impl GitHubSourceConfig {
    /// Create a config with an optional token, falling back to the
    /// `GITHUB_TOKEN` environment variable.
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .map(SecretString::from);
        Self {
            base_url: "https://api.github.com".to_string(),
            token,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            include_forks: false,
            include_archived: false,
        }
    }
}

impl Default for GitHubSourceConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// GitHub REST API repository source.
pub struct GitHubSource {
    client: Client,
    config: GitHubSourceConfig,
}

/// Repository shape as returned by the org listing endpoint.
#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    fork: bool,
}

impl GitHubSource {
    /// Create a new source.
    pub fn new(config: GitHubSourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("org-atlas")
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch one page, retrying transient failures with exponential
    /// backoff. Rate limiting and deterministic failures (parse,
    /// configuration) are not retried.
    async fn fetch_page_with_retry(&self, org: &str, page: u32) -> Result<Vec<ApiRepo>, SourceError> {
        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(60)),
            ..Default::default()
        };

        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(org, page, attempt = attempts, "Fetching repository page");

            match self.fetch_page(org, page).await {
                Ok(repos) => return Ok(repos),
                Err(e) if !is_transient(&e) => return Err(e),
                Err(e) => {
                    if attempts >= self.config.max_retries {
                        error!(error = %e, "Max retries exceeded");
                        return Err(e);
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                error = %e,
                                retry_in_ms = duration.as_millis(),
                                "Page fetch failed, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            error!(error = %e, "Backoff exhausted");
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    /// Make a single page request.
    async fn fetch_page(&self, org: &str, page: u32) -> Result<Vec<ApiRepo>, SourceError> {
        let url = format!("{}/orgs/{}/repos", self.config.base_url, org);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .query(&[
                ("page", page.to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("sort", "updated".to_string()),
                ("direction", "desc".to_string()),
            ]);

        if let Some(token) = &self.config.token {
            request = request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Api(e.to_string()))?;

        let status = response.status();
        if status == 403 || status == 429 {
            return Err(SourceError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn fetch_org_repos(&self, org: &str) -> Result<Vec<Repository>, SourceError> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page_with_retry(org, page).await?;
            if batch.is_empty() {
                break;
            }

            for api_repo in batch {
                if keep_repo(&api_repo, self.config.include_forks, self.config.include_archived) {
                    repos.push(map_api_repo(api_repo));
                }
            }

            page += 1;
        }

        info!(org, count = repos.len(), "Fetched organization repositories");
        Ok(repos)
    }
}

/// Whether a page fetch error is worth retrying. Only transport
/// failures are; a body that failed to parse will fail identically on
/// the next attempt.
fn is_transient(error: &SourceError) -> bool {
    matches!(error, SourceError::Api(_))
}

/// Filter based on fork/archive flags.
fn keep_repo(repo: &ApiRepo, include_forks: bool, include_archived: bool) -> bool {
    if repo.fork && !include_forks {
        return false;
    }
    if repo.archived && !include_archived {
        return false;
    }
    true
}

/// Map an API payload into the shared record shape.
fn map_api_repo(api: ApiRepo) -> Repository {
    Repository {
        name: api.name,
        full_name: api.full_name.unwrap_or_default(),
        description: api.description,
        url: api.html_url,
        topics: api.topics,
        language: api.language,
        stars: api.stargazers_count,
        forks: api.forks_count,
        updated_at: api.updated_at.unwrap_or_default(),
        archived: api.archived,
        is_fork: api.fork,
    }
}
