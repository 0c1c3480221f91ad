use super::*;
use crate::config::ApiConfig;
use crate::error::LoadError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub trait DataSource {
    async fn repository(&self) -> Result<RepositorySummary, LoadError>;

    async fn contributors(&self) -> Result<Vec<ContributorRecord>, LoadError>;

    /// One 1-based page of pull requests in any state.
    async fn pulls_page(&self, page: u32) -> Result<Vec<PullRequest>, LoadError>;

    async fn recent_commits(&self) -> Result<Vec<CommitEntry>, LoadError>;
}

pub struct GitHubClient {
    client: Client,
    repo_url: String,
    contributors_per_page: u32,
    pulls_per_page: u32,
    recent_commits: u32,
}

impl GitHubClient {
    pub fn new(config: &ApiConfig, repo: &RepoSlug) -> Result<Self, LoadError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| LoadError::Network(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        Ok(Self {
            client,
            repo_url: repo.api_url(&config.base_url),
            contributors_per_page: config.contributors_per_page,
            pulls_per_page: config.pulls_per_page,
            recent_commits: config.recent_commits,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoadError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Network(format!("{} returned {}", url, status)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl DataSource for GitHubClient {
    async fn repository(&self) -> Result<RepositorySummary, LoadError> {
        self.get_json(&self.repo_url).await
    }

    async fn contributors(&self) -> Result<Vec<ContributorRecord>, LoadError> {
        let url = format!(
            "{}/contributors?per_page={}",
            self.repo_url, self.contributors_per_page
        );
        self.get_json(&url).await
    }

    async fn pulls_page(&self, page: u32) -> Result<Vec<PullRequest>, LoadError> {
        let url = format!(
            "{}/pulls?state=all&per_page={}&page={}",
            self.repo_url, self.pulls_per_page, page
        );
        self.get_json(&url).await
    }

    async fn recent_commits(&self) -> Result<Vec<CommitEntry>, LoadError> {
        let url = format!("{}/commits?per_page={}", self.repo_url, self.recent_commits);
        self.get_json(&url).await
    }
}
