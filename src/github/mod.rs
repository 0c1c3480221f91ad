use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod client;
pub mod fetcher;
pub mod links;

pub use client::{DataSource, GitHubClient};
pub use fetcher::{Fetcher, Snapshot};
pub use links::RepoSlug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
}

/// One entry of `GET /repos/{owner}/{repo}/contributors`.
///
/// Fields are optional on the wire so that a malformed record surfaces as a
/// data-shape error during aggregation instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    pub login: Option<String>,
    pub id: Option<u64>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub contributions: Option<u64>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

impl ContributorRecord {
    pub fn is_bot(&self) -> bool {
        self.account_type.as_deref() == Some("Bot")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Null for pull requests opened by deleted accounts.
    pub user: Option<PullRequestAuthor>,
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequest {
    pub fn author_login(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.login.as_str())
    }

    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestAuthor {
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCommit {
    pub author: String,
    pub summary: String,
    pub date: Option<DateTime<Utc>>,
}

impl From<CommitEntry> for RecentCommit {
    fn from(entry: CommitEntry) -> Self {
        let summary = entry
            .commit
            .message
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let (author, date) = match entry.commit.author {
            Some(author) => (author.name, Some(author.date)),
            None => ("unknown".to_string(), None),
        };

        Self {
            author,
            summary,
            date,
        }
    }
}
