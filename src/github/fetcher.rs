use super::*;
use crate::error::LoadError;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub repository: RepositorySummary,
    pub contributors: Vec<ContributorRecord>,
    pub pull_requests: Vec<PullRequest>,
    pub recent_activity: Vec<RecentCommit>,
}

pub struct Fetcher<S> {
    source: S,
    max_pull_pages: u32,
}

impl<S: DataSource> Fetcher<S> {
    pub fn new(source: S, max_pull_pages: u32) -> Self {
        Self {
            source,
            max_pull_pages,
        }
    }

    /// Repository summary and contributors are required; pull requests and
    /// recent activity degrade to whatever could be fetched.
    pub async fn fetch(&self) -> Result<Snapshot, LoadError> {
        info!("Fetching repository summary and contributors...");
        let (repository, contributors) =
            tokio::try_join!(self.source.repository(), self.source.contributors())?;
        info!("Fetched {} contributor records", contributors.len());

        let pull_requests = self.fetch_pulls().await;
        let recent_activity = self.fetch_recent_activity().await;

        Ok(Snapshot {
            repository,
            contributors,
            pull_requests,
            recent_activity,
        })
    }

    async fn fetch_pulls(&self) -> Vec<PullRequest> {
        let mut pulls = Vec::new();

        for page in 1..=self.max_pull_pages {
            match self.source.pulls_page(page).await {
                Ok(batch) if batch.is_empty() => {
                    debug!("Pull request page {} is empty, stopping", page);
                    break;
                }
                Ok(batch) => {
                    debug!("Pull request page {}: {} entries", page, batch.len());
                    pulls.extend(batch);
                }
                Err(e) => {
                    warn!(
                        "Pull request page {} failed, keeping {} pull requests: {}",
                        page,
                        pulls.len(),
                        e
                    );
                    break;
                }
            }
        }

        info!("Fetched {} pull requests", pulls.len());
        pulls
    }

    async fn fetch_recent_activity(&self) -> Vec<RecentCommit> {
        match self.source.recent_commits().await {
            Ok(commits) => commits.into_iter().map(RecentCommit::from).collect(),
            Err(e) => {
                warn!("Recent activity unavailable: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory source; `pulls[i]` answers page `i + 1`.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub repository: Option<RepositorySummary>,
        pub contributors: Option<Vec<ContributorRecord>>,
        pub pulls: Vec<Result<Vec<PullRequest>, LoadError>>,
        pub commits: Option<Vec<CommitEntry>>,
        pub requested_pages: RefCell<Vec<u32>>,
    }

    impl DataSource for FakeSource {
        async fn repository(&self) -> Result<RepositorySummary, LoadError> {
            self.repository
                .clone()
                .ok_or_else(|| LoadError::Network("repository returned 403 Forbidden".into()))
        }

        async fn contributors(&self) -> Result<Vec<ContributorRecord>, LoadError> {
            self.contributors
                .clone()
                .ok_or_else(|| LoadError::Network("contributors returned 403 Forbidden".into()))
        }

        async fn pulls_page(&self, page: u32) -> Result<Vec<PullRequest>, LoadError> {
            self.requested_pages.borrow_mut().push(page);
            self.pulls
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn recent_commits(&self) -> Result<Vec<CommitEntry>, LoadError> {
            self.commits
                .clone()
                .ok_or_else(|| LoadError::Network("commits returned 500".into()))
        }
    }

    pub(crate) fn merged_pr(login: &str, labels: &[&str]) -> PullRequest {
        PullRequest {
            user: Some(PullRequestAuthor {
                login: login.to_string(),
            }),
            merged_at: Some(chrono::Utc::now()),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn healthy_source() -> FakeSource {
        FakeSource {
            repository: Some(RepositorySummary {
                stargazers_count: Some(10),
                forks_count: Some(2),
            }),
            contributors: Some(vec![ContributorRecord {
                login: Some("jane".into()),
                id: Some(1),
                contributions: Some(3),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn stops_at_the_first_empty_page() {
        let source = FakeSource {
            pulls: vec![
                Ok(vec![merged_pr("jane", &[])]),
                Ok(Vec::new()),
                Ok(vec![merged_pr("jane", &[])]),
            ],
            ..healthy_source()
        };
        let fetcher = Fetcher::new(source, 3);

        let snapshot = fetcher.fetch().await.unwrap();
        assert_eq!(snapshot.pull_requests.len(), 1);
        assert_eq!(*fetcher.source.requested_pages.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn failed_pull_page_keeps_earlier_pages() {
        let source = FakeSource {
            pulls: vec![
                Ok(vec![merged_pr("jane", &[]), merged_pr("joe", &[])]),
                Err(LoadError::Network("502 Bad Gateway".into())),
                Ok(vec![merged_pr("jane", &[])]),
            ],
            ..healthy_source()
        };
        let fetcher = Fetcher::new(source, 3);

        let snapshot = fetcher.fetch().await.unwrap();
        assert_eq!(snapshot.pull_requests.len(), 2);
        assert_eq!(*fetcher.source.requested_pages.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn never_requests_more_than_the_page_bound() {
        let page = || Ok(vec![merged_pr("jane", &[])]);
        let source = FakeSource {
            pulls: vec![page(), page(), page(), page()],
            ..healthy_source()
        };
        let fetcher = Fetcher::new(source, 3);

        let snapshot = fetcher.fetch().await.unwrap();
        assert_eq!(snapshot.pull_requests.len(), 3);
        assert_eq!(*fetcher.source.requested_pages.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_contributors_fail_the_whole_load() {
        let source = FakeSource {
            contributors: None,
            ..healthy_source()
        };

        let err = Fetcher::new(source, 3).fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[tokio::test]
    async fn missing_repository_fails_the_whole_load() {
        let source = FakeSource {
            repository: None,
            ..healthy_source()
        };

        assert!(Fetcher::new(source, 3).fetch().await.is_err());
    }

    #[tokio::test]
    async fn recent_activity_is_best_effort() {
        let snapshot = Fetcher::new(healthy_source(), 3).fetch().await.unwrap();
        assert!(snapshot.recent_activity.is_empty());
        assert_eq!(snapshot.contributors.len(), 1);
    }
}
