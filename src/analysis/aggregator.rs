use super::*;
use crate::config::ScoringConfig;
use crate::error::LoadError;
use crate::github::{ContributorRecord, RepositorySummary};
use crate::scoring::ScoreBoard;
use tracing::{debug, info};

pub struct Aggregator {
    weights: ScoringConfig,
}

impl Aggregator {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    /// Joins contributor records with their pull request scores.
    ///
    /// Contributors whose pull requests earned nothing are credited
    /// `per_commit` points for every commit instead.
    pub fn aggregate(
        &self,
        repository: &RepositorySummary,
        records: &[ContributorRecord],
        scores: &ScoreBoard,
    ) -> Result<Leaderboard, LoadError> {
        let star_count = repository
            .stargazers_count
            .ok_or_else(|| LoadError::missing_field("repository summary", "stargazers_count"))?;
        let fork_count = repository
            .forks_count
            .ok_or_else(|| LoadError::missing_field("repository summary", "forks_count"))?;

        let mut contributors = Vec::with_capacity(records.len());
        let mut total_commits = 0;

        for record in records {
            if record.is_bot() {
                debug!("Excluding bot account {:?}", record.login);
                continue;
            }

            let contributor = self.build_contributor(record, scores)?;
            total_commits += contributor.commit_count;
            contributors.push(contributor);
        }

        // Stable: equal scores keep the order the API returned them in.
        contributors.sort_by(|a, b| b.points.cmp(&a.points));

        let stats = ProjectStats {
            contributor_count: contributors.len(),
            total_prs: scores.total_merged_prs,
            total_points: scores.total_points,
            star_count,
            fork_count,
            total_commits,
        };

        info!(
            "Aggregated {} contributors ({} bot records dropped), {} commits",
            stats.contributor_count,
            records.len() - stats.contributor_count,
            stats.total_commits
        );

        Ok(Leaderboard {
            contributors,
            stats,
        })
    }

    fn build_contributor(
        &self,
        record: &ContributorRecord,
        scores: &ScoreBoard,
    ) -> Result<Contributor, LoadError> {
        let login = record
            .login
            .clone()
            .ok_or_else(|| LoadError::missing_field("contributor", "login"))?;
        let id = record
            .id
            .ok_or_else(|| LoadError::missing_field(&format!("contributor {}", login), "id"))?;
        let commit_count = record.contributions.ok_or_else(|| {
            LoadError::missing_field(&format!("contributor {}", login), "contributions")
        })?;

        let score = scores.get(&login);
        let points = if score.points == 0 {
            debug!("{} has no pull request points, falling back to commits", login);
            commit_count * self.weights.per_commit
        } else {
            score.points
        };

        Ok(Contributor {
            id,
            avatar_url: record.avatar_url.clone().unwrap_or_default(),
            profile_url: record.html_url.clone().unwrap_or_default(),
            commit_count,
            merged_pr_count: score.merged_prs,
            points,
            login,
        })
    }
}
