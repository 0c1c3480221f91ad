use super::*;
use crate::config::ScoringConfig;
use crate::github::PullRequest;
use tracing::{debug, info};

const LEVEL_MARKERS: [&str; 3] = ["level 3", "level 2", "level 1"];

pub struct Scorer {
    weights: ScoringConfig,
}

impl Scorer {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    /// Points for one merged pull request.
    ///
    /// Each label contributes the weight of the highest level it names, and
    /// labels add up: `{"level 3", "level 1"}` is worth 11 + 2. A pull
    /// request without any level label earns the default weight.
    pub fn pull_request_points(&self, pr: &PullRequest) -> u64 {
        let mut points = 0;
        let mut has_level = false;

        for label in &pr.labels {
            if let Some(weight) = self.label_weight(&label.name) {
                points += weight;
                has_level = true;
            }
        }

        if has_level {
            points
        } else {
            self.weights.default_pr
        }
    }

    fn label_weight(&self, name: &str) -> Option<u64> {
        let name = name.to_lowercase();
        let weights = [self.weights.level3, self.weights.level2, self.weights.level1];

        LEVEL_MARKERS
            .iter()
            .zip(weights)
            .find(|(marker, _)| name.contains(**marker))
            .map(|(_, weight)| weight)
    }

    /// Merged pull requests only; unmerged and authorless ones are skipped.
    pub fn score<'a, I>(&self, pulls: I) -> ScoreBoard
    where
        I: IntoIterator<Item = &'a PullRequest>,
    {
        let mut board = ScoreBoard::default();

        for pr in pulls {
            if !pr.is_merged() {
                continue;
            }
            let Some(login) = pr.author_login() else {
                debug!("Skipping merged pull request without an author");
                continue;
            };

            let points = self.pull_request_points(pr);
            let entry = board.by_user.entry(login.to_string()).or_default();
            entry.merged_prs += 1;
            entry.points += points;

            board.total_merged_prs += 1;
            board.total_points += points;
        }

        info!(
            "Scored {} merged pull requests from {} authors for {} points",
            board.total_merged_prs,
            board.by_user.len(),
            board.total_points
        );

        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fetcher::tests::merged_pr;

    fn scorer() -> Scorer {
        Scorer::new(ScoringConfig::default())
    }

    #[test]
    fn level_labels_award_their_weights() {
        let scorer = scorer();
        assert_eq!(scorer.pull_request_points(&merged_pr("a", &["level 3"])), 11);
        assert_eq!(scorer.pull_request_points(&merged_pr("a", &["Level 2"])), 5);
        assert_eq!(scorer.pull_request_points(&merged_pr("a", &["GSSoC LEVEL 1"])), 2);
    }

    #[test]
    fn matching_labels_are_additive() {
        let pr = merged_pr("a", &["level 3", "level 1"]);
        assert_eq!(scorer().pull_request_points(&pr), 13);
    }

    #[test]
    fn unlabelled_merge_earns_default_weight() {
        let pr = merged_pr("a", &["bug", "frontend"]);
        assert_eq!(scorer().pull_request_points(&pr), 1);
    }

    #[test]
    fn unmerged_pull_requests_earn_nothing() {
        let mut open = merged_pr("a", &["level 3"]);
        open.merged_at = None;

        let board = scorer().score(&[open]);
        assert_eq!(board.get("a"), PullRequestScore::default());
        assert_eq!(board.total_merged_prs, 0);
        assert_eq!(board.total_points, 0);
    }

    #[test]
    fn authorless_pull_requests_are_skipped() {
        let mut ghost = merged_pr("a", &[]);
        ghost.user = None;

        let board = scorer().score(&[ghost]);
        assert!(board.by_user.is_empty());
        assert_eq!(board.total_points, 0);
    }

    #[test]
    fn totals_equal_the_sum_of_per_user_scores() {
        let pulls = vec![
            merged_pr("jane", &["level 3"]),
            merged_pr("jane", &["level 2", "level 1"]),
            merged_pr("joe", &[]),
            merged_pr("ana", &["Level 1", "docs"]),
            merged_pr("joe", &["level 2"]),
        ];

        let board = scorer().score(&pulls);
        let per_user_points: u64 = board.by_user.values().map(|s| s.points).sum();
        let per_user_prs: u64 = board.by_user.values().map(|s| s.merged_prs).sum();

        assert_eq!(board.total_points, per_user_points);
        assert_eq!(board.total_merged_prs, per_user_prs);
        assert_eq!(
            board.get("jane"),
            PullRequestScore {
                merged_prs: 2,
                points: 18
            }
        );
        assert_eq!(board.get("joe").points, 6);
    }

    #[test]
    fn custom_weights_are_respected() {
        let scorer = Scorer::new(ScoringConfig {
            level3: 20,
            default_pr: 3,
            ..ScoringConfig::default()
        });
        assert_eq!(scorer.pull_request_points(&merged_pr("a", &["level 3"])), 20);
        assert_eq!(scorer.pull_request_points(&merged_pr("a", &[])), 3);
    }
}
