use serde::{Deserialize, Serialize};

pub mod aggregator;

pub use aggregator::Aggregator;

use crate::scoring::League;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub profile_url: String,
    pub commit_count: u64,
    pub merged_pr_count: u64,
    pub points: u64,
}

impl Contributor {
    pub fn league(&self) -> League {
        League::from_points(self.points)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub contributor_count: usize,
    pub total_prs: u64,
    pub total_points: u64,
    pub star_count: u64,
    pub fork_count: u64,
    pub total_commits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    pub contributors: Vec<Contributor>,
    pub stats: ProjectStats,
}
