use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod engine;
pub mod league;

pub use engine::Scorer;
pub use league::League;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestScore {
    pub merged_prs: u64,
    pub points: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub by_user: HashMap<String, PullRequestScore>,
    pub total_merged_prs: u64,
    pub total_points: u64,
}

impl ScoreBoard {
    pub fn get(&self, login: &str) -> PullRequestScore {
        self.by_user.get(login).copied().unwrap_or_default()
    }
}
