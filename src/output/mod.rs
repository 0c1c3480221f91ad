use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod console;
pub mod reporter;

pub use reporter::Reporter;

use crate::analysis::ProjectStats;
use crate::github::RecentCommit;
use crate::query::{PageResult, QueryState};
use crate::session::{ContributorDetail, LeaderboardSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Console => ".txt",
        OutputFormat::Json => ".json",
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    pub repository: String,
    pub generated_at: DateTime<Utc>,
    pub stats: ProjectStats,
    pub query: QueryState,
    pub page: PageResult,
    pub detail: Option<ContributorDetail>,
    pub recent_activity: Vec<RecentCommit>,
}

impl LeaderboardReport {
    pub fn from_session(session: &LeaderboardSession, detail_login: Option<&str>) -> Self {
        Self {
            repository: session.repository().to_string(),
            generated_at: Utc::now(),
            stats: session.stats(),
            query: session.query().clone(),
            page: session.page(),
            detail: detail_login.and_then(|login| session.detail(login)),
            recent_activity: session.recent_activity().to_vec(),
        }
    }
}

pub trait OutputGenerator {
    async fn generate(&mut self, report: &LeaderboardReport) -> Result<String>;
}
