use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "leaderboard.toml";
const ENV_PREFIX: &str = "LEADERBOARD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository: Option<String>,
    pub api: ApiConfig,
    pub scoring: ScoringConfig,
    pub query: QueryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub contributors_per_page: u32,
    pub pulls_per_page: u32,
    pub max_pull_pages: u32,
    pub recent_commits: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub level3: u64,
    pub level2: u64,
    pub level1: u64,
    pub default_pr: u64,
    pub per_commit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub page_size: usize,
    pub top_limit: usize,
    /// Contributors with fewer commits than this match the "new" filter.
    pub new_contributor_commits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_output: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            contributors_per_page: 100,
            pulls_per_page: 100,
            max_pull_pages: 3,
            recent_commits: 5,
            timeout_secs: 30,
            user_agent: concat!("leaderboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            level3: 11,
            level2: 5,
            level1: 2,
            default_pr: 1,
            per_commit: 1,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            top_limit: 10,
            new_contributor_commits: 5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "console".to_string(),
            color_output: true,
        }
    }
}

impl Config {
    /// Layers an optional config file and `LEADERBOARD__*` environment
    /// variables over the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => {
                builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        if config.query.page_size == 0 {
            anyhow::bail!("query.page_size must be at least 1");
        }

        Ok(config)
    }
}
