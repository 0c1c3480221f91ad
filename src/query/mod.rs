use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod engine;
pub mod paginator;

pub use engine::{apply_query, filter_view};
pub use paginator::Paginator;

use crate::analysis::Contributor;
use crate::scoring::League;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    #[value(alias = "contributions")]
    Points,
    Alphabetical,
    /// Most commits first; stands in for recency, which the API does not report here.
    Recent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TierFilter {
    #[default]
    All,
    Gold,
    Silver,
    Bronze,
    /// Contributors with only a handful of commits.
    New,
    /// The best scores overall, whatever the sort mode.
    Top10,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search: String,
    pub sort: SortMode,
    pub filter: TierFilter,
    /// 1-based.
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortMode::default(),
            filter: TierFilter::default(),
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedContributor {
    pub rank: usize,
    pub league: League,
    #[serde(flatten)]
    pub contributor: Contributor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub items: Vec<RankedContributor>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Length of the whole filtered view, across all pages.
    pub total_matches: usize,
}
