use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::{Aggregator, Contributor, Leaderboard, ProjectStats};
use crate::config::{QueryConfig, ScoringConfig};
use crate::error::LoadError;
use crate::github::{DataSource, Fetcher, RecentCommit, RepoSlug, Snapshot};
use crate::query::{self, PageResult, Paginator, QueryState, SortMode, TierFilter};
use crate::scoring::{League, Scorer};

/// Issued by [`LeaderboardSession::begin_load`]. Only the most recently
/// issued ticket may install its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started in the meantime; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorDetail {
    pub rank: usize,
    pub league: League,
    pub league_label: String,
    pub pulls_url: String,
    #[serde(flatten)]
    pub contributor: Contributor,
}

pub struct LeaderboardSession {
    repository: RepoSlug,
    scoring: ScoringConfig,
    settings: QueryConfig,
    generation: u64,
    leaderboard: Option<Leaderboard>,
    recent_activity: Vec<RecentCommit>,
    last_error: Option<LoadError>,
    query: QueryState,
}

impl LeaderboardSession {
    pub fn new(repository: RepoSlug, scoring: ScoringConfig, settings: QueryConfig) -> Self {
        Self {
            repository,
            scoring,
            settings,
            generation: 0,
            leaderboard: None,
            recent_activity: Vec::new(),
            last_error: None,
            query: QueryState::default(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        debug!("Starting load generation {}", self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Scores and aggregates `snapshot`, replacing the previous dataset.
    /// The query state is kept but the page goes back to 1.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        snapshot: Snapshot,
    ) -> Result<LoadOutcome, LoadError> {
        if !self.is_current(ticket) {
            info!(
                "Discarding stale load generation {} (current is {})",
                ticket.generation, self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        let scores = Scorer::new(self.scoring.clone()).score(&snapshot.pull_requests);
        let aggregated = Aggregator::new(self.scoring.clone()).aggregate(
            &snapshot.repository,
            &snapshot.contributors,
            &scores,
        );

        match aggregated {
            Ok(leaderboard) => {
                self.leaderboard = Some(leaderboard);
                self.recent_activity = snapshot.recent_activity;
                self.last_error = None;
                self.query.page = 1;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => self.fail_load(ticket, e),
        }
    }

    /// Records a failed load. A stale failure is ignored; a current one
    /// clears the dataset and is handed back to the caller.
    pub fn fail_load(
        &mut self,
        ticket: LoadTicket,
        err: LoadError,
    ) -> Result<LoadOutcome, LoadError> {
        if !self.is_current(ticket) {
            debug!(
                "Ignoring failure of stale load generation {}: {}",
                ticket.generation, err
            );
            return Ok(LoadOutcome::Stale);
        }

        warn!("Load failed: {}", err);
        self.leaderboard = None;
        self.recent_activity.clear();
        self.last_error = Some(err.clone());
        Err(err)
    }

    pub async fn load<S: DataSource>(
        &mut self,
        fetcher: &Fetcher<S>,
    ) -> Result<LoadOutcome, LoadError> {
        let ticket = self.begin_load();
        match fetcher.fetch().await {
            Ok(snapshot) => self.complete_load(ticket, snapshot),
            Err(e) => self.fail_load(ticket, e),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.leaderboard.is_some()
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    pub fn repository(&self) -> &RepoSlug {
        &self.repository
    }

    pub fn stats(&self) -> ProjectStats {
        self.leaderboard
            .as_ref()
            .map(|board| board.stats)
            .unwrap_or_default()
    }

    pub fn recent_activity(&self) -> &[RecentCommit] {
        &self.recent_activity
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    fn dataset(&self) -> &[Contributor] {
        self.leaderboard
            .as_ref()
            .map(|board| board.contributors.as_slice())
            .unwrap_or_default()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.query.sort = sort;
        self.query.page = 1;
    }

    pub fn set_filter(&mut self, filter: TierFilter) {
        self.query.filter = filter;
        self.query.page = 1;
    }

    pub fn total_pages(&self) -> usize {
        let view = query::filter_view(self.dataset(), &self.query, &self.settings);
        Paginator::new(self.settings.page_size).total_pages(view.len())
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.query.page = page.clamp(1, self.total_pages());
        self.query.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.query.page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.query.page.saturating_sub(1))
    }

    pub fn page(&self) -> PageResult {
        query::apply_query(self.dataset(), &self.query, &self.settings)
    }

    pub fn detail(&self, login: &str) -> Option<ContributorDetail> {
        let view = query::filter_view(self.dataset(), &self.query, &self.settings);
        let (index, contributor) = view
            .iter()
            .enumerate()
            .find(|(_, c)| c.login.eq_ignore_ascii_case(login))?;

        let league = contributor.league();
        Some(ContributorDetail {
            rank: index + 1,
            league,
            league_label: league.display_label().to_string(),
            pulls_url: self.repository.pulls_by_author_url(&contributor.login),
            contributor: (*contributor).clone(),
        })
    }
}
