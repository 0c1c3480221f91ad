use super::*;
use crate::config::QueryConfig;
use std::cmp::Ordering;

/// Search, then tier filter, then sort. `Top10` ignores tiers and always
/// ends up ordered by points, cut to `top_limit`.
pub fn filter_view<'a>(
    dataset: &'a [Contributor],
    state: &QueryState,
    settings: &QueryConfig,
) -> Vec<&'a Contributor> {
    let needle = state.search.to_lowercase();

    let mut view: Vec<&Contributor> = dataset
        .iter()
        .filter(|c| needle.is_empty() || c.login.to_lowercase().contains(&needle))
        .filter(|c| matches_tier(c, state.filter, settings))
        .collect();

    match state.sort {
        SortMode::Points => view.sort_by(|a, b| b.points.cmp(&a.points)),
        SortMode::Alphabetical => view.sort_by(|a, b| locale_cmp(&a.login, &b.login)),
        SortMode::Recent => view.sort_by(|a, b| b.commit_count.cmp(&a.commit_count)),
    }

    if state.filter == TierFilter::Top10 {
        view.sort_by(|a, b| b.points.cmp(&a.points));
        view.truncate(settings.top_limit);
    }

    view
}

fn matches_tier(contributor: &Contributor, filter: TierFilter, settings: &QueryConfig) -> bool {
    match filter {
        TierFilter::All | TierFilter::Top10 => true,
        TierFilter::Gold => contributor.league() == League::Gold,
        TierFilter::Silver => contributor.league() == League::Silver,
        TierFilter::Bronze => contributor.league() == League::Bronze,
        TierFilter::New => contributor.commit_count < settings.new_contributor_commits,
    }
}

/// Case-insensitive order; when two logins differ only in case the
/// lowercase spelling comes first.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn apply_query(
    dataset: &[Contributor],
    state: &QueryState,
    settings: &QueryConfig,
) -> PageResult {
    let view = filter_view(dataset, state, settings);
    Paginator::new(settings.page_size).page(&view, state.page)
}
