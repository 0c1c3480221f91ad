use super::*;
use crate::query::RankedContributor;
use crate::scoring::League;
use colored::*;
use std::fmt::Write;

pub struct ConsoleGenerator {
    color: bool,
}

impl ConsoleGenerator {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn league_badge(&self, league: League) -> String {
        let label = league.tier_name().to_uppercase();
        if !self.color {
            return label;
        }
        match league {
            League::Gold => label.bright_yellow().bold().to_string(),
            League::Silver => label.white().bold().to_string(),
            League::Bronze => label.truecolor(205, 127, 50).bold().to_string(),
            League::Unranked => label.dimmed().to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bright_cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_stats(&self, out: &mut String, report: &LeaderboardReport) -> std::fmt::Result {
        let stats = &report.stats;
        writeln!(out, "{}", self.heading(&format!("Leaderboard for {}", report.repository)))?;
        writeln!(
            out,
            "Contributors: {}  Commits: {}  Merged PRs: {}  Points: {}  Stars: {}  Forks: {}",
            stats.contributor_count,
            stats.total_commits,
            stats.total_prs,
            stats.total_points,
            stats.star_count,
            stats.fork_count
        )?;
        writeln!(out)
    }

    fn render_row(&self, out: &mut String, item: &RankedContributor) -> std::fmt::Result {
        let c = &item.contributor;
        writeln!(
            out,
            "{:>4}  {:<24} {:>6} {:>5} {:>7}  {}",
            format!("#{}", item.rank),
            c.login,
            c.points,
            c.merged_pr_count,
            c.commit_count,
            self.league_badge(item.league)
        )
    }

    fn render_page(&self, out: &mut String, page: &PageResult) -> std::fmt::Result {
        if page.items.is_empty() {
            writeln!(out, "No contributors match your search.")?;
        } else {
            writeln!(
                out,
                "{:>4}  {:<24} {:>6} {:>5} {:>7}  {}",
                "Rank", "Login", "Points", "PRs", "Commits", "League"
            )?;
            for item in &page.items {
                self.render_row(out, item)?;
            }
        }
        writeln!(
            out,
            "\nPage {} of {} ({} matching)",
            page.current_page, page.total_pages, page.total_matches
        )
    }

    fn render_detail(&self, out: &mut String, detail: &ContributorDetail) -> std::fmt::Result {
        let c = &detail.contributor;
        writeln!(out, "\n{}", self.heading(&c.login))?;
        writeln!(out, "  Rank:    #{}", detail.rank)?;
        writeln!(out, "  League:  {}", detail.league_label)?;
        writeln!(out, "  Points:  {}", c.points)?;
        writeln!(out, "  Commits: {}", c.commit_count)?;
        writeln!(out, "  PRs:     {}", c.merged_pr_count)?;
        writeln!(out, "  Profile: {}", c.profile_url)?;
        writeln!(out, "  Pull requests: {}", detail.pulls_url)
    }

    fn render_activity(&self, out: &mut String, activity: &[RecentCommit]) -> std::fmt::Result {
        writeln!(out, "\n{}", self.heading("Recent activity"))?;
        for commit in activity {
            let date = commit
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            writeln!(out, "  {} {} pushed \"{}\"", date, commit.author, commit.summary)?;
        }
        Ok(())
    }
}

impl OutputGenerator for ConsoleGenerator {
    async fn generate(&mut self, report: &LeaderboardReport) -> Result<String> {
        let mut out = String::new();

        self.render_stats(&mut out, report)?;
        self.render_page(&mut out, &report.page)?;
        if let Some(detail) = &report.detail {
            self.render_detail(&mut out, detail)?;
        }
        if !report.recent_activity.is_empty() {
            self.render_activity(&mut out, &report.recent_activity)?;
        }

        Ok(out)
    }
}
