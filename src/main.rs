use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod error;
mod github;
mod output;
mod query;
mod scoring;
mod session;

use config::Config;
use github::{Fetcher, GitHubClient, RepoSlug};
use output::{LeaderboardReport, OutputFormat, Reporter};
use query::{SortMode, TierFilter};
use session::LeaderboardSession;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to rank (owner/name, https URL or ssh remote)
    #[arg(short, long, env = "LEADERBOARD_REPO")]
    repo: Option<String>,

    /// Only show logins containing this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Sort order of the list
    #[arg(long, value_enum, default_value_t = SortMode::Points)]
    sort: SortMode,

    /// League filter, or top10 for the ten highest scores
    #[arg(short, long, value_enum, default_value_t = TierFilter::All)]
    filter: TierFilter,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Step one page forward from --page
    #[arg(long, conflicts_with = "prev")]
    next: bool,

    /// Step one page back from --page
    #[arg(long)]
    prev: bool,

    /// Show the detail card for this contributor
    #[arg(short, long)]
    detail: Option<String>,

    /// Output format (console, json); defaults to the configured format
    #[arg(short, long)]
    output: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output_file: Option<String>,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn loading_spinner(repo: &RepoSlug) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")?);
    spinner.set_message(format!("Loading contributors of {}", repo));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    if !config.output.color_output {
        colored::control::set_override(false);
    }

    let repo_arg = cli
        .repo
        .as_deref()
        .or(config.repository.as_deref())
        .context("No repository given; pass --repo owner/name or set `repository` in the config")?;
    let repo = RepoSlug::parse(repo_arg)?;

    let format = cli
        .output
        .as_deref()
        .unwrap_or(config.output.default_format.as_str());
    let mut reporter = Reporter::new(
        format,
        cli.output_file.as_deref(),
        config.output.color_output,
    );
    let interactive = reporter.format() == OutputFormat::Console && cli.output_file.is_none();

    if interactive {
        println!(
            "{}",
            "Leaderboard - Contributor Rankings".bright_cyan().bold()
        );
        println!("Repository: {}", repo.web_url().bright_white());
    }

    let client = GitHubClient::new(&config.api, &repo)?;
    let fetcher = Fetcher::new(client, config.api.max_pull_pages);
    let mut session = LeaderboardSession::new(
        repo.clone(),
        config.scoring.clone(),
        config.query.clone(),
    );

    let spinner = if interactive {
        Some(loading_spinner(&repo)?)
    } else {
        None
    };
    let outcome = session.load(&fetcher).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    debug!("Load finished: {:?}", outcome);
    if !session.is_loaded() {
        let reason = session
            .last_error()
            .map(ToString::to_string)
            .unwrap_or_default();
        bail!(
            "Failed to load data for {}: {}. The API rate limit may be exceeded.",
            repo,
            reason
        );
    }

    session.set_search(cli.search.as_str());
    session.set_sort(cli.sort);
    session.set_filter(cli.filter);
    let mut page = session.go_to_page(cli.page);
    if page != cli.page {
        info!("Page {} is out of range, showing page {}", cli.page, page);
    }
    if cli.next {
        page = session.next_page();
    } else if cli.prev {
        page = session.prev_page();
    }
    debug!("Showing page {} of {}", page, session.total_pages());

    let report = LeaderboardReport::from_session(&session, cli.detail.as_deref());
    if let (Some(login), None) = (&cli.detail, &report.detail) {
        info!("{} is not in the current view", login);
    }

    reporter.generate_report(&report).await?;

    if interactive {
        println!("{}", "Done!".bright_green().bold());
    }

    Ok(())
}
