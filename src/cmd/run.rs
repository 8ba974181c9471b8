// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation.
//!
//! ```text
//! require_credentials (unless --dry-run)
//!   -> PostedLedger::open
//!   -> RedditClient::authenticate | DryRunPublisher
//!   -> fetch_news (PageFetcher + parse_release_notes)
//!   -> publish_news
//! ```

use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::Url;
use tracing::info;

use crate::bot::{PublishOptions, RunSummary, publish_news};
use crate::cli::run::RunArgs;
use crate::config::{Config, SourceConfig};
use crate::error::Result;
use crate::ledger::PostedLedger;
use crate::net::PageFetcher;
use crate::news::NewsItem;
use crate::news::parser::parse_release_notes;
use crate::reddit::{DryRunPublisher, Flair, RedditClient};

/// Fetch the release notes page and parse it.
///
/// Relative links are resolved against the page URL.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or the parser fails.
pub async fn fetch_news(source: &SourceConfig) -> Result<Vec<NewsItem>> {
    let html = PageFetcher::new()
        .url(&source.url)
        .timeout(Duration::from_secs(source.timeout_secs))
        .fetch_string()
        .await
        .with_context(|| format!("failed to fetch release notes from {}", source.url))?;
    info!(url = %source.url, "fetched release notes");

    let base = Url::parse(&source.url).ok();
    let items = parse_release_notes(&html, base.as_ref())?;
    info!(count = items.len(), "found news entries");
    Ok(items)
}

/// Apply `--source-url` and `--state-file` on top of the loaded config.
#[must_use]
pub fn effective_config(args: &RunArgs, config: &Config) -> Config {
    let mut config = config.clone();
    if let Some(url) = &args.source_url {
        config.source.url.clone_from(url);
    }
    if let Some(path) = &args.state_file {
        config.state.posted_file.clone_from(path);
    }
    config
}

/// Post every new release note and return the counts.
///
/// # Errors
///
/// Returns an error if credentials are missing, the ledger cannot be
/// opened, authentication fails, or the page cannot be fetched. Failures
/// of single items are counted, not returned.
pub async fn run_bot(args: &RunArgs, config: &Config) -> Result<RunSummary> {
    let config = effective_config(args, config);
    let reddit = &config.reddit;

    if !args.dry_run {
        reddit.require_credentials()?;
    }
    info!(
        username = %reddit.username,
        client_id = %reddit.client_id,
        subreddit = reddit.subreddit_name(),
        dry_run = args.dry_run,
        "starting"
    );

    let mut ledger = PostedLedger::open(&config.state.posted_file)?;

    let options = PublishOptions {
        subreddit: reddit.subreddit_name().to_string(),
        send_replies: reddit.send_replies,
        flair: Flair::from_settings(&reddit.flair_text, &reddit.flair_template_id),
        record: !args.dry_run,
    };

    let summary = if args.dry_run {
        let items = fetch_news(&config.source).await?;
        publish_news(&items, &mut ledger, &DryRunPublisher, &options).await
    } else {
        let client = RedditClient::authenticate(reddit)
            .await
            .context("failed to initialize Reddit client")?;
        let items = fetch_news(&config.source).await?;
        publish_news(&items, &mut ledger, &client, &options).await
    };

    Ok(summary)
}

/// Main handler for the run command.
///
/// # Errors
///
/// Returns an error if the run cannot start or any item failed to post.
pub async fn run_run_command(args: &RunArgs, config: &Config) -> Result<()> {
    let summary = run_bot(args, config).await?;
    if summary.has_failures() {
        bail!(
            "{} of {} news entries failed to post",
            summary.failed,
            summary.found
        );
    }
    info!("finished");
    Ok(())
}
