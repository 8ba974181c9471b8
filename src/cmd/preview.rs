// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Preview command implementation.

use std::fmt::Write as _;

use anyhow::Context;
use reqwest::Url;
use serde::Serialize;

use crate::cli::run::PreviewArgs;
use crate::cmd::run::fetch_news;
use crate::config::Config;
use crate::error::Result;
use crate::ledger::PostedLedger;
use crate::news::markdown::render_markdown;
use crate::news::parser::parse_release_notes;
use crate::news::{NewsId, NewsItem};

#[derive(Serialize)]
struct PreviewEntry<'a> {
    id: NewsId,
    posted: bool,
    #[serde(flatten)]
    item: &'a NewsItem,
    markdown: String,
}

/// Render `items` oldest first, each marked `new` or `posted`.
///
/// # Errors
///
/// Returns an error if JSON serialization or formatting fails.
pub fn render_preview(items: &[NewsItem], ledger: &PostedLedger, json: bool) -> Result<String> {
    let entries: Vec<_> = items
        .iter()
        .rev()
        .map(|item| PreviewEntry {
            id: item.id(),
            posted: ledger.contains(item.id()),
            item,
            markdown: render_markdown(item),
        })
        .collect();

    if json {
        let mut out = serde_json::to_string_pretty(&entries)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for entry in &entries {
        let status = if entry.posted { "posted" } else { "new" };
        writeln!(
            out,
            "=== [{status}] {} ({}) ===",
            entry.item.post_title(),
            entry.id
        )?;
        writeln!(out, "{}", entry.markdown)?;
    }
    writeln!(out, "{} entries", entries.len())?;
    Ok(out)
}

/// Main handler for the preview command.
///
/// # Errors
///
/// Returns an error if the page cannot be read or fetched, or the ledger
/// exists but cannot be read.
pub async fn run_preview_command(args: &PreviewArgs, config: &Config) -> Result<()> {
    let items = match &args.file {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let base = Url::parse(&config.source.url).ok();
            parse_release_notes(&html, base.as_ref())?
        }
        None => {
            let mut source = config.source.clone();
            if let Some(url) = &args.source_url {
                source.url.clone_from(url);
            }
            fetch_news(&source).await?
        }
    };

    let ledger = PostedLedger::peek(&config.state.posted_file)?;
    print!("{}", render_preview(&items, &ledger, args.json)?);
    Ok(())
}
