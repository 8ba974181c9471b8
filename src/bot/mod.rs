// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publishing pipeline.
//!
//! ```text
//! items (page order, newest first)
//!    | reversed
//!    v
//! for each item:
//!    id in ledger / seen this run? --yes--> skipped
//!    | no
//!    v
//! render_markdown --> submit --> select_flair (warn on error)
//!                                  |
//!                                  v
//!                           ledger.record(id)
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::BotResult;
use crate::ledger::PostedLedger;
use crate::news::NewsItem;
use crate::news::markdown::render_markdown;
use crate::reddit::{Flair, Publisher, SelfPost};

/// How news items are posted.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub subreddit: String,
    pub send_replies: bool,
    pub flair: Option<Flair>,
    /// Append posted ids to the ledger. Off for dry runs.
    pub record: bool,
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub found: usize,
    pub posted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Post every item not yet in `ledger`, oldest first.
///
/// Errors are logged per item and counted in [`RunSummary::failed`]; the
/// remaining items are still processed.
pub async fn publish_news<P: Publisher>(
    items: &[NewsItem],
    ledger: &mut PostedLedger,
    publisher: &P,
    options: &PublishOptions,
) -> RunSummary {
    let mut summary = RunSummary {
        found: items.len(),
        ..RunSummary::default()
    };
    let mut seen = HashSet::new();

    for item in items.iter().rev() {
        let id = item.id();
        if ledger.contains(id) || !seen.insert(id) {
            info!(news_id = %id, title = item.post_title(), "already posted, skipping");
            summary.skipped += 1;
            continue;
        }

        match publish_item(item, ledger, publisher, options).await {
            Ok(()) => summary.posted += 1,
            Err(e) if e.is_rate_limited() => {
                warn!(news_id = %id, title = item.post_title(), "not posted, will retry next run: {e}");
                summary.failed += 1;
            }
            Err(e) => {
                error!(news_id = %id, title = item.post_title(), "failed to post news: {e}");
                summary.failed += 1;
            }
        }
    }

    info!(
        found = summary.found,
        posted = summary.posted,
        skipped = summary.skipped,
        failed = summary.failed,
        "publishing finished"
    );
    summary
}

async fn publish_item<P: Publisher>(
    item: &NewsItem,
    ledger: &mut PostedLedger,
    publisher: &P,
    options: &PublishOptions,
) -> BotResult<()> {
    let id = item.id();
    let post = SelfPost {
        subreddit: options.subreddit.clone(),
        title: item.post_title().to_string(),
        text: render_markdown(item),
        send_replies: options.send_replies,
    };

    let submission = publisher.submit(&post).await?;
    info!(news_id = %id, post_id = %submission.id, title = %post.title, "news posted");

    if let Some(flair) = &options.flair
        && let Err(e) = publisher
            .select_flair(&options.subreddit, &submission.name, flair)
            .await
    {
        warn!(news_id = %id, post_id = %submission.id, "failed to set flair: {e}");
    }

    if options.record {
        ledger.record(id)?;
    }
    Ok(())
}
