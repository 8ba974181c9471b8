// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reddit posting.
//!
//! ```text
//! Publisher (trait)
//!   |-- RedditClient      OAuth2 password grant, /api/submit, /api/selectflair
//!   '-- DryRunPublisher   logs only
//! ```
//!
//! # Key Types
//!
//! | Type         | Purpose                                  |
//! |--------------|------------------------------------------|
//! | `SelfPost`   | Text post to submit                      |
//! | `Submission` | Id, fullname and URL of a created post   |
//! | `Flair`      | Flair text and optional template id      |

pub mod client;


use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::info;

use crate::error::BotResult;

pub use client::RedditClient;

/// A text ("self") post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPost {
    pub subreddit: String,
    pub title: String,
    pub text: String,
    pub send_replies: bool,
}

/// A post created by [`Publisher::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Submission {
    /// Base36 id, e.g. `1k2x3y`.
    pub id: String,
    /// Fullname, e.g. `t3_1k2x3y`.
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Link flair to apply after submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flair {
    pub text: String,
    /// Empty for free-text flair.
    pub template_id: String,
}

impl Flair {
    /// Flair from config values; `None` when no text is configured.
    #[must_use]
    pub fn from_settings(text: &str, template_id: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self {
            text: text.to_string(),
            template_id: template_id.trim().to_string(),
        })
    }
}

/// Something that can publish posts to a subreddit.
pub trait Publisher {
    /// Submit a self post.
    ///
    /// # Errors
    ///
    /// Returns a `RedditError` if Reddit rejects the post, or a
    /// `NetworkError` if the request fails.
    fn submit(&self, post: &SelfPost) -> impl Future<Output = BotResult<Submission>> + Send;

    /// Set the link flair of a submission identified by its fullname.
    ///
    /// # Errors
    ///
    /// Returns a `RedditError` if Reddit rejects the flair, or a
    /// `NetworkError` if the request fails.
    fn select_flair(
        &self,
        subreddit: &str,
        fullname: &str,
        flair: &Flair,
    ) -> impl Future<Output = BotResult<()>> + Send;
}

/// Publisher that only logs what it would do.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPublisher;

impl Publisher for DryRunPublisher {
    async fn submit(&self, post: &SelfPost) -> BotResult<Submission> {
        info!(
            subreddit = %post.subreddit,
            title = %post.title,
            bytes = post.text.len(),
            "dry run: would submit post"
        );
        Ok(Submission {
            id: "dry-run".to_string(),
            name: "t3_dry-run".to_string(),
            url: String::new(),
        })
    }

    async fn select_flair(&self, subreddit: &str, fullname: &str, flair: &Flair) -> BotResult<()> {
        info!(subreddit, fullname, flair = %flair.text, "dry run: would set flair");
        Ok(())
    }
}
