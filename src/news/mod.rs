// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release notes model.
//!
//! ```text
//! release notes page --parser--> Vec<NewsItem> --markdown--> post body
//!                                      |
//!                                      v
//!                               NewsId (ledger key)
//! ```
//!
//! | Type       | Purpose                                    |
//! |------------|--------------------------------------------|
//! | `NewsItem` | One dated entry with its headlines         |
//! | `Headline` | A bold section title and its bullet points |
//! | `NewsId`   | Stable id derived from the entry URL       |

pub mod markdown;
pub mod parser;


use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A section of a news entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    pub key_points: Vec<String>,
}

impl Headline {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key_points: Vec::new(),
        }
    }
}

/// One release notes entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    /// Date part of the header, e.g. `2025-03-07`.
    pub date: String,
    /// Title part of the header, may be empty.
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub headlines: Vec<Headline>,
}

impl NewsItem {
    /// Build an item from its `"date: title"` header.
    ///
    /// The header is split at the first colon. Without a colon the whole
    /// header is taken as the date.
    #[must_use]
    pub fn from_header(
        header: &str,
        url: impl Into<String>,
        image_url: Option<String>,
        headlines: Vec<Headline>,
    ) -> Self {
        let (date, title) = header
            .split_once(':')
            .map_or((header.trim(), ""), |(date, title)| (date.trim(), title.trim()));

        Self {
            date: date.to_string(),
            title: title.to_string(),
            url: url.into(),
            image_url,
            headlines,
        }
    }

    /// Ledger id of this item.
    #[must_use]
    pub fn id(&self) -> NewsId {
        NewsId::from_url(&self.url)
    }

    /// Title used for the Reddit post: the entry title, or its date.
    #[must_use]
    pub fn post_title(&self) -> &str {
        if self.title.is_empty() {
            &self.date
        } else {
            &self.title
        }
    }
}

/// Identifier written to the posted ledger.
///
/// Computed as `h = 31 * h + unit` over the UTF-16 code units of the URL
/// with wrapping 32-bit arithmetic. Existing ledgers hold these values, so
/// the function must stay bit-for-bit stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NewsId(i32);

impl NewsId {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let hash = url
            .encode_utf16()
            .fold(0_i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
        Self(hash)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NewsId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
