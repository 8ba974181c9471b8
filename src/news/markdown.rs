// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reddit markdown for a news item.
//!
//! ```text
//! ## Headline
//! - key point
//! - key point
//!
//!
//! Originally published on 2025-03-07
//!
//! [View news image](https://...)
//! [Read more here](https://...)
//! ```

use super::NewsItem;

/// Render the self-post body for `item`.
#[must_use]
pub fn render_markdown(item: &NewsItem) -> String {
    let mut body = String::new();

    for headline in &item.headlines {
        body.push_str(&format!("## {}\n", headline.title));
        if !headline.key_points.is_empty() {
            for point in &headline.key_points {
                body.push_str(&format!("- {point}\n"));
            }
            body.push('\n');
        }
    }

    if !item.date.is_empty() {
        body.push_str(&format!("\nOriginally published on {}\n\n", item.date));
    }

    if let Some(image) = item.image_url.as_deref().map(str::trim)
        && !image.is_empty()
    {
        body.push_str(&format!("[View news image]({image}) \n"));
    }

    body.push_str(&format!("[Read more here]({})\n", item.url));
    body
}
