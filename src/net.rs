// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Page fetching.
//!
//! ```text
//! PageFetcher::new()
//!   .url() .header() .timeout()
//!        |
//!        v
//!   fetch_string() --> body
//!
//! Global client: OnceLock, connection pool, keep-alive
//! ```

use crate::error::{BotResult, NetworkError};
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Global HTTP client - initialized once, reused across all fetches.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("ryzom-reddit-bot/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// HTTP GET with builder pattern.
///
/// # Example
/// ```ignore
/// use ryzom_reddit_bot::net::PageFetcher;
///
/// let html = PageFetcher::new()
///     .url("https://app.ryzom.com/app_releasenotes/index.php?lang=en&ig=1")
///     .timeout(Duration::from_secs(30))
///     .fetch_string()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    url: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            url: None,
            headers: Vec::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a custom header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whole-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fetch the configured URL and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured, the request fails or
    /// times out, or the server answers with a non-success status code.
    pub async fn fetch_string(&self) -> BotResult<String> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()))?;

        let mut request = self.client.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                NetworkError::Timeout { url: url.clone() }
            } else if e.is_builder() {
                NetworkError::InvalidUrl(url.clone())
            } else {
                NetworkError::Reqwest(e)
            }
        };

        debug!(url = %url, "fetching page");
        let response = request.send().await.map_err(map_err)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.clone(),
            }
            .into());
        }

        let text = response.text().await.map_err(map_err)?;
        debug!(url = %url, bytes = text.len(), "page fetched");
        Ok(text)
    }
}
