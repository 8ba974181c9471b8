// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reddit OAuth2 client for "script" applications.
//!
//! ```text
//! authenticate()
//!   POST {auth_url}/api/v1/access_token   basic(client_id, secret)
//!        grant_type=password               --> bearer token
//!
//! submit()
//!   POST {api_url}/api/submit              kind=self, sr, title, text
//!        --> {"json": {"errors": [], "data": {"id", "name", "url"}}}
//!
//! select_flair()
//!   POST {api_url}/r/{sr}/api/selectflair  link, flair_template_id, text
//! ```

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use super::{Flair, Publisher, SelfPost, Submission};
use crate::config::RedditConfig;
use crate::error::{BotResult, NetworkError, RedditError};

const TOKEN_ENDPOINT: &str = "/api/v1/access_token";
const SUBMIT_ENDPOINT: &str = "/api/submit";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated Reddit API client.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: Client,
    api_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
    error: Option<serde_json::Value>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    json: ApiBody<T>,
}

#[derive(Debug, Deserialize)]
struct ApiBody<T> {
    #[serde(default)]
    errors: Vec<Vec<serde_json::Value>>,
    /// Seconds until posting is allowed again.
    ratelimit: Option<f64>,
    data: Option<T>,
}

impl<T> ApiBody<T> {
    fn into_result(self, endpoint: &str) -> BotResult<Option<T>> {
        if self.errors.is_empty() {
            return Ok(self.data);
        }

        let rate_limited = self
            .errors
            .iter()
            .any(|error| error.first().and_then(|code| code.as_str()) == Some("RATELIMIT"));
        if rate_limited {
            return Err(RedditError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after_secs: self.ratelimit.map(seconds_from_f64),
            }
            .into());
        }

        Err(RedditError::Api {
            endpoint: endpoint.to_string(),
            errors: format_api_errors(&self.errors),
        }
        .into())
    }
}

/// Render `[["CODE", "message", "field"], ...]` as `CODE: message (field); ...`.
pub(crate) fn format_api_errors(errors: &[Vec<serde_json::Value>]) -> String {
    errors
        .iter()
        .map(|error| {
            let part = |i: usize| error.get(i).and_then(|v| v.as_str()).unwrap_or_default();
            let mut line = part(0).to_string();
            if !part(1).is_empty() {
                line.push_str(&format!(": {}", part(1)));
            }
            if !part(2).is_empty() {
                line.push_str(&format!(" ({})", part(2)));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// User agent in the form Reddit asks script apps to use.
#[must_use]
pub fn user_agent(settings: &RedditConfig) -> String {
    format!(
        "RyzomRedditBot:{}:{} (by /u/{})",
        settings.client_id,
        env!("CARGO_PKG_VERSION"),
        settings.username
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_from_f64(seconds: f64) -> u64 {
    seconds.max(0.0).ceil() as u64
}

/// Seconds to wait according to `retry-after` or `x-ratelimit-reset`.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<u64> {
    ["retry-after", "x-ratelimit-reset"].iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .map(seconds_from_f64)
    })
}

impl RedditClient {
    /// Exchange the account credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `RedditError::Auth` if Reddit refuses the credentials, or a
    /// `NetworkError` if the request fails.
    pub async fn authenticate(settings: &RedditConfig) -> BotResult<Self> {
        let http = Client::builder()
            .user_agent(user_agent(settings))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(NetworkError::Reqwest)?;

        let url = format!("{}{TOKEN_ENDPOINT}", settings.auth_url.trim_end_matches('/'));
        debug!(url = %url, username = %settings.username, "requesting access token");

        let response = http
            .post(&url)
            .basic_auth(&settings.client_id, Some(&settings.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", settings.username.as_str()),
                ("password", settings.password.as_str()),
            ])
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(NetworkError::Reqwest)?;
        let token: Option<TokenResponse> = serde_json::from_str(&body).ok();

        match token {
            Some(TokenResponse {
                access_token: Some(access_token),
                expires_in,
                scope,
                error: None,
                ..
            }) if status.is_success() => {
                info!(
                    username = %settings.username,
                    expires_in,
                    scope = scope.as_deref().unwrap_or_default(),
                    "authenticated with Reddit"
                );
                Ok(Self {
                    http,
                    api_url: settings.api_url.trim_end_matches('/').to_string(),
                    access_token,
                })
            }
            Some(TokenResponse { error, message, .. }) => {
                let message = message
                    .or_else(|| error.map(|e| e.as_str().map_or_else(|| e.to_string(), String::from)))
                    .unwrap_or_else(|| format!("http {}", status.as_u16()));
                Err(RedditError::Auth { message }.into())
            }
            None => Err(RedditError::Auth {
                message: format!("http {}: unexpected token response", status.as_u16()),
            }
            .into()),
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> BotResult<Option<T>> {
        let url = format!("{}{endpoint}", self.api_url);
        debug!(url = %url, "posting to Reddit API");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .form(form)
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RedditError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after_secs: retry_after(response.headers()),
            }
            .into());
        }
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let envelope: ApiEnvelope<T> =
            response
                .json()
                .await
                .map_err(|e| RedditError::UnexpectedResponse {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                })?;
        envelope.json.into_result(endpoint)
    }
}

impl Publisher for RedditClient {
    async fn submit(&self, post: &SelfPost) -> BotResult<Submission> {
        let send_replies = if post.send_replies { "true" } else { "false" };
        let form = [
            ("api_type", "json"),
            ("kind", "self"),
            ("sr", post.subreddit.as_str()),
            ("title", post.title.as_str()),
            ("text", post.text.as_str()),
            ("sendreplies", send_replies),
            ("resubmit", "true"),
        ];

        let submission: Submission = self
            .post_form(SUBMIT_ENDPOINT, &form)
            .await?
            .ok_or_else(|| RedditError::UnexpectedResponse {
                endpoint: SUBMIT_ENDPOINT.to_string(),
                message: "response has no data".to_string(),
            })?;

        info!(
            id = %submission.id,
            subreddit = %post.subreddit,
            url = %submission.url,
            "posted to Reddit"
        );
        Ok(submission)
    }

    async fn select_flair(&self, subreddit: &str, fullname: &str, flair: &Flair) -> BotResult<()> {
        let endpoint = format!("/r/{subreddit}/api/selectflair");
        let form = [
            ("api_type", "json"),
            ("link", fullname),
            ("flair_template_id", flair.template_id.as_str()),
            ("text", flair.text.as_str()),
        ];

        self.post_form::<serde_json::Value>(&endpoint, &form)
            .await?;

        info!(fullname, flair = %flair.text, "flair set");
        Ok(())
    }
}
