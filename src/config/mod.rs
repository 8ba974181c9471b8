// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. bot.toml (or --config FILE)
//! 3. RYZOM_BOT_* env vars
//! 4. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RYZOM_BOT_REDDIT__PASSWORD=hunter2  → reddit.password = "hunter2"
//! RYZOM_BOT_SOURCE__URL=http://...    → source.url = "http://..."
//! RYZOM_BOT_STATE__POSTED_FILE=/x.txt → state.posted_file = "/x.txt"
//! ```

pub mod loader;
pub mod template;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bot.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RYZOM_BOT";

/// Release notes page scraped by default.
pub const DEFAULT_SOURCE_URL: &str =
    "https://app.ryzom.com/app_releasenotes/index.php?lang=en&ig=1";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reddit account and posting options.
    pub reddit: RedditConfig,
    /// Where release notes come from.
    pub source: SourceConfig,
    /// Local state files.
    pub state: StateConfig,
}

/// Reddit "script" application credentials and posting behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedditConfig {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    /// Target subreddit, without the `r/` prefix.
    pub subreddit: String,
    /// Flair text assigned after submitting. Empty disables flair.
    pub flair_text: String,
    /// Flair template id, empty for a free-text flair.
    pub flair_template_id: String,
    /// Send inbox replies for comments on the post.
    pub send_replies: bool,
    /// Base URL of the token endpoint.
    pub auth_url: String,
    /// Base URL of the OAuth API.
    pub api_url: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            subreddit: String::new(),
            flair_text: "Release Note".to_string(),
            flair_template_id: String::new(),
            send_replies: false,
            auth_url: "https://www.reddit.com".to_string(),
            api_url: "https://oauth.reddit.com".to_string(),
        }
    }
}

impl RedditConfig {
    /// Check that every credential needed to post is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` for the first blank required key.
    pub fn require_credentials(&self) -> std::result::Result<(), ConfigError> {
        let required = [
            ("username", &self.username),
            ("password", &self.password),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("subreddit", &self.subreddit),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "reddit".to_string(),
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Subreddit name with any `r/` or `/r/` prefix removed.
    #[must_use]
    pub fn subreddit_name(&self) -> &str {
        let name = self.subreddit.trim();
        let name = name.strip_prefix('/').unwrap_or(name);
        name.strip_prefix("r/").unwrap_or(name)
    }
}

/// Release notes source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Page listing the release notes.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateConfig {
    /// Ledger of already posted news ids.
    pub posted_file: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            posted_file: PathBuf::from("posted_news.txt"),
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ryzom_reddit_bot::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("bot.toml")
    ///     .with_env_prefix("RYZOM_BOT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that deserialize fine but make no sense.
    ///
    /// Credentials are not checked here so that `preview` and `options`
    /// work with an unfilled template; see
    /// [`RedditConfig::require_credentials`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout or an empty
    /// source URL or ledger path.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.source.url.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "source".to_string(),
                key: "url".to_string(),
            });
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                section: "source".to_string(),
                key: "timeout_secs".to_string(),
                message: "timeout must be at least one second".to_string(),
            });
        }
        if self.state.posted_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "state".to_string(),
                key: "posted_file".to_string(),
            });
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Secrets are replaced with `[hidden]`; output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let hidden = |value: &str| {
            if value.is_empty() {
                String::new()
            } else {
                "[hidden]".to_string()
            }
        };

        let mut options = BTreeMap::new();
        options.insert("reddit.username", self.reddit.username.clone());
        options.insert("reddit.password", hidden(&self.reddit.password));
        options.insert("reddit.client_id", self.reddit.client_id.clone());
        options.insert("reddit.client_secret", hidden(&self.reddit.client_secret));
        options.insert("reddit.subreddit", self.reddit.subreddit.clone());
        options.insert("reddit.flair_text", self.reddit.flair_text.clone());
        options.insert(
            "reddit.flair_template_id",
            self.reddit.flair_template_id.clone(),
        );
        options.insert("reddit.send_replies", self.reddit.send_replies.to_string());
        options.insert("reddit.auth_url", self.reddit.auth_url.clone());
        options.insert("reddit.api_url", self.reddit.api_url.clone());
        options.insert("source.url", self.source.url.clone());
        options.insert("source.timeout_secs", self.source.timeout_secs.to_string());
        options.insert(
            "state.posted_file",
            self.state.posted_file.display().to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
