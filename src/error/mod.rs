// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          BotError (~16 bytes)
//!                 |
//!   +-------+-------+-------+-------+
//!   |       |       |       |       |
//!   v       v       v       v       v
//!  Net    Cfg   Reddit  Ledger  Scrape
//!  Box    Box    Box     Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Network Reqwest, HttpError, Timeout, InvalidUrl
//!   Config  ParseError, MissingKey, InvalidValue, ExportFailed, AlreadyExists
//!   Reddit  Auth, Api, RateLimited, UnexpectedResponse
//!   Ledger  Read, Write
//!   Scrape  InvalidSelector, InvalidPattern
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BotError`].
pub type BotResult<T> = std::result::Result<T, BotError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~16 bytes on the stack.
#[derive(Debug, Error)]
pub enum BotError {
    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Reddit API rejected a request.
    #[error("reddit error: {0}")]
    Reddit(#[from] Box<RedditError>),

    /// Posted-news ledger could not be read or written.
    #[error("ledger error: {0}")]
    Ledger(#[from] Box<LedgerError>),

    /// Release notes page could not be scraped.
    #[error("scrape error: {0}")]
    Scrape(#[from] Box<ScrapeError>),
}

impl BotError {
    /// Whether this error means Reddit asked us to slow down.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Reddit(e) if matches!(**e, RedditError::RateLimited { .. }))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BotError {
                fn from(err: $error) -> Self {
                    BotError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    NetworkError => Network,
    ConfigError => Config,
    RedditError => Reddit,
    LedgerError => Ledger,
    ScrapeError => Scrape,
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Request timed out.
    #[error("request timed out: {url}")]
    Timeout { url: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Writing the config template failed.
    #[error("failed to write config template '{path}': {source}")]
    ExportFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file exists and overwriting was not requested.
    #[error("config file already exists: {0}")]
    AlreadyExists(String),
}

// --- Reddit Errors ---

/// Reddit API errors.
#[derive(Debug, Error)]
pub enum RedditError {
    /// Token request was refused.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// API answered with an error list.
    #[error("{endpoint} rejected the request: {errors}")]
    Api { endpoint: String, errors: String },

    /// Rate limit hit.
    #[error(
        "rate limited on {endpoint}{}",
        .retry_after_secs.map(|s| format!(" (retry after {s}s)")).unwrap_or_default()
    )]
    RateLimited {
        endpoint: String,
        retry_after_secs: Option<u64>,
    },

    /// Response body did not match the documented envelope.
    #[error("unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },
}

// --- Ledger Errors ---

/// Posted-news ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Reading (or creating) the ledger failed.
    #[error("failed to read ledger '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Appending to the ledger failed.
    #[error("failed to append to ledger '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Scrape Errors ---

/// HTML scraping errors.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A CSS selector failed to compile.
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A style pattern failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
