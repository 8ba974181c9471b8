// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     <- TOML config (default bot.toml)
//! --log-level N     <- Console verbosity (0-5)
//! --file-log-level  <- File verbosity (overrides --log-level)
//! --log-file FILE   <- Appended log file (default app.log)
//! --set KEY=VAL     <- Direct config override
//!
//! Precedence: --set > RYZOM_BOT_* env > config file > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Default log file, appended to on every run.
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Global options available for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Path to the TOML configuration file.
    /// A commented template is written there on first run.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config: PathBuf,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5), global = true
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5), global = true
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,

    /// Only log to the console.
    #[arg(long = "no-log-file", global = true)]
    pub no_log_file: bool,

    /// Sets an option, such as 'reddit.subreddit=Ryzom'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append, global = true)]
    pub options: Vec<String>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            log_level: None,
            file_log_level: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            no_log_file: false,
            options: Vec::new(),
        }
    }
}

impl GlobalOptions {
    /// Log file to write, if any.
    #[must_use]
    pub fn effective_log_file(&self) -> Option<&PathBuf> {
        (!self.no_log_file).then_some(&self.log_file)
    }
}
