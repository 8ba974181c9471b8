// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! ryzom-reddit-bot [global options] [command]
//! run [--dry-run]        (default)
//! preview [--file F] [--json]
//! init [--force]
//! options
//! version
//! ```

pub mod global;
pub mod run;


use crate::cli::global::GlobalOptions;
use crate::cli::run::{InitArgs, PreviewArgs, RunArgs};
use clap::{Parser, Subcommand};

/// Ryzom release notes to Reddit.
#[derive(Debug, Parser)]
#[command(
    name = "ryzom-reddit-bot",
    author,
    version,
    about = "Posts Ryzom release notes to Reddit",
    long_about = "ryzom-reddit-bot Copyright (C) 2026 RyzomApps contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads the Ryzom release notes page and posts every entry that\n\
                  was not posted before as a text post to a subreddit.\n\
                  Invoking `ryzom-reddit-bot` without a command does a `run`.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `bot.toml` (see --config), then from\n\
                  RYZOM_BOT_<SECTION>__<KEY> environment variables, e.g.\n\
                  RYZOM_BOT_REDDIT__PASSWORD, then from --set section.key=value.\n\
                  If the config file is missing, `run` writes a commented template\n\
                  to fill in."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Posts new release notes (default).
    Run(RunArgs),

    /// Shows what would be posted without touching Reddit or the ledger.
    Preview(PreviewArgs),

    /// Writes a commented config template.
    Init(InitArgs),

    /// Lists all options and their effective values.
    Options,

    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
