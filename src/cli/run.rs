// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `run`, `preview` and `init`.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Log what would be posted; nothing is sent or recorded.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Release notes page, overrides source.url.
    #[arg(long = "source-url", value_name = "URL")]
    pub source_url: Option<String>,

    /// Posted news ledger, overrides state.posted_file.
    #[arg(long = "state-file", value_name = "FILE")]
    pub state_file: Option<PathBuf>,
}

/// Arguments for the `preview` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PreviewArgs {
    /// Parse a saved page instead of fetching.
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "source_url")]
    pub file: Option<PathBuf>,

    /// Print the parsed items as JSON.
    #[arg(long)]
    pub json: bool,

    /// Release notes page, overrides source.url.
    #[arg(long = "source-url", value_name = "URL")]
    pub source_url: Option<String>,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}
