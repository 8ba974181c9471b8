// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use std::path::Path;

use tracing::{info, warn};

use crate::cli::run::InitArgs;
use crate::config::Config;
use crate::config::template::{Export, export_template};
use crate::error::{ConfigError, Result};

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Write the config template to `path`.
///
/// # Errors
///
/// Returns `ConfigError::AlreadyExists` if the file exists and `--force`
/// was not given, or an error if it cannot be written.
pub fn run_init_command(args: &InitArgs, path: &Path) -> Result<()> {
    match export_template(path, args.force)? {
        Export::Written => {
            println!("Wrote {}", path.display());
            Ok(())
        }
        Export::Kept => Err(ConfigError::AlreadyExists(path.display().to_string()).into()),
    }
}

/// Export the template when `path` is missing so there is something to fill in.
///
/// # Errors
///
/// Returns an error if the template cannot be written.
pub fn ensure_config_file(path: &Path) -> Result<()> {
    if export_template(path, false)? == Export::Written {
        warn!(
            path = %path.display(),
            "no config file found, wrote a template; fill in the [reddit] section"
        );
    } else {
        info!(path = %path.display(), "using config file");
    }
    Ok(())
}
