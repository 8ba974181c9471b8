// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commented config template shipped inside the binary.

use std::path::Path;

use tracing::info;

use crate::error::ConfigError;

/// Template written by `init` and on first run.
pub const TEMPLATE: &str = include_str!("template.toml");

/// Outcome of [`export_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Export {
    /// The template was written.
    Written,
    /// A file was already there and was left alone.
    Kept,
}

/// Write the template to `path`.
///
/// An existing file is kept unless `overwrite` is set.
///
/// # Errors
///
/// Returns `ConfigError::ExportFailed` if the file or its parent directory
/// cannot be written.
pub fn export_template(path: &Path, overwrite: bool) -> Result<Export, ConfigError> {
    if path.exists() && !overwrite {
        return Ok(Export::Kept);
    }

    let failed = |source| ConfigError::ExportFailed {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(failed)?;
    }
    std::fs::write(path, TEMPLATE).map_err(failed)?;

    info!(path = %path.display(), "exported config template");
    Ok(Export::Written)
}
