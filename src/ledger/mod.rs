// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ledger of news already posted.
//!
//! ```text
//! posted_news.txt
//!   -1425436577      one NewsId per line, appended after each post
//!   98231244
//! ```
//!
//! Blank lines are ignored, unparsable lines are logged and skipped.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{BotResult, LedgerError};
use crate::news::NewsId;

/// Set of posted news ids backed by an append-only file.
#[derive(Debug)]
pub struct PostedLedger {
    path: PathBuf,
    ids: HashSet<NewsId>,
    /// The file ends without a newline; the next append starts a new line.
    missing_newline: bool,
}

impl PostedLedger {
    /// Open the ledger at `path`, creating an empty file if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Read` if the file or its parent directory
    /// cannot be created or read.
    pub fn open(path: impl Into<PathBuf>) -> BotResult<Self> {
        let path = path.into();
        let read_error = |source| LedgerError::Read {
            path: path.display().to_string(),
            source,
        };

        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(read_error)?;
            }
            std::fs::File::create(&path).map_err(read_error)?;
            info!(path = %path.display(), "posted news file not found, created a new one");
        }

        let content = std::fs::read_to_string(&path).map_err(read_error)?;
        let ledger = Self::from_content(path, &content);
        info!(count = ledger.len(), "loaded posted news ids");
        Ok(ledger)
    }

    /// Load the ledger without creating it; a missing file is an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Read` if an existing file cannot be read.
    pub fn peek(path: impl Into<PathBuf>) -> BotResult<Self> {
        let path = path.into();
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Self::from_content(path, &content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self {
                path,
                ids: HashSet::new(),
                missing_newline: false,
            }),
            Err(source) => Err(LedgerError::Read {
                path: path.display().to_string(),
                source,
            }
            .into()),
        }
    }

    fn from_content(path: PathBuf, content: &str) -> Self {
        let mut ids = HashSet::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<NewsId>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(_) => warn!(
                    path = %path.display(),
                    line = number + 1,
                    content = line,
                    "invalid news id in posted news file"
                ),
            }
        }
        Self {
            path,
            ids,
            missing_newline: !content.is_empty() && !content.ends_with('\n'),
        }
    }

    #[must_use]
    pub fn contains(&self, id: NewsId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `id` to the file and remember it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Write` if the file cannot be opened or written.
    pub fn record(&mut self, id: NewsId) -> BotResult<()> {
        let write_error = |source| LedgerError::Write {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_error)?;
        if self.missing_newline {
            writeln!(file).map_err(write_error)?;
        }
        writeln!(file, "{id}").map_err(write_error)?;
        file.flush().map_err(write_error)?;
        self.missing_newline = false;

        debug!(news_id = %id, "recorded posted news id");
        self.ids.insert(id);
        Ok(())
    }
}
