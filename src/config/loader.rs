// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix()
//!   .set()
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    overrides: Vec<(String, String)>,
    /// Sources in load order, named in parse errors.
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            overrides: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(p.to_path_buf());
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(p.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files.push(PathBuf::from("<string>"));
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables, e.g. `RYZOM_BOT_REDDIT__PASSWORD`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override such as `reddit.subreddit=Ryzom`.
    ///
    /// Overrides are applied after files and environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the override is not of the
    /// form `section.key=value`.
    pub fn set_override(mut self, option: &str) -> Result<Self> {
        let (key, value) = parse_override(option)?;
        self.overrides.push((key.to_string(), value.to_string()));
        Ok(self)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    /// - A value fails validation (see [`Config::validate`]).
    pub fn build(self) -> Result<Config> {
        let mut builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__"),
            ),
            None => self.builder,
        };
        for (key, value) in self.overrides {
            builder = builder
                .set_override(key.as_str(), value)
                .map_err(|e| ConfigError::InvalidValue {
                    section: key.split('.').next().unwrap_or_default().to_string(),
                    key: key.clone(),
                    message: e.to_string(),
                })?;
        }

        let source = self
            .files
            .last()
            .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string());
        let cfg = builder.build().map_err(|e| ConfigError::ParseError {
            path: source.clone(),
            message: e.to_string(),
        })?;
        let config: Config = cfg
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError {
                path: source,
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a `section.key=value` override into key and value.
///
/// # Errors
///
/// Returns a `ConfigError::InvalidValue` if there is no `=` or the key has
/// no section.
pub fn parse_override(option: &str) -> std::result::Result<(&str, &str), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: "cli".to_string(),
        key: "--set".to_string(),
        message: format!("{message}: '{option}'"),
    };

    let (key, value) = option
        .split_once('=')
        .ok_or_else(|| invalid("expected section.key=value"))?;
    let key = key.trim();
    match key.split_once('.') {
        Some((section, name)) if !section.is_empty() && !name.is_empty() => {
            Ok((key, value.trim()))
        }
        _ => Err(invalid("key must be qualified with its section")),
    }
}
