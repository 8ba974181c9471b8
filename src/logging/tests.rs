// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);
}

#[test]
fn test_filter_strings_quiet_dependencies() {
    let filters: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();

    assert_eq!(
        filters,
        [
            "off",
            "error",
            "warn",
            "warn,ryzom_reddit_bot=info",
            "warn,ryzom_reddit_bot=debug",
            "trace",
        ]
    );
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::INFO);
    assert!(config.log_file().is_none());
    assert!(config.ansi());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_file_level(LogLevel::DEBUG)
        .with_log_file("logs/app.log".to_string())
        .with_ansi(false)
        .build();

    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("logs/app.log"));
    assert!(!config.ansi());
}
