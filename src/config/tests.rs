// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::parse_override;
use super::template::{Export, TEMPLATE, export_template};
use super::{Config, ConfigLoader, DEFAULT_SOURCE_URL, RedditConfig};
use crate::error::ConfigError;
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn filled_reddit() -> RedditConfig {
    RedditConfig {
        username: "ryzom_bot".to_string(),
        password: "secret".to_string(),
        client_id: "abc123".to_string(),
        client_secret: "shh".to_string(),
        subreddit: "Ryzom".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
    assert_eq!(config.source.timeout_secs, 30);
    assert_eq!(config.state.posted_file, PathBuf::from("posted_news.txt"));
    assert_eq!(config.reddit.flair_text, "Release Note");
    assert!(!config.reddit.send_replies);
    assert_eq!(config.reddit.auth_url, "https://www.reddit.com");
    assert_eq!(config.reddit.api_url, "https://oauth.reddit.com");
}

#[test]
fn test_template_parses_to_defaults() {
    let config = Config::parse(TEMPLATE).expect("template should parse");
    assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
    assert_eq!(config.reddit.flair_text, "Release Note");
    assert!(config.reddit.username.is_empty());
}

#[test]
fn test_template_needs_credentials() {
    let config = Config::parse(TEMPLATE).unwrap();
    let err = config.reddit.require_credentials().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'username' in section '[reddit]'");
}

#[test]
fn test_require_credentials_reports_first_blank() {
    let mut reddit = filled_reddit();
    assert!(reddit.require_credentials().is_ok());

    reddit.client_secret = "   ".to_string();
    match reddit.require_credentials() {
        Err(ConfigError::MissingKey { section, key }) => {
            assert_eq!(section, "reddit");
            assert_eq!(key, "client_secret");
        }
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn test_subreddit_name_strips_prefix() {
    let mut reddit = filled_reddit();
    for (input, expected) in [
        ("Ryzom", "Ryzom"),
        ("r/Ryzom", "Ryzom"),
        ("/r/Ryzom", "Ryzom"),
        (" Ryzom ", "Ryzom"),
    ] {
        reddit.subreddit = input.to_string();
        assert_eq!(reddit.subreddit_name(), expected, "input {input:?}");
    }
}

#[test]
fn test_parse_rejects_unknown_keys() {
    let toml = r#"
[reddit]
usernme = "typo"
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_zero_timeout_is_invalid() {
    let toml = r"
[source]
timeout_secs = 0
";
    let err = Config::parse(toml).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().expect("ConfigError");
    assert!(matches!(config_err, ConfigError::InvalidValue { key, .. } if key == "timeout_secs"));
}

#[test]
fn test_set_override_wins_over_file() {
    let config = ConfigLoader::new()
        .add_toml_str(
            r#"
[reddit]
subreddit = "Ryzom"
send_replies = false
"#,
        )
        .set_override("reddit.subreddit=RyzomTest")
        .unwrap()
        .set_override("reddit.send_replies=true")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.reddit.subreddit, "RyzomTest");
    assert!(config.reddit.send_replies);
}

#[test]
fn test_parse_override() {
    assert_eq!(
        parse_override("reddit.subreddit = Ryzom").unwrap(),
        ("reddit.subreddit", "Ryzom")
    );
    assert_eq!(
        parse_override("source.url=https://x.test/?a=b").unwrap(),
        ("source.url", "https://x.test/?a=b")
    );
    assert!(parse_override("subreddit=Ryzom").is_err());
    assert!(parse_override("reddit.subreddit").is_err());
    assert!(parse_override(".key=value").is_err());
}

#[test]
fn test_format_options_hides_secrets() {
    let config = Config {
        reddit: filled_reddit(),
        ..Default::default()
    };
    let lines = config.format_options();

    assert!(lines.iter().any(|l| l.ends_with("= [hidden]") && l.starts_with("reddit.password")));
    assert!(lines.iter().any(|l| l.ends_with("= [hidden]") && l.starts_with("reddit.client_secret")));
    assert!(lines.iter().all(|l| !l.contains("secret") || l.starts_with("reddit.client_secret")));
    assert!(lines.iter().any(|l| l.starts_with("reddit.username") && l.ends_with("= ryzom_bot")));
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let lines = Config::default().format_options();
    let keys: Vec<_> = lines
        .iter()
        .map(|l| l.split_whitespace().next().unwrap_or_default().to_string())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    let eq_columns: Vec<_> = lines.iter().filter_map(|l| l.find(" = ")).collect();
    assert!(eq_columns.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_export_template_writes_and_keeps() {
    let temp = temp_dir();
    let path = temp.path().join("nested").join("bot.toml");

    assert_eq!(export_template(&path, false).unwrap(), Export::Written);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);

    std::fs::write(&path, "[reddit]\nsubreddit = \"Mine\"\n").unwrap();
    assert_eq!(export_template(&path, false).unwrap(), Export::Kept);
    assert!(std::fs::read_to_string(&path).unwrap().contains("Mine"));

    assert_eq!(export_template(&path, true).unwrap(), Export::Written);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);
}

#[test]
fn test_from_file_missing_is_error() {
    let temp = temp_dir();
    assert!(Config::from_file(temp.path().join("absent.toml")).is_err());
}
