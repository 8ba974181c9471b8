// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the command-line binary.
//!
//! Each test runs the built binary in its own temporary working directory.

use clap::Parser;
use ryzom_reddit_bot::cli::{Cli, Command};
use ryzom_reddit_bot::cmd::preview::render_preview;
use ryzom_reddit_bot::ledger::PostedLedger;
use ryzom_reddit_bot::news::NewsItem;
use std::path::Path;
use std::process::{Command as Process, Output};
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/release_notes.html");

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn bot(cwd: &Path, args: &[&str]) -> Output {
    Process::new(env!("CARGO_BIN_EXE_ryzom-reddit-bot"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["ryzom-reddit-bot", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_unknown_command_is_error() {
    assert!(Cli::try_parse_from(["ryzom-reddit-bot", "post"]).is_err());
}

// =============================================================================
// Preview rendering
// =============================================================================

#[test]
fn preview_text_lists_oldest_first_with_count() {
    let temp = temp_dir();
    let newer = NewsItem::from_header("2025-05-02: Newer", "https://x.test/2", None, Vec::new());
    let older = NewsItem::from_header("2025-05-01: Older", "https://x.test/1", None, Vec::new());
    std::fs::write(temp.path().join("posted.txt"), format!("{}\n", older.id())).unwrap();
    let ledger = PostedLedger::peek(temp.path().join("posted.txt")).unwrap();

    let out = render_preview(&[newer.clone(), older.clone()], &ledger, false).unwrap();

    let headers: Vec<_> = out.lines().filter(|l| l.starts_with("=== ")).collect();
    assert_eq!(
        headers,
        [
            format!("=== [posted] Older ({}) ===", older.id()),
            format!("=== [new] Newer ({}) ===", newer.id()),
        ]
    );
    assert!(out.ends_with("2 entries\n"));
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn bin_version() {
    let temp = temp_dir();
    let output = bot(temp.path(), &["--no-log-file", "version"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn bin_init_refuses_overwrite_without_force() {
    let temp = temp_dir();

    let first = bot(temp.path(), &["--no-log-file", "init"]);
    assert!(first.status.success(), "{}", stderr(&first));
    assert!(temp.path().join("bot.toml").exists());

    let second = bot(temp.path(), &["--no-log-file", "init"]);
    assert!(!second.status.success());
    assert!(stderr(&second).contains("config file already exists"));

    let forced = bot(temp.path(), &["--no-log-file", "init", "--force"]);
    assert!(forced.status.success(), "{}", stderr(&forced));
}

#[test]
fn bin_options_layers_env_and_set() {
    let temp = temp_dir();
    std::fs::write(
        temp.path().join("bot.toml"),
        "[reddit]\nusername = \"from_file\"\nsubreddit = \"from_file\"\n",
    )
    .unwrap();

    let output = Process::new(env!("CARGO_BIN_EXE_ryzom-reddit-bot"))
        .current_dir(temp.path())
        .args(["--no-log-file", "-s", "reddit.subreddit=from_set", "options"])
        .env("RYZOM_BOT_REDDIT__SUBREDDIT", "from_env")
        .env("RYZOM_BOT_REDDIT__PASSWORD", "hunter2")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    let line = |key: &str| {
        out.lines()
            .find(|l| l.starts_with(key))
            .map(|l| l.split_once(" = ").map_or("", |(_, v)| v).to_string())
            .unwrap_or_default()
    };
    assert_eq!(line("reddit.username "), "from_file");
    assert_eq!(line("reddit.subreddit "), "from_set");
    assert_eq!(line("reddit.password "), "[hidden]");
    assert!(!out.contains("hunter2"));
}

#[test]
fn bin_preview_file() {
    let temp = temp_dir();
    let output = bot(temp.path(), &["--no-log-file", "preview", "--file", FIXTURE]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("=== [new] New Event Hide n Hype ("));
    assert!(out.contains("[View news image](https://app.ryzom.com/images/hide_n_hype.jpg)"));
    assert!(out.ends_with("3 entries\n"));
    assert!(!temp.path().join("posted_news.txt").exists());
}

#[test]
fn bin_preview_json_marks_posted() {
    let temp = temp_dir();
    let id = ryzom_reddit_bot::news::NewsId::from_url("https://forums.ryzom.com/t/hotfix-2025-02-01");
    std::fs::write(temp.path().join("posted_news.txt"), format!("{id}\n")).unwrap();

    let output = bot(
        temp.path(),
        &["--no-log-file", "preview", "--json", "--file", FIXTURE],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["date"], "2025-02-01");
    assert_eq!(entries[0]["id"], id.value());
    assert_eq!(entries[0]["posted"], true);
    assert_eq!(entries[2]["title"], "New Event Hide n Hype");
    assert_eq!(entries[2]["posted"], false);
}

#[test]
fn bin_run_without_config_exports_template_and_fails() {
    let temp = temp_dir();
    let output = bot(temp.path(), &["-l", "0"]);

    assert!(!output.status.success());
    assert!(temp.path().join("bot.toml").exists());
    assert!(stderr(&output).contains("missing required config key 'username'"));
    assert!(temp.path().join("app.log").exists());
    assert!(!temp.path().join("posted_news.txt").exists());
}
