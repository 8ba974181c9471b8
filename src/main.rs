// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Run (default) | Preview | Init | Options | Version
//! ```

use std::process::ExitCode;

use ryzom_reddit_bot::cli::global::GlobalOptions;
use ryzom_reddit_bot::cli::run::RunArgs;
use ryzom_reddit_bot::cli::{self, Command};
use ryzom_reddit_bot::cmd::config::{ensure_config_file, run_init_command, run_options_command};
use ryzom_reddit_bot::cmd::preview::run_preview_command;
use ryzom_reddit_bot::cmd::run::run_run_command;
use ryzom_reddit_bot::config::loader::ConfigLoader;
use ryzom_reddit_bot::config::{Config, ENV_PREFIX};
use ryzom_reddit_bot::logging::init_logging;
use ryzom_reddit_bot::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(
            global
                .effective_log_file()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Init(args)) => run_init_command(args, &cli.global.config),
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Preview(args)) => match load_config(&cli.global) {
            Ok(config) => run_preview_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Run(args)) => handle_run_command(args, &cli.global).await,
        None => handle_run_command(&RunArgs::default(), &cli.global).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn handle_run_command(
    args: &RunArgs,
    global: &GlobalOptions,
) -> ryzom_reddit_bot::error::Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        cwd = %std::env::current_dir().unwrap_or_default().display(),
        "starting ryzom-reddit-bot"
    );
    ensure_config_file(&global.config)?;
    let config = load_config(global)?;
    run_run_command(args, &config).await
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ryzom_reddit_bot::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new()
        .add_toml_file_optional(&global.config)
        .with_env_prefix(ENV_PREFIX);
    for option in &global.options {
        loader = loader.set_override(option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> ryzom_reddit_bot::error::Result<Config> {
    build_config_loader(global)?.build().map_err(|e| {
        eprintln!("Failed to load config: {e:#}");
        e
    })
}
