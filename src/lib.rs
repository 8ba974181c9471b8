// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          run / preview / init
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, env, --set layers  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!                bot         net     ledger
//!             pipeline    page GET  posted ids
//!               |
//!          +----+-----+
//!          v          v
//!        news       reddit
//!   parser/markdown  OAuth2 API
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod bot;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod net;
pub mod news;
pub mod reddit;
