// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   run, preview, config (init, options)
//! ```

pub mod config;
pub mod preview;
pub mod run;
