// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> ExitCode
//!   gitlab, github  (discovery stream --> replicate)
//!   terraform, config
//! ```

mod replicate;

pub mod config;
pub mod github;
pub mod gitlab;
pub mod terraform;


use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Loads the configuration from every source named by `global`.
///
/// # Errors
///
/// Returns an error if a required file is missing or a value is invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    global.config_loader()?.build()
}
