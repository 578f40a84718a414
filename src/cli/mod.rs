// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for devex-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! devex [global options] <command>
//! gitlab|gl    clone|cl [-r] [-c ssh|https] [-m name|full-path|id] GROUP [PATH]
//! github|gh    clone|cl [-r] [-c ssh|https] ORG [PATH]
//! terraform|tf taint-secrets|ts [-u] MODULE
//! config
//! version
//! ```

pub mod github;
pub mod gitlab;
pub mod global;
pub mod terraform;


use crate::cli::github::GithubArgs;
use crate::cli::gitlab::GitlabArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::terraform::TerraformArgs;
use clap::{Parser, Subcommand};

/// Developer experience tools, saving time by automating gruntwork.
#[derive(Debug, Parser)]
#[command(
    name = "devex",
    author,
    version,
    about = "Developer experience tools, saving time by automating gruntwork",
    long_about = "devex-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  A collection of tools automating day to day developer tasks,\n\
                  grouped by the platform they work against: GitLab, GitHub\n\
                  and Terraform.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `devex.toml` in the current directory,\n\
                  then from every --config file, then from DEVEX_SECTION__KEY\n\
                  environment variables (e.g. DEVEX_CLONE__CONCURRENCY=4).\n\
                  GITLAB_URL, GITLAB_TOKEN, GITHUB_URL, GITHUB_TOKEN,\n\
                  TERRAFORM_COMMAND and TERRAFORM_SECRETS override all of them.\n\
                  Run `devex config` to print the effective settings."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// GitLab tools.
    #[command(visible_alias = "gl")]
    Gitlab(GitlabArgs),

    /// GitHub tools.
    #[command(visible_alias = "gh")]
    Github(GithubArgs),

    /// Terraform tools.
    #[command(visible_alias = "tf")]
    Terraform(TerraformArgs),

    /// Lists all options and their effective values.
    Config,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
