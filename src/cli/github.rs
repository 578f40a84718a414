// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub command arguments.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::git::CloneProtocolKind;

/// Arguments for the `github` command.
#[derive(Debug, Clone, Args)]
#[command(after_help = "The GitHub API URL and token are read from GITHUB_URL and \
                        GITHUB_TOKEN. No token is needed for public organizations.")]
pub struct GithubArgs {
    #[command(subcommand)]
    pub subcommand: GithubSubcommand,
}

/// GitHub subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum GithubSubcommand {
    /// Clones every repository of a GitHub organization.
    #[command(visible_alias = "cl")]
    Clone(GithubCloneArgs),
}

/// Arguments for `github clone`.
#[derive(Debug, Clone, Args)]
pub struct GithubCloneArgs {
    /// Initialize repository submodules. Repositories already cloned get their
    /// submodules initialized instead.
    #[arg(short = 'r', long = "recurse-submodules")]
    pub recurse_submodules: bool,

    /// Transport protocol used to clone the repositories.
    #[arg(short = 'c', long = "clone-protocol", value_enum, default_value_t)]
    pub clone_protocol: CloneProtocolKind,

    /// The GitHub organization to clone.
    #[arg(value_name = "ORG")]
    pub organization: String,

    /// The local path where to create the organization clone.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}
