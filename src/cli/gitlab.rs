// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab command arguments.
//!
//! ```text
//! gitlab clone GROUP [PATH]
//!   → every project of GROUP and its sub-groups, cloned below PATH
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::git::CloneProtocolKind;
use crate::gitlab::GroupSearchMode;

/// Arguments for the `gitlab` command.
#[derive(Debug, Clone, Args)]
#[command(after_help = "The GitLab URL and private token are read from GITLAB_URL and \
                        GITLAB_TOKEN. The token is used both for the API and as the HTTPS \
                        clone password. No token is needed for public groups.")]
pub struct GitlabArgs {
    #[command(subcommand)]
    pub subcommand: GitlabSubcommand,
}

/// GitLab subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum GitlabSubcommand {
    /// Clones an entire GitLab group with all sub-groups and projects.
    #[command(visible_alias = "cl")]
    Clone(GitlabCloneArgs),
}

/// Arguments for `gitlab clone`.
#[derive(Debug, Clone, Args)]
pub struct GitlabCloneArgs {
    /// Initialize project submodules. Projects already cloned get their
    /// submodules initialized instead.
    #[arg(short = 'r', long = "recurse-submodules")]
    pub recurse_submodules: bool,

    /// Transport protocol used to clone the projects.
    #[arg(short = 'c', long = "clone-protocol", value_enum, default_value_t)]
    pub clone_protocol: CloneProtocolKind,

    /// How the group is searched for.
    #[arg(short = 'm', long = "search-mode", value_enum, default_value_t)]
    pub search_mode: GroupSearchMode,

    /// The GitLab group to clone.
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// The local path where to create the group clone.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}
