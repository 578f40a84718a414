// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab command implementation for devex-rs.

use anyhow::Context;
use futures_util::StreamExt;
use std::process::ExitCode;
use tracing::{debug, error, info};

use super::replicate::{engine, exit_code, replicate};
use crate::cli::gitlab::{GitlabArgs, GitlabCloneArgs, GitlabSubcommand};
use crate::config::Config;
use crate::error::Result;
use crate::git::{CloneProtocol, GitRepository};
use crate::gitlab::GitlabService;

/// Main handler for the gitlab command.
///
/// # Errors
///
/// Returns an error if the GitLab client or the output directory cannot be set up.
pub async fn run_gitlab_command(args: &GitlabArgs, config: &Config) -> Result<ExitCode> {
    match &args.subcommand {
        GitlabSubcommand::Clone(clone) => clone_group(clone, config).await,
    }
}

async fn clone_group(args: &GitlabCloneArgs, config: &Config) -> Result<ExitCode> {
    let service = GitlabService::new(
        &config.gitlab.url,
        Some(&config.gitlab.token),
        config.http.client_options(),
    )
    .with_context(|| format!("invalid GitLab server '{}'", config.gitlab.url))?
    .with_page_size(config.gitlab.page_size)
    .with_concurrency(config.discovery.concurrency);
    let protocol = CloneProtocol::new(args.clone_protocol, Some(&config.gitlab.token));

    info!("Cloning group '{}'", args.group);
    let group = match service.find_group_by(&args.group, args.search_mode).await {
        Ok(group) => group,
        Err(e) => {
            error!("Could not find group '{}': {e}", args.group);
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(?group, "Found group");

    let engine = engine(config, protocol, &args.path, args.recurse_submodules)
        .with_context(|| format!("invalid output directory '{}'", args.path.display()))?;
    let projects = service
        .group_projects(&group)
        .await
        .map(GitRepository::from);
    let summary = replicate(&engine, projects, "Project").await;
    Ok(exit_code(&summary))
}
