// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub command implementation for devex-rs.

use anyhow::Context;
use futures_util::StreamExt;
use std::process::ExitCode;
use tracing::{debug, error, info};

use super::replicate::{engine, exit_code, replicate};
use crate::cli::github::{GithubArgs, GithubCloneArgs, GithubSubcommand};
use crate::config::Config;
use crate::error::Result;
use crate::git::{CloneProtocol, GitRepository};
use crate::github::GithubService;

/// Main handler for the github command.
///
/// # Errors
///
/// Returns an error if the GitHub client or the output directory cannot be set up.
pub async fn run_github_command(args: &GithubArgs, config: &Config) -> Result<ExitCode> {
    match &args.subcommand {
        GithubSubcommand::Clone(clone) => clone_organization(clone, config).await,
    }
}

async fn clone_organization(args: &GithubCloneArgs, config: &Config) -> Result<ExitCode> {
    let service = GithubService::new(
        &config.github.url,
        Some(&config.github.token),
        config.http.client_options(),
    )
    .with_context(|| format!("invalid GitHub API '{}'", config.github.url))?
    .with_page_size(config.github.page_size);
    let protocol = CloneProtocol::new(args.clone_protocol, Some(&config.github.token));

    info!("Cloning organization '{}'", args.organization);
    let organization = match service.organization(&args.organization).await {
        Ok(organization) => organization,
        Err(e) => {
            error!("Could not find organization '{}': {e}", args.organization);
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(?organization, "Found organization");

    let engine = engine(config, protocol, &args.path, args.recurse_submodules)
        .with_context(|| format!("invalid output directory '{}'", args.path.display()))?;
    let repositories = service
        .organization_repositories(&organization.name)
        .map(GitRepository::from);
    let summary = replicate(&engine, repositories, "Repository").await;
    Ok(exit_code(&summary))
}
