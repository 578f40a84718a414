// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Terraform command arguments.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `terraform` command.
#[derive(Debug, Clone, Args)]
pub struct TerraformArgs {
    #[command(subcommand)]
    pub subcommand: TerraformSubcommand,
}

/// Terraform subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum TerraformSubcommand {
    /// Taints all resources holding secrets in the state of a module.
    ///
    /// Resources are matched against the configured secret resource types
    /// (TERRAFORM_SECRETS, e.g. "aws_iam_access_key,tls_private_key").
    /// Tainting only marks resources for recreation; run terraform apply
    /// afterwards to rotate the secrets.
    #[command(name = "taint-secrets", visible_alias = "ts")]
    TaintSecrets(TaintSecretsArgs),
}

/// Arguments for `terraform taint-secrets`.
#[derive(Debug, Clone, Args)]
pub struct TaintSecretsArgs {
    /// Untaint the resources instead.
    #[arg(short = 'u', long)]
    pub untaint: bool,

    /// The terraform module directory.
    #[arg(value_name = "MODULE")]
    pub module: PathBuf,
}
