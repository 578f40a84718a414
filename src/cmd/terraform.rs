// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Terraform command implementation for devex-rs.

use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::cli::terraform::{TaintSecretsArgs, TerraformArgs, TerraformSubcommand};
use crate::config::Config;
use crate::error::Result;
use crate::terraform::{TerraformCommand, TerraformStateService};

/// Main handler for the terraform command.
///
/// # Errors
///
/// Never fails today; terraform failures are logged and reflected in the exit code.
pub async fn run_terraform_command(args: &TerraformArgs, config: &Config) -> Result<ExitCode> {
    match &args.subcommand {
        TerraformSubcommand::TaintSecrets(taint) => Ok(taint_secrets(taint, config).await),
    }
}

async fn taint_secrets(args: &TaintSecretsArgs, config: &Config) -> ExitCode {
    let service = TerraformStateService::new(
        TerraformCommand::new(&config.terraform.command),
        config.terraform.secrets.clone(),
    );
    let operation = if args.untaint { "Untaint" } else { "Taint" };

    info!(
        "{operation}ing terraform resources in module '{}'",
        args.module.display()
    );
    let outcomes = match service.taint_secrets(&args.module, args.untaint).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            error!("{operation} operation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0_usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(output) => info!(address = %outcome.address, "{operation}: {}", output.trim()),
            Err(e) => {
                failed += 1;
                warn!(address = %outcome.address, "{operation} failed: {}", e.to_string().trim());
            }
        }
    }
    if !args.untaint {
        info!("To rotate the secrets run terraform apply on the module");
    }
    info!(resources = outcomes.len(), failed, "All done");

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
