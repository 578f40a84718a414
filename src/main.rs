// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Gitlab | Github | Terraform | Config | Version
//! ```

use std::process::ExitCode;

use devex_rs::cli::global::GlobalOptions;
use devex_rs::cli::{self, Command};
use devex_rs::cmd::config::run_config_command;
use devex_rs::cmd::github::run_github_command;
use devex_rs::cmd::gitlab::run_gitlab_command;
use devex_rs::cmd::load_config;
use devex_rs::cmd::terraform::run_terraform_command;
use devex_rs::config::Config;
use devex_rs::logging::init_logging;
use tracing::{debug, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let _log_guard = match init_logging(&cli.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    if cli.global.trace {
        warn!("TRACE logging is on for all crates, authentication tokens may leak to the logs");
    }
    debug!("devex {}", env!("CARGO_PKG_VERSION"));

    dispatch_command(&cli).await
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Config) => handle_config_command(&cli.global),
        Some(Command::Gitlab(args)) => match load(&cli.global) {
            Ok(config) => run_gitlab_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Github(args)) => match load(&cli.global) {
            Ok(config) => run_github_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Terraform(args)) => match load(&cli.global) {
            Ok(config) => run_terraform_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("devex {}", env!("CARGO_PKG_VERSION"));
}

fn handle_config_command(global: &GlobalOptions) -> devex_rs::error::Result<ExitCode> {
    let loader = global.config_loader()?;
    let files = loader.format_loaded_files();
    let config = loader.build()?;
    run_config_command(&files, &config);
    Ok(ExitCode::SUCCESS)
}

fn load(global: &GlobalOptions) -> devex_rs::error::Result<Config> {
    load_config(global).map_err(|e| e.context("Failed to load config"))
}
