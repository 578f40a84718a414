// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! -v / -x            ← devex logs at DEBUG / TRACE
//! --debug / --trace  ← every crate at DEBUG / TRACE
//! --log-file FILE    ← also log to FILE
//! --config FILE      ← additional TOML files (can repeat)
//! GITLAB_TOKEN, ...  ← provider overrides (env or flag)
//!
//! Precedence: overrides > DEVEX_* env > --config > devex.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;
use crate::logging::LogConfig;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Print out extra information about what the tool is doing.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print out even more information about what the tool is doing.
    #[arg(short = 'x', long = "very-verbose", global = true)]
    pub very_verbose: bool,

    /// Sets all loggers to DEBUG level.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Sets all loggers to TRACE level.
    /// WARNING: this leaks HTTP authentication tokens to the logs.
    #[arg(long, global = true)]
    pub trace: bool,

    /// Also write logs to this file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    #[command(flatten)]
    pub overrides: ProviderOverrides,
}

/// Well-known settings read from the environment or the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct ProviderOverrides {
    /// GitLab server URL.
    #[arg(long = "gitlab-url", env = "GITLAB_URL", value_name = "URL", global = true)]
    pub gitlab_url: Option<String>,

    /// GitLab token, used for the API and as the HTTPS clone password.
    #[arg(
        long = "gitlab-token",
        env = "GITLAB_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub gitlab_token: Option<String>,

    /// GitHub API URL.
    #[arg(long = "github-url", env = "GITHUB_URL", value_name = "URL", global = true)]
    pub github_url: Option<String>,

    /// GitHub token, used for the API and as the HTTPS clone password.
    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub github_token: Option<String>,

    /// Terraform executable.
    #[arg(
        long = "terraform-command",
        env = "TERRAFORM_COMMAND",
        value_name = "PATH",
        global = true
    )]
    pub terraform_command: Option<String>,

    /// Comma-separated resource types holding secrets.
    #[arg(
        long = "terraform-secrets",
        env = "TERRAFORM_SECRETS",
        value_name = "TYPES",
        value_delimiter = ',',
        global = true
    )]
    pub terraform_secrets: Option<Vec<String>>,
}

impl GlobalOptions {
    /// Logging configuration for the verbosity flags.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_flags(self.verbose, self.very_verbose, self.debug, self.trace)
            .with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
    }

    /// Loader over every configuration source, overrides applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new().add_toml_file_optional("devex.toml");
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        self.overrides.apply(loader.with_env_prefix("DEVEX"))
    }
}

impl ProviderOverrides {
    /// Applies every override that was given.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        loader
            .set_opt("gitlab.url", self.gitlab_url.clone())?
            .set_opt("gitlab.token", self.gitlab_token.clone())?
            .set_opt("github.url", self.github_url.clone())?
            .set_opt("github.token", self.github_token.clone())?
            .set_opt("terraform.command", self.terraform_command.clone())?
            .set_opt("terraform.secrets", self.terraform_secrets.clone())
    }
}
