// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::command::TerraformCommand;
use crate::error::TerraformError;

/// Whether a resource is managed or only read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    Data,
    Managed,
}

/// One resource block of a state file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TerraformResource {
    #[serde(default)]
    pub module: String,
    pub mode: ResourceMode,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
}

/// The parts of `terraform state pull` output devex reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TerraformState {
    #[serde(default)]
    pub terraform_version: String,
    #[serde(default)]
    pub resources: Vec<TerraformResource>,
}

/// A pulled state written to a temporary `.tfstate` file.
///
/// The file is removed when this value is dropped.
#[derive(Debug)]
pub struct TerraformStateFile {
    file: NamedTempFile,
    state: TerraformState,
}

impl TerraformStateFile {
    /// Writes `content` to a fresh temporary file and parses it.
    ///
    /// Blank content (a module without state) yields an empty state.
    ///
    /// # Errors
    ///
    /// Returns `TerraformError::StateFile` if the file cannot be written or the
    /// content is not a state document.
    pub fn create(content: &str) -> Result<Self, TerraformError> {
        let state = if content.trim().is_empty() {
            TerraformState::default()
        } else {
            serde_json::from_str(content).map_err(state_file_error)?
        };

        let mut file = tempfile::Builder::new()
            .prefix("terraform-state")
            .suffix(".tfstate")
            .tempfile()
            .map_err(state_file_error)?;
        file.write_all(content.as_bytes()).map_err(state_file_error)?;
        file.flush().map_err(state_file_error)?;

        Ok(Self { file, state })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub const fn state(&self) -> &TerraformState {
        &self.state
    }
}

fn state_file_error(error: impl std::fmt::Display) -> TerraformError {
    debug!(%error, "Exception :: create terraform state file");
    TerraformError::StateFile {
        message: error.to_string(),
    }
}

/// Result of tainting or untainting one resource.
#[derive(Debug)]
pub struct TaintOutcome {
    pub address: String,
    /// Terraform's stdout on success.
    pub result: Result<String, TerraformError>,
}

/// State operations over the resources known to hold secrets.
#[derive(Debug, Clone)]
pub struct TerraformStateService {
    command: TerraformCommand,
    secrets: Vec<String>,
}

impl TerraformStateService {
    /// `secrets` are resource types (e.g. `tls_private_key`).
    #[must_use]
    pub const fn new(command: TerraformCommand, secrets: Vec<String>) -> Self {
        Self { command, secrets }
    }

    #[must_use]
    pub fn secrets(&self) -> &[String] {
        &self.secrets
    }

    /// Pulls the remote state of `module` into a temporary file.
    ///
    /// # Errors
    ///
    /// Returns the `state pull` failure or a `TerraformError::StateFile`.
    pub async fn pull_state_file(&self, module: &Path) -> Result<TerraformStateFile, TerraformError> {
        let content = self.command.execute(module, &["state", "pull"]).await?;
        TerraformStateFile::create(&content)
    }

    /// Addresses in the state of `module` with a segment naming a secret type.
    ///
    /// # Errors
    ///
    /// Returns the `state list` failure.
    pub async fn list_secrets(&self, module: &Path) -> Result<Vec<String>, TerraformError> {
        let listing = self.command.execute(module, &["state", "list"]).await?;
        trace!(state_list = %listing, "terraform state list");
        Ok(listing
            .lines()
            .map(str::trim)
            .filter(|address| self.is_secret(address))
            .map(str::to_string)
            .collect())
    }

    /// Taints (or untaints) every secret resource of `module`, one at a time.
    ///
    /// # Errors
    ///
    /// Returns the listing failure; per-resource failures are reported in the
    /// returned outcomes instead.
    pub async fn taint_secrets(
        &self,
        module: &Path,
        untaint: bool,
    ) -> Result<Vec<TaintOutcome>, TerraformError> {
        let verb = if untaint { "untaint" } else { "taint" };
        let mut outcomes = Vec::new();
        for address in self.list_secrets(module).await? {
            let result = self.command.execute(module, &[verb, address.as_str()]).await;
            outcomes.push(TaintOutcome { address, result });
        }
        Ok(outcomes)
    }

    fn is_secret(&self, address: &str) -> bool {
        address
            .split('.')
            .any(|segment| self.secrets.iter().any(|secret| secret == segment))
    }
}
