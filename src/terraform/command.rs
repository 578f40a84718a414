// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use tracing::trace;

use crate::core::process::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::TerraformError;

/// Runs the terraform executable inside a module directory.
#[derive(Debug, Clone)]
pub struct TerraformCommand {
    executable: PathBuf,
}

impl TerraformCommand {
    /// `executable` is a name looked up in `PATH` or a path.
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Runs `terraform <args>` in `module` and returns its stdout.
    ///
    /// # Errors
    ///
    /// Returns `TerraformError::CommandFailed` carrying the exit code and stdout
    /// on a non-zero exit, or `TerraformError::Process` if it cannot be started.
    pub async fn execute(&self, module: &Path, args: &[&str]) -> Result<String, TerraformError> {
        let output = ProcessBuilder::new(&self.executable)
            .name("terraform")
            .args(args)
            .cwd(module)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .stdout_flags(StreamFlags::KEEP_IN_STRING)
            .run()
            .await?;

        trace!(?args, stdout = output.stdout(), "terraform finished");
        if output.success() {
            Ok(output.stdout().to_string())
        } else {
            Err(TerraformError::CommandFailed {
                code: output.exit_code(),
                output: output.stdout().to_string(),
            })
        }
    }
}
