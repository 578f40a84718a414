// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Terraform state inspection and secret rotation.
//!
//! ```text
//! TerraformStateService (secret resource types)
//!    |  pull_state_file --> "state pull" --> TerraformStateFile (temp .tfstate)
//!    |  list_secrets    --> "state list" --> addresses with a secret segment
//!    |  taint_secrets   --> list_secrets, then "taint|untaint <address>" each
//!    v
//! TerraformCommand (executable, run in the module directory)
//!    |
//!    v
//! ProcessBuilder  (exit 0 -> stdout, else CommandFailed { code, stdout })
//! ```

mod command;
mod state;

#[cfg(test)]
mod tests;

pub use command::TerraformCommand;
pub use state::{
    ResourceMode, TaintOutcome, TerraformResource, TerraformState, TerraformStateFile,
    TerraformStateService,
};
