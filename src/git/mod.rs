// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository replication.
//!
//! ```text
//!   Stream<GitRepository>
//!          |
//!          v
//!   ReplicationEngine::replicate_all (buffer_unordered)
//!          |
//!          |  per repository:
//!          |    clone(url for protocol, out/path, recurse?)
//!          |       ok ---------------------------> Cloned
//!          |       err + recurse --> init_submodules
//!          |                            ok ------> SubmodulesInitialized
//!          |                            err -----> Failed
//!          |       err -----------------------------> Failed
//!          v
//!   Stream<ReplicationOutcome> --> ReplicationSummary
//!
//!      ,---------------------,
//!      | backend (GitBackend) |
//!      '--+--------------+----'
//!         |              |
//!         v              v
//!    GixBackend     ShellBackend
//!   (open, read)   (clone, submodules via git CLI)
//! ```

pub mod backend;
mod protocol;
mod replication;


pub use backend::{GitBackend, GixBackend, ShellBackend, SubmoduleState, SubmoduleStatus};
pub use protocol::{CloneProtocol, CloneProtocolKind, HTTPS_USERNAME};
pub use replication::{
    LocalRepository, ReplicationEngine, ReplicationOutcome, ReplicationSummary, Transition,
};

/// A provider-neutral repository to replicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepository {
    /// Human readable name, e.g. `acme / tools / cli`.
    pub name: String,
    /// Destination relative to the output directory, e.g. `acme/tools/cli`.
    pub path: String,
    pub clone_url_ssh: String,
    pub clone_url_https: String,
}
