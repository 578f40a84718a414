// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab group hierarchy discovery.
//!
//! ```text
//! find_group_by(search, Name | FullPath | Id)
//!        |
//!        v
//!   GitlabGroup (root)
//!        |
//! group_projects(root)
//!        |
//!        +-- probe_version() --> 13.4 ----> subgroups, walked depth-first
//!        |                   \-> 13.5+ --> descendant_groups (flat)
//!        |                   \-> None ---> descendant_groups (flat)
//!        v
//!   [root, sub-groups...] --map--> /groups/{id}/projects (paginated)
//!        |
//!        v
//!   flatten_unordered(concurrency) --> Stream<GitlabProject>
//! ```

mod service;
mod types;
mod version;

pub use service::{GROUP_DESCENDANTS_VERSION, GitlabService};
pub use types::{GitlabGroup, GitlabProject, GroupSearchMode};
pub use version::GitlabVersion;
