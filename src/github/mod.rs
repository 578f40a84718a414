// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub organization discovery.
//!
//! ```text
//! organization(org) ---- GET /orgs/{org} ----> GithubOrganization
//!        |
//! organization_repositories(org)
//!        |
//!        v
//!  GET /orgs/{org}/repos?per_page=N&page=P
//!        next page from Link: <...&page=P+1>; rel="next"
//!        |
//!        v
//!  Stream<GithubRepository>
//! ```

mod service;

pub use service::{GithubOrganization, GithubRepository, GithubService};
