// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP plumbing shared by the GitLab and GitHub services.
//!
//! ```text
//!  ApiClient (global reqwest client, auth header, retry)
//!      |
//!      | get_json::<Vec<T>>(url?page=N)
//!      v
//!  ApiResponse { status, headers, body: Option<Vec<T>> }
//!      |
//!      v
//!  paginate(fetch, next_page) ----> Stream<Item = T>
//!      next_page: x_next_page (GitLab) | link_next_page (GitHub)
//! ```

pub mod client;
pub mod pagination;
#[cfg(test)]
mod tests;

pub use client::{ApiClient, ApiResponse, ClientOptions, PageResponse, RetryPolicy};
pub use pagination::{NextPage, link_next_page, paginate, parse_next_page, x_next_page};
