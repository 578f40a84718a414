// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for devex-rs.
//!
//! ```text
//! Config: GitlabConfig, GithubConfig, TerraformConfig,
//!         DiscoveryConfig, CloneConfig, HttpConfig
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::{ClientOptions, RetryPolicy};

/// GitLab server and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitlabConfig {
    /// Server root, without `/api/v4`.
    pub url: String,
    /// Personal access token; empty means anonymous.
    pub token: String,
    /// Items requested per listing page.
    pub page_size: u32,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            url: "https://gitlab.com".to_string(),
            token: String::new(),
            page_size: 10,
        }
    }
}

/// GitHub API endpoint and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// API root (`https://api.github.com` or `https://host/api/v3`).
    pub url: String,
    pub token: String,
    pub page_size: u32,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            url: "https://api.github.com".to_string(),
            token: String::new(),
            page_size: 30,
        }
    }
}

/// Terraform executable and the resource types treated as secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerraformConfig {
    pub command: String,
    pub secrets: Vec<String>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            command: "terraform".to_string(),
            secrets: vec![
                "aws_iam_access_key".to_string(),
                "tls_private_key".to_string(),
                "random_password".to_string(),
            ],
        }
    }
}

/// Group hierarchy discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Project listings fetched concurrently (at least 2).
    pub concurrency: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { concurrency: 16 }
    }
}

/// Repository replication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneConfig {
    /// Repositories cloned concurrently.
    pub concurrency: usize,
    /// Kill a single git command after this many seconds; unset means no limit.
    pub timeout_secs: Option<u64>,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout_secs: None,
        }
    }
}

impl CloneConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// HTTP client settings shared by the GitLab and GitHub services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Total attempts for a request failing at the transport level.
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub retry_multiplier: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            retry_multiplier: 2,
        }
    }
}

impl HttpConfig {
    /// Client options derived from these settings.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .retry(
                RetryPolicy::builder()
                    .attempts(self.retry_attempts)
                    .delay(Duration::from_millis(self.retry_delay_ms))
                    .multiplier(self.retry_multiplier)
                    .build(),
            )
            .build()
    }
}
