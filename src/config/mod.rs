// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for devex-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. devex.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. DEVEX_* env vars
//! 5. CLI / well-known env overrides (GITLAB_TOKEN, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! DEVEX_GITLAB__URL=https://git.corp     → gitlab.url
//! DEVEX_CLONE__CONCURRENCY=4             → clone.concurrency
//! DEVEX_TERRAFORM__SECRETS=a,b           → terraform.secrets = ["a", "b"]
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{CloneConfig, DiscoveryConfig, GithubConfig, GitlabConfig, HttpConfig, TerraformConfig};

/// Shown instead of secret values.
const HIDDEN: &str = "[hidden]";
/// Shown for empty optional values.
const UNSET: &str = "(unset)";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub gitlab: GitlabConfig,
    pub github: GithubConfig,
    pub terraform: TerraformConfig,
    pub discovery: DiscoveryConfig,
    pub clone: CloneConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use devex_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("devex.toml")
    ///     .with_env_prefix("DEVEX")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparsable server URL or a
    /// zero page size, concurrency or attempt count.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (section, url) in [("gitlab", &self.gitlab.url), ("github", &self.github.url)] {
            reqwest::Url::parse(url).map_err(|e| invalid(section, "url", e.to_string()))?;
        }
        for (section, page_size) in [
            ("gitlab", self.gitlab.page_size),
            ("github", self.github.page_size),
        ] {
            if !(1..=100).contains(&page_size) {
                return Err(invalid(
                    section,
                    "page_size",
                    format!("must be between 1 and 100, got {page_size}"),
                ));
            }
        }
        if self.clone.concurrency == 0 {
            return Err(invalid("clone", "concurrency", "must be at least 1".to_string()));
        }
        if self.discovery.concurrency == 0 {
            return Err(invalid("discovery", "concurrency", "must be at least 1".to_string()));
        }
        if self.http.retry_attempts == 0 {
            return Err(invalid("http", "retry_attempts", "must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Tokens are replaced with `[hidden]`; keys are sorted.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_gitlab_options(&mut options);
        self.format_github_options(&mut options);
        self.format_terraform_options(&mut options);
        self.format_runtime_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_gitlab_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("gitlab.url".into(), self.gitlab.url.clone());
        options.insert("gitlab.token".into(), hide(&self.gitlab.token));
        options.insert("gitlab.page_size".into(), self.gitlab.page_size.to_string());
    }

    fn format_github_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("github.url".into(), self.github.url.clone());
        options.insert("github.token".into(), hide(&self.github.token));
        options.insert("github.page_size".into(), self.github.page_size.to_string());
    }

    fn format_terraform_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("terraform.command".into(), self.terraform.command.clone());
        options.insert(
            "terraform.secrets".into(),
            self.terraform.secrets.join(", "),
        );
    }

    fn format_runtime_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "discovery.concurrency".into(),
            self.discovery.concurrency.to_string(),
        );
        options.insert(
            "clone.concurrency".into(),
            self.clone.concurrency.to_string(),
        );
        options.insert(
            "clone.timeout_secs".into(),
            self.clone
                .timeout_secs
                .map_or_else(|| UNSET.to_string(), |secs| secs.to_string()),
        );
        options.insert(
            "http.timeout_secs".into(),
            self.http.timeout_secs.to_string(),
        );
        options.insert(
            "http.retry_attempts".into(),
            self.http.retry_attempts.to_string(),
        );
        options.insert(
            "http.retry_delay_ms".into(),
            self.http.retry_delay_ms.to_string(),
        );
        options.insert(
            "http.retry_multiplier".into(),
            self.http.retry_multiplier.to_string(),
        );
    }
}

fn hide(secret: &str) -> String {
    if secret.is_empty() {
        UNSET.to_string()
    } else {
        HIDDEN.to_string()
    }
}

fn invalid(section: &str, key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    }
}
