// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitBackend (clone, init_submodules) --> ShellBackend (git CLI via ProcessBuilder)
//! read-only inspection                --> GixBackend (pure Rust gix)
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

use super::protocol::CloneProtocol;
use crate::core::process::{ProcessBuilder, ProcessFlags};
use crate::error::{GitError, GixError};

/// Child environment variable holding the HTTPS password for the credential helper.
const PASSWORD_ENV: &str = "DEVEX_GIT_PASSWORD";
/// Child environment variable holding the HTTPS username for the credential helper.
const USERNAME_ENV: &str = "DEVEX_GIT_USERNAME";

/// Answers `get` requests from the two variables above, so the secret never
/// appears on a command line.
const CREDENTIAL_HELPER: &str = "!f() { test \"$1\" = get && echo \"username=${DEVEX_GIT_USERNAME}\" && echo \"password=${DEVEX_GIT_PASSWORD}\"; }; f";

// --- Backend Trait ---

/// Write operations the replication engine needs.
pub trait GitBackend: Send + Sync {
    /// Clone `url` into `dest` (single branch, no tags).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone fails, including when `dest` already
    /// holds a non-empty directory.
    fn clone_repository(
        &self,
        url: &str,
        dest: &Path,
        recurse_submodules: bool,
        protocol: &CloneProtocol,
    ) -> impl Future<Output = Result<(), GitError>> + Send;

    /// Open the existing repository at `dest`, then `submodule init` and `submodule update`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `dest` is not a repository or a submodule step fails.
    fn init_submodules(
        &self,
        dest: &Path,
        protocol: &CloneProtocol,
    ) -> impl Future<Output = Result<(), GitError>> + Send;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix, read-only.
pub struct GixBackend;

impl GixBackend {
    /// Check if `path` is the root of a non-bare repository.
    #[must_use]
    pub fn is_git_repo(path: &Path) -> bool {
        Self::open(path).is_ok()
    }

    /// Open the repository whose work tree is exactly `path`.
    ///
    /// # Errors
    ///
    /// Returns a `GixError` if there is no repository at `path` or it is bare.
    pub fn open(path: &Path) -> Result<gix::Repository, GixError> {
        let repo = gix::open(path).map_err(|e| GixError::Open(Box::new(e)))?;
        if repo.workdir().is_none() {
            return Err(GixError::BareRepository);
        }
        Ok(repo)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Initialization state of one submodule, as printed by `git submodule status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    Uninitialized,
    UpToDate,
    /// Checked out commit differs from the recorded one.
    Modified,
    Conflicted,
}

/// One line of `git submodule status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleStatus {
    pub path: String,
    pub state: SubmoduleState,
}

impl SubmoduleStatus {
    fn parse(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        let state = match chars.next()? {
            '-' => SubmoduleState::Uninitialized,
            '+' => SubmoduleState::Modified,
            'U' => SubmoduleState::Conflicted,
            _ => SubmoduleState::UpToDate,
        };
        let path = chars.as_str().split_whitespace().nth(1)?.to_string();
        Some(Self { path, state })
    }
}

/// Shell-based git backend using git CLI.
///
/// Every command runs with `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
#[derive(Debug, Clone, Default)]
pub struct ShellBackend {
    /// `key=value` pairs passed as `git -c` to every command.
    config: Vec<String>,
    timeout: Option<Duration>,
}

impl ShellBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `git -c key=value` override to every command.
    #[must_use]
    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.push(format!("{key}={value}"));
        self
    }

    /// Kills git commands running longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Prepares a git invocation carrying the protocol's transport settings.
    pub(crate) fn command(&self, protocol: Option<&CloneProtocol>) -> Result<ProcessBuilder, GitError> {
        let mut builder = ProcessBuilder::which("git")?
            .name("git")
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .capture_output()
            .flag(ProcessFlags::ALLOW_FAILURE);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        for entry in &self.config {
            builder = builder.arg("-c").arg(entry);
        }

        let builder = match protocol {
            Some(CloneProtocol::Ssh) => builder.env("GIT_SSH_COMMAND", ssh_command()),
            Some(CloneProtocol::Https {
                username,
                password: Some(password),
            }) => builder
                .args(["-c", "credential.helper="])
                .arg("-c")
                .arg(format!("credential.helper={CREDENTIAL_HELPER}"))
                .env(USERNAME_ENV, username.as_str())
                .env(PASSWORD_ENV, password.as_str()),
            Some(CloneProtocol::Https { password: None, .. }) => {
                debug!("Credentials for HTTPS remote not set, group to clone must be public.");
                builder
            }
            None => builder,
        };
        Ok(builder)
    }

    /// Runs git and returns trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` with git's stderr on a non-zero exit.
    pub(crate) async fn run(
        &self,
        args: &[&str],
        cwd: &Path,
        protocol: Option<&CloneProtocol>,
    ) -> Result<String, GitError> {
        let output = self.command(protocol)?.args(args).cwd(cwd).run().await?;
        if !output.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: output.stderr().trim().to_string(),
            });
        }
        Ok(output.stdout().trim().to_string())
    }

    /// Lists the submodules of the repository at `repo_path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git submodule status` fails.
    pub async fn submodule_status(&self, repo_path: &Path) -> Result<Vec<SubmoduleStatus>, GitError> {
        let output = self.run(&["submodule", "status"], repo_path, None).await?;
        Ok(output.lines().filter_map(SubmoduleStatus::parse).collect())
    }
}

impl GitBackend for ShellBackend {
    async fn clone_repository(
        &self,
        url: &str,
        dest: &Path,
        recurse_submodules: bool,
        protocol: &CloneProtocol,
    ) -> Result<(), GitError> {
        // git runs from an existing ancestor, so a relative `dest` would
        // resolve against that ancestor instead of our working directory.
        let dest = std::path::absolute(dest).map_err(|e| GitError::CloneFailed {
            url: url.to_string(),
            message: format!("invalid destination path: {e}"),
        })?;
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let mut args = vec!["clone", "--quiet", "--single-branch", "--no-tags"];
        if recurse_submodules {
            args.push("--recurse-submodules");
        }
        args.extend(["--", url, dest_str]);

        let parent = existing_parent(&dest);
        trace!(url, dest = %dest.display(), "git clone");
        self.run(&args, &parent, Some(protocol))
            .await
            .map(|_| ())
            .map_err(|e| GitError::CloneFailed {
                url: url.to_string(),
                message: failure_message(e),
            })
    }

    async fn init_submodules(&self, dest: &Path, protocol: &CloneProtocol) -> Result<(), GitError> {
        GixBackend::open(dest)?;
        let init_failed = |e: GitError| GitError::SubmoduleInitFailed {
            path: dest.display().to_string(),
            message: failure_message(e),
        };
        self.run(&["submodule", "init"], dest, Some(protocol))
            .await
            .map_err(init_failed)?;
        self.run(&["submodule", "update"], dest, Some(protocol))
            .await
            .map_err(init_failed)?;
        Ok(())
    }
}

fn failure_message(error: GitError) -> String {
    match error {
        GitError::CommandFailed { message, .. } => message,
        other => other.to_string(),
    }
}

/// Closest existing ancestor of `dest`, used as the clone's working directory.
fn existing_parent(dest: &Path) -> PathBuf {
    dest.ancestors()
        .skip(1)
        .find(|p| p.is_dir())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// `GIT_SSH_COMMAND` forcing public key auth and the user's `~/.ssh/config`.
fn ssh_command() -> String {
    let mut command =
        String::from("ssh -o PreferredAuthentications=publickey -o BatchMode=yes");
    if let Some(config) = user_ssh_config() {
        command.push_str(" -F ");
        command.push_str(&shell_quote(&config.to_string_lossy()));
    }
    command
}

fn user_ssh_config() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let config = PathBuf::from(home).join(".ssh").join("config");
    config.is_file().then_some(config)
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests;
