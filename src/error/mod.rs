// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              DevexError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+------+
//!   |      |      |       |      |      |      |
//!   v      v      v       v      v      v      v
//!  Git   Net   Gitlab  Github  Cfg   Proc   Terraform  Io
//!  Box   Box    Box     Box    Box    Box     Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Git       Gix, CommandFailed, CloneFailed, SubmoduleInitFailed, Process
//!   Network   Reqwest, InvalidUrl, InvalidHeader, Decode
//!   Gitlab    GroupNotFound, GroupLookupFailed, Unreachable
//!   Github    OrganizationNotFound, OrganizationLookupFailed, Unreachable
//!   Config    InvalidValue, NotFound
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout, OutputError
//!   Terraform CommandFailed, StateFile, Process
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DevexError`].
pub type DevexResult<T> = std::result::Result<T, DevexError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum DevexError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// GitLab lookup failed.
    #[error("gitlab error: {0}")]
    Gitlab(#[from] Box<GitlabError>),

    /// GitHub lookup failed.
    #[error("github error: {0}")]
    Github(#[from] Box<GithubError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Terraform operation failed.
    #[error("terraform error: {0}")]
    Terraform(#[from] Box<TerraformError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DevexError {
                fn from(err: $error) -> Self {
                    DevexError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    NetworkError => Network,
    GitlabError => Gitlab,
    GithubError => Github,
    ConfigError => Config,
    ProcessError => Process,
    TerraformError => Terraform,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Submodule initialization of an existing clone failed.
    #[error("failed to initialize submodules in {path}: {message}")]
    SubmoduleInitFailed { path: String, message: String },

    /// The git executable could not be run.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Header value rejected before sending (e.g. a token with newlines).
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// Response body was not the expected JSON.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl NetworkError {
    /// Whether this error is a transport failure worth retrying.
    ///
    /// Only connection-level failures qualify; a decoded answer from the
    /// server, whatever its status, is never retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request() || e.is_body(),
            Self::InvalidUrl(_) | Self::InvalidHeader(_) | Self::Decode { .. } => false,
        }
    }
}

// --- GitLab Errors ---

/// GitLab group lookup errors.
#[derive(Debug, Error)]
pub enum GitlabError {
    /// No group matched the search.
    #[error("Group not found")]
    GroupNotFound,

    /// The group lookup returned an unexpected answer.
    #[error("unexpected status {status} fetching group {id}")]
    GroupLookupFailed { id: String, status: u16 },

    /// The group lookup could not reach the server.
    #[error("failed to fetch group {id}: {message}")]
    Unreachable { id: String, message: String },
}

// --- GitHub Errors ---

/// GitHub organization lookup errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The organization does not exist (or is not visible).
    #[error("Organization not found")]
    OrganizationNotFound,

    /// The organization lookup returned an unexpected answer.
    #[error("unexpected status {status} fetching organization {organization}")]
    OrganizationLookupFailed { organization: String, status: u16 },

    /// The organization lookup could not reach the server.
    #[error("failed to fetch organization {organization}: {message}")]
    Unreachable {
        organization: String,
        message: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a status outside the success set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed while waiting on the process or its streams.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Terraform Errors ---

/// Terraform operation errors.
#[derive(Debug, Error)]
pub enum TerraformError {
    /// Terraform ran but returned a failing exit code.
    #[error("Error: exitValue = {code} :: {output}")]
    CommandFailed { code: i32, output: String },

    /// The pulled state could not be stored or parsed.
    #[error("failed to create terraform state file: {message}")]
    StateFile { message: String },

    /// Terraform could not be started.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

#[cfg(test)]
mod tests;
