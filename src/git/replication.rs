// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone-or-initialize state machine and its concurrent driver.

use bon::Builder;
use futures_util::stream::{Stream, StreamExt};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::GitRepository;
use super::backend::GitBackend;
use super::protocol::CloneProtocol;
use crate::error::GitError;

/// How a repository reached its final local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Fresh clone.
    Cloned,
    /// The clone failed and submodules of the existing checkout were initialized instead.
    SubmodulesInitialized,
}

/// A replicated repository on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    path: PathBuf,
    transition: Transition,
}

impl LocalRepository {
    #[must_use]
    pub const fn new(path: PathBuf, transition: Transition) -> Self {
        Self { path, transition }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn transition(&self) -> Transition {
        self.transition
    }
}

/// Result of replicating one repository.
#[derive(Debug)]
pub struct ReplicationOutcome {
    pub repository: GitRepository,
    pub result: Result<LocalRepository, GitError>,
}

/// Counters over a run's outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicationSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ReplicationSummary {
    pub fn record(&mut self, outcome: &ReplicationOutcome) {
        self.processed += 1;
        if outcome.result.is_ok() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// True when no repository failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for ReplicationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} updated, {} failed",
            self.processed, self.succeeded, self.failed
        )
    }
}

/// Replicates repositories below `output_dir` using one fixed protocol.
#[derive(Debug, Builder)]
pub struct ReplicationEngine<B: GitBackend> {
    backend: B,
    protocol: CloneProtocol,
    #[builder(into)]
    output_dir: PathBuf,
    /// Clone with `--recurse-submodules` and fall back to initializing
    /// submodules of an existing checkout.
    #[builder(default)]
    init_submodules: bool,
    #[builder(default = 8)]
    concurrency: usize,
}

impl<B: GitBackend> ReplicationEngine<B> {
    #[must_use]
    pub const fn protocol(&self) -> &CloneProtocol {
        &self.protocol
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Local destination of `repository`.
    #[must_use]
    pub fn destination(&self, repository: &GitRepository) -> PathBuf {
        self.output_dir.join(&repository.path)
    }

    /// Clones `repository`, or initializes submodules of an existing checkout
    /// when the clone fails and submodule initialization was requested.
    ///
    /// # Errors
    ///
    /// Returns the clone error when no fallback applies, otherwise the fallback error.
    pub async fn replicate(&self, repository: &GitRepository) -> Result<LocalRepository, GitError> {
        let destination = self.destination(repository);
        let url = self.protocol.url_for(repository);
        trace!(
            repository = %repository.name,
            dest = %destination.display(),
            submodules = self.init_submodules,
            "Cloning repository"
        );

        let cloned = self
            .backend
            .clone_repository(url, &destination, self.init_submodules, &self.protocol)
            .await;
        match cloned {
            Ok(()) => {
                trace!(repository = %repository.name, dest = %destination.display(), "Cloned");
                Ok(LocalRepository::new(destination, Transition::Cloned))
            }
            Err(clone_error) if self.init_submodules => {
                debug!(repository = %repository.name, error = %clone_error, "Could not clone, initializing submodules instead");
                match self.backend.init_submodules(&destination, &self.protocol).await {
                    Ok(()) => {
                        trace!(dest = %destination.display(), "Initialized submodules");
                        Ok(LocalRepository::new(destination, Transition::SubmodulesInitialized))
                    }
                    Err(e) => {
                        debug!(repository = %repository.name, error = %e, "Could not initialize submodules");
                        Err(e)
                    }
                }
            }
            Err(clone_error) => {
                debug!(repository = %repository.name, error = %clone_error, "Could not clone");
                Err(clone_error)
            }
        }
    }

    /// Replicates every repository of `repositories`, at most `concurrency` at once.
    ///
    /// Outcomes arrive in completion order; a failure never stops the others.
    pub fn replicate_all<'a, S>(&'a self, repositories: S) -> impl Stream<Item = ReplicationOutcome> + Send + 'a
    where
        S: Stream<Item = GitRepository> + Send + 'a,
    {
        repositories
            .map(move |repository| async move {
                let result = self.replicate(&repository).await;
                ReplicationOutcome { repository, result }
            })
            .buffer_unordered(self.concurrency.max(1))
    }
}
