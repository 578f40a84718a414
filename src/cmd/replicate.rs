// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Drives a repository stream through the replication engine.

use futures_util::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::DevexResult;
use crate::git::{
    CloneProtocol, GitRepository, ReplicationEngine, ReplicationSummary, ShellBackend,
};

/// Pre-validated spinner style for a run of unknown length.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} done {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Engine cloning below `output_dir` with the configured limits.
///
/// `output_dir` is resolved against the working directory once, up front.
///
/// # Errors
///
/// Returns [`DevexError::Io`](crate::error::DevexError::Io) if the working directory cannot be determined.
pub(crate) fn engine(
    config: &Config,
    protocol: CloneProtocol,
    output_dir: &Path,
    init_submodules: bool,
) -> DevexResult<ReplicationEngine<ShellBackend>> {
    let output_dir = std::path::absolute(output_dir)?;
    let backend = match config.clone.timeout() {
        Some(timeout) => ShellBackend::new().with_timeout(timeout),
        None => ShellBackend::new(),
    };
    Ok(ReplicationEngine::builder()
        .backend(backend)
        .protocol(protocol)
        .output_dir(output_dir)
        .init_submodules(init_submodules)
        .concurrency(config.clone.concurrency)
        .build())
}

/// Replicates every repository of `repositories`, reporting each outcome.
///
/// `kind` names the items in log lines ("Project", "Repository").
pub(crate) async fn replicate<S>(
    engine: &ReplicationEngine<ShellBackend>,
    repositories: S,
    kind: &str,
) -> ReplicationSummary
where
    S: Stream<Item = GitRepository> + Send,
{
    let progress = ProgressBar::new_spinner();
    progress.set_style(spinner_style());
    progress.enable_steady_tick(Duration::from_millis(120));

    let mut summary = ReplicationSummary::default();
    let mut outcomes = std::pin::pin!(engine.replicate_all(repositories));
    while let Some(outcome) = outcomes.next().await {
        summary.record(&outcome);
        progress.inc(1);
        progress.set_message(outcome.repository.name.clone());
        progress.suspend(|| match &outcome.result {
            Ok(_) => info!("{kind} '{}' updated.", outcome.repository.name),
            Err(e) => warn!(
                repository = %outcome.repository.name,
                error = %e,
                "Git operation failed"
            ),
        });
    }
    progress.finish_and_clear();

    info!(%summary, "All done");
    summary
}

/// Exit code for a run whose root was found.
pub(crate) fn exit_code(summary: &ReplicationSummary) -> ExitCode {
    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
