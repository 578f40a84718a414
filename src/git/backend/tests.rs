// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    GixBackend, ShellBackend, SubmoduleState, SubmoduleStatus, existing_parent, shell_quote,
    ssh_command,
};
use crate::error::{GitError, GixError};
use crate::git::{CloneProtocol, CloneProtocolKind};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn test_gix_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!GixBackend::is_git_repo(temp.path()));

    gix::init(temp.path()).expect("failed to init repo");
    assert!(GixBackend::is_git_repo(temp.path()));
}

#[test]
fn test_gix_backend_rejects_bare_repository() {
    let temp = temp_dir();
    gix::init_bare(temp.path()).expect("failed to init bare repo");

    let err = GixBackend::open(temp.path()).expect_err("bare repo has no work tree");
    assert!(matches!(err, GixError::BareRepository));
}

#[test]
fn test_submodule_status_parse() {
    let lines = [
        "-4c5a1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c lib",
        " 4c5a1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c vendor/json (v3.11.2)",
        "+4c5a1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c docs (heads/main)",
        "U4c5a1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c broken",
        "",
    ];
    let parsed: Vec<_> = lines.iter().filter_map(|l| SubmoduleStatus::parse(l)).collect();

    assert_eq!(
        parsed,
        vec![
            SubmoduleStatus {
                path: "lib".to_string(),
                state: SubmoduleState::Uninitialized
            },
            SubmoduleStatus {
                path: "vendor/json".to_string(),
                state: SubmoduleState::UpToDate
            },
            SubmoduleStatus {
                path: "docs".to_string(),
                state: SubmoduleState::Modified
            },
            SubmoduleStatus {
                path: "broken".to_string(),
                state: SubmoduleState::Conflicted
            },
        ]
    );
}

#[test]
fn test_ssh_command_forces_public_key() {
    let command = ssh_command();
    assert!(command.starts_with("ssh -o PreferredAuthentications=publickey"));
    assert!(command.contains("BatchMode=yes"));
}

#[test]
fn test_shell_quote() {
    assert_eq!(shell_quote("/home/me/.ssh/config"), "'/home/me/.ssh/config'");
    assert_eq!(shell_quote("/home/o'brien"), "'/home/o'\\''brien'");
}

#[test]
fn test_existing_parent() {
    let temp = temp_dir();
    let dest = temp.path().join("acme").join("tools").join("cli");
    assert_eq!(existing_parent(&dest), temp.path());
}

#[test]
fn test_https_password_stays_out_of_argv() {
    let protocol = CloneProtocol::new(CloneProtocolKind::Https, Some("glpat-secret"));
    let builder = ShellBackend::new()
        .command(Some(&protocol))
        .expect("git should be in PATH");

    assert!(
        builder
            .args_slice()
            .iter()
            .all(|arg| !arg.contains("glpat-secret"))
    );
    assert!(
        builder
            .args_slice()
            .iter()
            .any(|arg| arg.starts_with("credential.helper=!"))
    );
}

#[tokio::test]
async fn test_https_credential_helper_is_registered() {
    let temp = temp_dir();
    let protocol = CloneProtocol::new(CloneProtocolKind::Https, Some("glpat-secret"));
    let helpers = ShellBackend::new()
        .run(
            &["config", "--get-all", "credential.helper"],
            temp.path(),
            Some(&protocol),
        )
        .await
        .expect("git config should succeed");

    let last = helpers.lines().last().expect("at least one helper");
    assert!(last.contains("DEVEX_GIT_PASSWORD"));
    assert!(!last.contains("glpat-secret"));
}

#[tokio::test]
async fn test_https_without_password_adds_no_helper() {
    let protocol = CloneProtocol::new(CloneProtocolKind::Https, Some("   "));
    assert_eq!(
        protocol,
        CloneProtocol::Https {
            username: "git".to_string(),
            password: None
        }
    );
    let builder = ShellBackend::new()
        .command(Some(&protocol))
        .expect("git should be in PATH");
    assert!(
        builder
            .args_slice()
            .iter()
            .all(|arg| !arg.starts_with("credential.helper"))
    );
}

#[tokio::test]
async fn test_run_reports_stderr() {
    let temp = temp_dir();
    let err = ShellBackend::new()
        .run(&["rev-parse", "--git-dir"], temp.path(), None)
        .await
        .expect_err("not a repository");

    match err {
        GitError::CommandFailed { command, message } => {
            assert_eq!(command, "git rev-parse --git-dir");
            assert!(message.contains("not a git repository"), "{message}");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}
