// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::{ResourceMode, TerraformCommand, TerraformStateFile, TerraformStateService};
use crate::error::{ProcessError, TerraformError};

/// Stand-in for terraform answering from files in the module directory.
const FAKE_TERRAFORM: &str = r#"#!/bin/sh
echo "$@" >> calls.log
case "$1" in
  state)
    case "$2" in
      pull) cat state.json ;;
      list) cat state.list ;;
      *) exit 2 ;;
    esac ;;
  taint|untaint)
    if [ "$2" = "tls_private_key.locked" ]; then
      echo "Error acquiring the state lock"
      exit 1
    fi
    echo "Resource instance $2 has been marked as ${1}ed." ;;
  *) exit 2 ;;
esac
"#;

const STATE_LIST: &str = "aws_iam_access_key.deploy
aws_iam_user.deploy
module.certs.tls_private_key.ca
random_pet.name
data.aws_caller_identity.current
";

const STATE_JSON: &str = r#"{
  "version": 4,
  "terraform_version": "1.5.7",
  "serial": 12,
  "lineage": "3f0c1a52-0000-0000-0000-000000000000",
  "outputs": {},
  "resources": [
    {
      "mode": "managed",
      "type": "aws_iam_access_key",
      "name": "deploy",
      "provider": "provider[\"registry.terraform.io/hashicorp/aws\"]",
      "instances": []
    },
    {
      "module": "module.certs",
      "mode": "data",
      "type": "aws_caller_identity",
      "name": "current",
      "instances": []
    }
  ]
}"#;

struct Fixture {
    _root: TempDir,
    executable: PathBuf,
    module: PathBuf,
}

fn fixture() -> Fixture {
    let root = tempfile::tempdir().expect("failed to create temp dir");
    let executable = root.path().join("terraform");
    std::fs::write(&executable, FAKE_TERRAFORM).expect("failed to write fake terraform");
    std::fs::set_permissions(&executable, std::fs::Permissions::from_mode(0o755))
        .expect("failed to make fake terraform executable");

    let module = root.path().join("module");
    std::fs::create_dir(&module).expect("failed to create module dir");
    std::fs::write(module.join("state.list"), STATE_LIST).expect("failed to write state list");
    std::fs::write(module.join("state.json"), STATE_JSON).expect("failed to write state");

    Fixture {
        _root: root,
        executable,
        module,
    }
}

fn service(fixture: &Fixture) -> TerraformStateService {
    TerraformStateService::new(
        TerraformCommand::new(&fixture.executable),
        vec![
            "aws_iam_access_key".to_string(),
            "tls_private_key".to_string(),
            "random_password".to_string(),
        ],
    )
}

fn calls(module: &Path) -> Vec<String> {
    std::fs::read_to_string(module.join("calls.log"))
        .expect("calls log")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_execute_returns_stdout() {
    let fixture = fixture();
    let output = TerraformCommand::new(&fixture.executable)
        .execute(&fixture.module, &["state", "list"])
        .await
        .expect("state list should succeed");
    assert_eq!(output, STATE_LIST.trim_end());
}

#[tokio::test]
async fn test_execute_reports_exit_code_and_stdout() {
    let fixture = fixture();
    let err = TerraformCommand::new(&fixture.executable)
        .execute(&fixture.module, &["taint", "tls_private_key.locked"])
        .await
        .expect_err("locked resource");

    insta::assert_snapshot!(err.to_string(), @"Error: exitValue = 1 :: Error acquiring the state lock");
}

#[tokio::test]
async fn test_execute_missing_executable() {
    let fixture = fixture();
    let err = TerraformCommand::new(fixture.module.join("no-such-terraform"))
        .execute(&fixture.module, &["state", "list"])
        .await
        .expect_err("nothing to spawn");

    assert!(
        matches!(err, TerraformError::Process(ProcessError::SpawnFailed { .. })),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_list_secrets_matches_any_segment() {
    let fixture = fixture();
    let secrets = service(&fixture)
        .list_secrets(&fixture.module)
        .await
        .expect("listing should succeed");

    assert_eq!(
        secrets,
        vec!["aws_iam_access_key.deploy", "module.certs.tls_private_key.ca"]
    );
}

#[tokio::test]
async fn test_taint_secrets() {
    let fixture = fixture();
    let outcomes = service(&fixture)
        .taint_secrets(&fixture.module, false)
        .await
        .expect("listing should succeed");

    let messages: Vec<_> = outcomes
        .iter()
        .map(|outcome| outcome.result.as_deref().expect("taint should succeed").trim())
        .collect();
    insta::assert_snapshot!(messages.join("\n"), @r"
    Resource instance aws_iam_access_key.deploy has been marked as tainted.
    Resource instance module.certs.tls_private_key.ca has been marked as tainted.
    ");
    assert_eq!(
        calls(&fixture.module),
        vec![
            "state list",
            "taint aws_iam_access_key.deploy",
            "taint module.certs.tls_private_key.ca",
        ]
    );
}

#[tokio::test]
async fn test_untaint_secrets() {
    let fixture = fixture();
    let outcomes = service(&fixture)
        .taint_secrets(&fixture.module, true)
        .await
        .expect("listing should succeed");

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
    assert_eq!(
        calls(&fixture.module)[1..],
        [
            "untaint aws_iam_access_key.deploy",
            "untaint module.certs.tls_private_key.ca",
        ]
    );
}

#[tokio::test]
async fn test_taint_failure_is_reported_per_resource() {
    let fixture = fixture();
    std::fs::write(
        fixture.module.join("state.list"),
        "tls_private_key.locked\nrandom_password.db\n",
    )
    .expect("failed to write state list");

    let outcomes = service(&fixture)
        .taint_secrets(&fixture.module, false)
        .await
        .expect("listing should succeed");

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].address, "tls_private_key.locked");
    assert!(matches!(
        outcomes[0].result,
        Err(TerraformError::CommandFailed { code: 1, .. })
    ));
    assert_eq!(outcomes[1].address, "random_password.db");
    assert!(outcomes[1].result.is_ok());
}

#[tokio::test]
async fn test_taint_secrets_listing_failure() {
    let fixture = fixture();
    std::fs::remove_file(fixture.module.join("state.list")).expect("failed to remove state list");

    let err = service(&fixture)
        .taint_secrets(&fixture.module, false)
        .await
        .expect_err("listing should fail");

    assert!(matches!(err, TerraformError::CommandFailed { code: 1, .. }), "{err:?}");
    assert_eq!(calls(&fixture.module), vec!["state list"]);
}

#[tokio::test]
async fn test_pull_state_file() {
    let fixture = fixture();
    let state_file = service(&fixture)
        .pull_state_file(&fixture.module)
        .await
        .expect("pull should succeed");

    let path = state_file.path().to_path_buf();
    let file_name = path.file_name().and_then(|n| n.to_str()).expect("file name");
    assert!(file_name.starts_with("terraform-state"));
    assert!(file_name.ends_with(".tfstate"));
    assert_eq!(std::fs::read_to_string(&path).expect("state file"), STATE_JSON);

    let state = state_file.state();
    assert_eq!(state.terraform_version, "1.5.7");
    assert_eq!(state.resources.len(), 2);
    assert_eq!(state.resources[0].resource_type, "aws_iam_access_key");
    assert_eq!(state.resources[0].module, "");
    assert_eq!(state.resources[1].mode, ResourceMode::Data);
    assert_eq!(state.resources[1].module, "module.certs");

    drop(state_file);
    assert!(!path.exists(), "temporary state should be removed on drop");
}

#[test]
fn test_state_file_rejects_garbage() {
    let err = TerraformStateFile::create("No state.").expect_err("not json");
    assert!(matches!(err, TerraformError::StateFile { .. }));
}

#[test]
fn test_state_file_accepts_empty_state() {
    let state_file = TerraformStateFile::create("\n").expect("empty state");
    assert_eq!(state_file.state().resources.len(), 0);
}
