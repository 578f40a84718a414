// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DevexError, DevexResult, GitError, GitlabError, NetworkError, TerraformError};

#[test]
fn test_gitlab_error_display() {
    insta::assert_snapshot!(GitlabError::GroupNotFound.to_string(), @"Group not found");
}

#[test]
fn test_terraform_error_display() {
    let err = TerraformError::CommandFailed {
        code: 1,
        output: "no state".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"Error: exitValue = 1 :: no state");
}

#[test]
fn test_boxed_conversion() {
    let err: DevexError = GitError::CloneFailed {
        url: "git@example.com:a/b.git".to_string(),
        message: "destination exists".to_string(),
    }
    .into();
    assert!(matches!(err, DevexError::Git(_)));
    assert_eq!(
        err.to_string(),
        "git error: failed to clone git@example.com:a/b.git: destination exists"
    );
}

#[test]
fn test_io_conversion() {
    let err: DevexError = std::io::Error::other("no working directory").into();
    assert!(matches!(err, DevexError::Io(_)));
    assert_eq!(err.to_string(), "io error: no working directory");
}

#[test]
fn test_decode_error_is_not_transient() {
    let err = NetworkError::Decode {
        url: "https://gitlab.example.com/api/v4/version".to_string(),
        message: "expected value at line 1 column 1".to_string(),
    };
    assert!(!err.is_transient());
}

#[test]
fn test_devex_error_size() {
    let size = std::mem::size_of::<DevexError>();
    assert!(size <= 24, "DevexError is {size} bytes, expected <= 24");
}

#[test]
fn test_devex_result_size() {
    let size = std::mem::size_of::<DevexResult<()>>();
    assert!(size <= 24, "DevexResult<()> is {size} bytes, expected <= 24");
}
