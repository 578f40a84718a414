// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    clone.concurrency     = 8
    clone.timeout_secs    = (unset)
    discovery.concurrency = 16
    github.page_size      = 30
    github.token          = (unset)
    github.url            = https://api.github.com
    gitlab.page_size      = 10
    gitlab.token          = (unset)
    gitlab.url            = https://gitlab.com
    http.retry_attempts   = 3
    http.retry_delay_ms   = 1000
    http.retry_multiplier = 2
    http.timeout_secs     = 30
    terraform.command     = terraform
    terraform.secrets     = aws_iam_access_key, tls_private_key, random_password
    ");
}

#[test]
fn test_default_config_is_valid() {
    Config::default().validate().expect("defaults should validate");
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
            [gitlab]
            url = "https://gitlab.example.com"
            page_size = 50

            [clone]
            concurrency = 4
            timeout_secs = 600

            [terraform]
            secrets = ["tls_private_key"]
        "#,
    )
    .expect("parse should succeed");

    assert_eq!(config.gitlab.url, "https://gitlab.example.com");
    assert_eq!(config.gitlab.page_size, 50);
    assert_eq!(config.clone.concurrency, 4);
    assert_eq!(config.clone.timeout(), Some(Duration::from_secs(600)));
    assert_eq!(config.terraform.secrets, vec!["tls_private_key"]);
    assert_eq!(config.terraform.command, "terraform", "default should persist");
}

#[test]
fn test_format_options_hides_tokens() {
    let config = Config::parse(
        r#"
            [gitlab]
            token = "glpat-very-secret"

            [github]
            token = "ghp_very_secret"
        "#,
    )
    .expect("parse should succeed");

    let formatted = config.format_options().join("\n");
    assert!(formatted.contains("gitlab.token          = [hidden]"));
    assert!(formatted.contains("github.token          = [hidden]"));
    assert!(!formatted.contains("very-secret"));
    assert!(!formatted.contains("very_secret"));
}

#[test]
fn test_deny_unknown_fields() {
    let err = Config::parse("[gitlab]\n urll = \"https://typo.example.com\"")
        .expect_err("unknown key should be rejected");
    assert!(err.to_string().contains("urll"), "{err}");

    assert!(Config::parse("[mystery]\n enabled = true").is_err());
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        "[gitlab]\n url = \"not a url\"",
        "[github]\n page_size = 0",
        "[gitlab]\n page_size = 101",
        "[clone]\n concurrency = 0",
        "[discovery]\n concurrency = 0",
        "[http]\n retry_attempts = 0",
    ];
    for case in cases {
        assert!(Config::parse(case).is_err(), "should reject: {case}");
    }
}

#[test]
fn test_validate_error_names_key() {
    let err = Config::parse("[github]\n page_size = 0").expect_err("invalid page size");
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'page_size' in section '[github]': must be between 1 and 100, got 0"
    );
}

#[test]
fn test_http_client_options() {
    let config = Config::parse("[http]\n retry_attempts = 5\n retry_delay_ms = 10")
        .expect("parse should succeed");
    let options = config.http.client_options();

    assert_eq!(options.timeout(), Duration::from_secs(30));
    assert_eq!(options.retry().attempts(), 5);
    assert_eq!(options.retry().delay_before(1), Duration::from_millis(10));
    assert_eq!(options.retry().delay_before(2), Duration::from_millis(20));
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[clone]\n concurrency = 2")
        .add_toml_file_optional("/nonexistent/devex.toml")
        .add_toml_str("[gitlab]\n page_size = 20");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [string] <string>
    2. [string] <string>
    ");
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file("/nonexistent/path/to/devex.toml");
    assert!(loader.build().is_err());
}

#[test]
fn test_config_loader_add_toml_file_invalid_toml() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    let result = ConfigLoader::new().add_toml_file(file.path()).build();
    assert!(result.is_err(), "build should fail with invalid TOML");
}

#[test]
fn test_config_loader_layered_sources() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[gitlab]
url = "https://gitlab.file.example.com"
page_size = 25

[clone]
concurrency = 2
"#
    )
    .expect("failed to write");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .add_toml_str("[gitlab]\n url = \"https://gitlab.string.example.com\"")
        .build()
        .expect("build should succeed");

    assert_eq!(config.gitlab.url, "https://gitlab.string.example.com");
    assert_eq!(config.gitlab.page_size, 25, "file value should persist");
    assert_eq!(config.clone.concurrency, 2, "file value should persist");
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable names are unique to this test.
    unsafe {
        std::env::set_var("DEVEXTEST_GITLAB__URL", "https://gitlab.env.example.com");
        std::env::set_var("DEVEXTEST_CLONE__CONCURRENCY", "3");
        std::env::set_var("DEVEXTEST_TERRAFORM__SECRETS", "tls_private_key,aws_iam_access_key");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[gitlab]\n url = \"https://gitlab.toml.example.com\"")
        .with_env_prefix("DEVEXTEST")
        .build()
        .expect("build should succeed");

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("DEVEXTEST_GITLAB__URL");
        std::env::remove_var("DEVEXTEST_CLONE__CONCURRENCY");
        std::env::remove_var("DEVEXTEST_TERRAFORM__SECRETS");
    }

    assert_eq!(config.gitlab.url, "https://gitlab.env.example.com");
    assert_eq!(config.clone.concurrency, 3);
    assert_eq!(
        config.terraform.secrets,
        vec!["tls_private_key", "aws_iam_access_key"]
    );
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[gitlab]\n token = \"from-file\"")
        .set("gitlab.token", "from-cli")
        .expect("set should succeed")
        .set_opt("github.token", None::<String>)
        .expect("set_opt should succeed")
        .set(
            "terraform.secrets",
            vec!["random_password".to_string()],
        )
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.gitlab.token, "from-cli");
    assert!(config.github.token.is_empty());
    assert_eq!(config.terraform.secrets, vec!["random_password"]);
}

#[test]
fn test_config_loader_build_deserialization_error() {
    let err = ConfigLoader::new()
        .add_toml_str("[clone]\n concurrency = \"many\"")
        .build()
        .expect_err("build should fail with type mismatch");
    let err_str = err.to_string();
    assert!(
        err_str.contains("concurrency") || err_str.contains("invalid"),
        "error should mention the problematic field: {err_str}"
    );
}
