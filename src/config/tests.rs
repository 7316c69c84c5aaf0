// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.client.revision, "master");
    assert_eq!(config.client.dir_path, PathBuf::from("."));
    assert!(!config.client.create_branch);
    assert!(config.auth.is_empty());
    assert_eq!(config.submodule.retry_limit, 3);
    assert!(!config.submodule.allow_file_protocol);
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
output_log_level = 4

[client]
dir_path = "/srv/deploy"
origin_url = "https://example.com/org/manifests.git"
revision = "main"
create_branch = true
author_name = "bot"
author_email = "bot@example.com"

[auth]
username = "bot"
password = "s3cret"

[submodule]
allow_file_protocol = true
retry_limit = 5
"#;

    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.client.dir_path, PathBuf::from("/srv/deploy"));
    assert_eq!(config.client.revision, "main");
    assert!(config.client.create_branch);
    assert_eq!(config.auth.username, "bot");
    assert_eq!(config.auth.password, "s3cret");
    assert!(config.submodule.allow_file_protocol);
    assert_eq!(config.submodule.retry_limit, 5);
}

#[test]
fn test_deny_unknown_fields() {
    let result = Config::parse("[client]\nrevison = \"main\"\n");
    assert!(result.is_err(), "typo in key should be rejected");

    let result = Config::parse("[unknown_section]\nfoo = \"bar\"\n");
    assert!(result.is_err(), "unknown section should be rejected");
}

#[test]
fn test_validate_password_without_username() {
    let err = Config::parse("[auth]\npassword = \"x\"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'username' in section '[auth]': a username is required when a password or ssh key is set"
    );
}

#[test]
fn test_validate_empty_revision() {
    assert!(Config::parse("[client]\nrevision = \" \"\n").is_err());
}

#[test]
fn test_config_loader_set_overrides_file() {
    let config = ConfigLoader::new()
        .add_toml_str("[client]\nrevision = \"main\"\n")
        .set_from_str("client/revision=release")
        .unwrap()
        .set_from_str("submodule.retry_limit = 7")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.client.revision, "release");
    assert_eq!(config.submodule.retry_limit, 7);
}

#[test]
fn test_config_loader_set_from_str_requires_equals() {
    let result = ConfigLoader::new().set_from_str("client.revision");
    assert!(result.is_err());
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[client]\nrevision = \"main\"")
        .add_toml_file_optional("/nonexistent/optional.toml")
        .add_toml_str("[auth]\nusername = \"bot\"");

    insta::assert_snapshot!(
        loader.format_loaded_files().join("\n"),
        @r"
    1. [string] <string>
    2. [string] <string>
    "
    );
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gtc.toml");
    std::fs::write(&path, "[client]\norigin_url = \"file:///srv/origin\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.client.origin_url, "file:///srv/origin");
}

#[test]
fn test_format_options_hides_password() {
    let config = Config::parse(
        r#"
[auth]
username = "bot"
password = "super_secret_token"
"#,
    )
    .unwrap();

    let formatted = config.format_options().join("\n");
    assert!(formatted.contains("auth.password"));
    assert!(formatted.contains("[hidden]"));
    assert!(!formatted.contains("super_secret_token"));
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let options = Config::default().format_options();
    let keys: Vec<&str> = options
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    let eq_columns: Vec<usize> = options.iter().filter_map(|l| l.find(" = ")).collect();
    assert!(eq_columns.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_load_error_names_sources() {
    let err = Config::parse("[client]\nrevison = \"main\"\n").unwrap_err();
    assert!(
        err.to_string()
            .starts_with("failed to load config from <string>: "),
        "{err}"
    );
}
