// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::config::inis_lines;
use super::open_client;
use super::repo::{
    render_info, run_checkout_command, run_clone_command, run_commit_command, run_pull_command,
    run_push_command,
};
use super::submodule::run_submodule_command;
use crate::cli::{CheckoutArgs, CommitArgs, PullArgs, SubmoduleArgs, SubmoduleSubcommand};
use crate::config::Config;
use crate::mock::{MOCK_AUTHOR_EMAIL, MOCK_AUTHOR_NAME, Mock, MockCommit, MockOptions};
use std::path::Path;

fn config_for(dir: &Path, origin: &str) -> Config {
    let mut config = Config::default();
    config.client.dir_path = dir.to_path_buf();
    config.client.origin_url = origin.to_string();
    config.client.author_name = MOCK_AUTHOR_NAME.to_string();
    config.client.author_email = MOCK_AUTHOR_EMAIL.to_string();
    config.submodule.allow_file_protocol = true;
    config
}

fn mock_with_remote() -> Mock {
    Mock::new(
        MockOptions::builder()
            .with_remote(
                MockOptions::builder()
                    .with_commits(vec![MockCommit::new("init").with_file("file", "a")])
                    .build(),
            )
            .build(),
    )
    .unwrap()
}

fn origin_of(mock: &Mock) -> String {
    mock.client_options().origin_url().to_string()
}

#[test]
fn test_open_client_not_a_repository() {
    let temp = tempfile::tempdir().unwrap();
    let err = open_client(&config_for(temp.path(), "")).unwrap_err();
    assert!(format!("{err:#}").starts_with("failed to open repository at "));
}

#[test]
fn test_commit_command_all() {
    let mock = mock_with_remote();
    std::fs::write(mock.dir_path().join("new"), "x").unwrap();
    let config = config_for(mock.dir_path(), &origin_of(&mock));

    run_commit_command(
        &CommitArgs {
            message: "add new".to_string(),
            all: true,
        },
        &config,
    )
    .unwrap();
    assert!(mock.client().is_clean().unwrap());
}

#[test]
fn test_checkout_and_push_commands() {
    let mock = mock_with_remote();
    let config = config_for(mock.dir_path(), &origin_of(&mock));

    run_checkout_command(
        &CheckoutArgs {
            name: "feature".to_string(),
            force: true,
        },
        &config,
    )
    .unwrap();
    run_push_command(&config).unwrap();

    let remote = mock.remote().unwrap().client().info().unwrap();
    assert!(remote.branch_hashes.contains_key("feature"));
}

#[test]
fn test_pull_command_branch() {
    let mock = mock_with_remote();
    let name = mock.random_commit_remote("master").unwrap();
    let config = config_for(mock.dir_path(), &origin_of(&mock));

    run_pull_command(
        &PullArgs {
            branch: Some("master".to_string()),
        },
        &config,
    )
    .unwrap();
    assert!(mock.dir_path().join(name).is_file());
}

#[test]
fn test_clone_command() {
    let mock = mock_with_remote();
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("clone");

    run_clone_command(&config_for(&dest, &origin_of(&mock))).unwrap();
    assert!(dest.join("file").is_file());
}

#[test]
fn test_submodule_commands() {
    let child = mock_with_remote();
    let parent = mock_with_remote();
    let config = config_for(parent.dir_path(), &origin_of(&parent));

    let add = SubmoduleArgs {
        subcommand: SubmoduleSubcommand::Add {
            name: "child".to_string(),
            url: origin_of(&child),
            revision: None,
        },
    };
    run_submodule_command(&add, &config).unwrap();
    assert!(parent.dir_path().join("child/file").is_file());

    let update = SubmoduleArgs {
        subcommand: SubmoduleSubcommand::Update { remote: true },
    };
    run_submodule_command(&update, &config).unwrap();
}

#[test]
fn test_render_info() {
    let mock = mock_with_remote();
    let info = mock.client().info().unwrap();

    let compact = render_info(&info, true).unwrap();
    assert!(!compact.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(value["current_branch"], "master");

    let pretty = render_info(&info, false).unwrap();
    assert!(pretty.contains("\n  \"current\": "));
}

#[test]
fn test_inis_lines() {
    insta::assert_snapshot!(inis_lines(&[]).join("\n"), @"No configuration files loaded");
    let files = vec!["1. [file] a.toml".to_string()];
    assert_eq!(inis_lines(&files), files);
}
