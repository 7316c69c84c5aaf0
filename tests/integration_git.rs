// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the repository client.
//!
//! Drives the public API against real temporary repositories, the way a
//! GitOps job would: clone, write manifests, push, and track submodules.

use gtc::git::query::{current_branch, head_commit, local_branches, submodules};
use gtc::git::{Client, ClientOptions};
use gtc::mock::{MOCK_AUTHOR_EMAIL, MOCK_AUTHOR_NAME, Mock, MockCommit, MockOptions};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// A remote repository with one commit on `master`, wrapped in a mock that
/// has cloned it.
fn upstream() -> Mock {
    Mock::new(
        MockOptions::builder()
            .with_remote(
                MockOptions::builder()
                    .with_commits(vec![
                        MockCommit::new("init").with_file("manifests/app.yaml", "replicas: 1"),
                    ])
                    .build(),
            )
            .build(),
    )
    .expect("failed to build mock")
}

fn bot_options(dir: &Path, origin: &str, revision: &str) -> ClientOptions {
    ClientOptions::builder()
        .with_dir_path(dir)
        .with_origin_url(origin)
        .with_revision(revision)
        .with_create_branch(true)
        .with_author_name(MOCK_AUTHOR_NAME)
        .with_author_email(MOCK_AUTHOR_EMAIL)
        .with_allow_file_protocol(true)
        .build()
}

#[test]
fn gitops_commit_and_push_to_new_branch() {
    let mock = upstream();
    let origin = mock.client_options().origin_url().to_string();
    let temp = temp_dir();

    let client = Client::clone(bot_options(&temp.path().join("work"), &origin, "env/prod"))
        .expect("clone with branch creation");
    assert_eq!(
        current_branch(client.dir_path()).unwrap().as_deref(),
        Some("env/prod")
    );

    let files = BTreeMap::from([(
        "manifests/app.yaml".to_string(),
        b"replicas: 3".to_vec(),
    )]);
    client.commit_files(&files, "Scale app").unwrap();
    client.push().unwrap();

    let remote_dir = mock.remote().unwrap().dir_path();
    let remote_branches = local_branches(remote_dir).unwrap();
    assert_eq!(
        remote_branches["env/prod"],
        head_commit(client.dir_path()).unwrap()
    );
    assert_ne!(remote_branches["env/prod"], remote_branches["master"]);
}

#[test]
fn gitops_second_clone_sees_pushed_change() {
    let mock = upstream();
    let origin = mock.client_options().origin_url().to_string();
    let temp = temp_dir();

    let writer = Client::clone(bot_options(&temp.path().join("a"), &origin, "master")).unwrap();
    let files = BTreeMap::from([("manifests/new.yaml".to_string(), b"kind: Service".to_vec())]);
    writer.commit_files(&files, "Add service").unwrap();
    writer.push().unwrap();

    let reader = Client::clone(bot_options(&temp.path().join("b"), &origin, "master")).unwrap();
    let read = reader.read_files(&["manifests"], &[], &[], false).unwrap();
    let keys: Vec<&str> = read.keys().map(String::as_str).collect();
    assert_eq!(keys, ["manifests/app.yaml", "manifests/new.yaml"]);
    assert_eq!(read["manifests/new.yaml"], b"kind: Service");
}

#[test]
fn gitops_submodule_tracks_remote_branch() {
    let chart = upstream();
    let parent = upstream();
    let client = parent.client();

    client
        .add_client_as_submodule("chart", chart.client())
        .unwrap();
    client.commit("Add chart").unwrap();
    client.push().unwrap();

    let subs = submodules(client.dir_path()).unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].url, chart.client_options().origin_url());

    chart.random_commit_remote("master").unwrap();
    client.sync_up_to_date("Bump chart").unwrap();

    let info = client.info().unwrap();
    assert!(info.is_clean());
    assert_eq!(
        info.submodules["chart"].current,
        head_commit(chart.remote().unwrap().dir_path()).unwrap()
    );
}

#[test]
fn gitops_clone_missing_remote_fails() {
    let temp = temp_dir();
    let missing = temp.path().join("missing").display().to_string();

    let result = Client::clone(bot_options(&temp.path().join("work"), &missing, "master"));
    assert!(result.is_err());
    assert!(!temp.path().join("work").join(".git").exists());
}
