// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::walk::{WalkOptions, read_tree};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn relative_names(temp: &TempDir, options: &WalkOptions) -> String {
    read_tree(temp.path(), options)
        .unwrap()
        .keys()
        .map(|p| p.strip_prefix(temp.path()).unwrap().display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_read_tree_includes_hidden_and_nested() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("dir/nested")).unwrap();
    std::fs::write(temp.path().join("file"), [0, 0]).unwrap();
    std::fs::write(temp.path().join(".hidden"), "h").unwrap();
    std::fs::write(temp.path().join("dir/nested/leaf.yaml"), "kind: Pod").unwrap();

    insta::assert_snapshot!(relative_names(&temp, &WalkOptions::default()), @r"
    .hidden
    dir/nested/leaf.yaml
    file
    ");
}

#[test]
fn test_read_tree_ignores_gitignore_rules() {
    let temp = temp_dir();
    std::fs::write(temp.path().join(".gitignore"), "ignored.txt\n").unwrap();
    std::fs::write(temp.path().join("ignored.txt"), "still read").unwrap();

    let files = read_tree(temp.path(), &WalkOptions::default()).unwrap();
    assert_eq!(
        files.get(&temp.path().join("ignored.txt")).map(Vec::as_slice),
        Some(b"still read".as_slice())
    );
}

#[test]
fn test_read_tree_skip_dirs_exact_name() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("vendor")).unwrap();
    std::fs::create_dir_all(temp.path().join("vendored")).unwrap();
    std::fs::write(temp.path().join("vendor/a"), "").unwrap();
    std::fs::write(temp.path().join("vendored/b"), "").unwrap();

    let options = WalkOptions::builder()
        .with_skip_dirs(vec!["vendor".to_string()])
        .build();
    insta::assert_snapshot!(relative_names(&temp, &options), @"vendored/b");
}

#[test]
fn test_read_tree_skip_files_by_substring() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("values.yaml"), "").unwrap();
    std::fs::write(temp.path().join("values.yaml.bak"), "").unwrap();
    std::fs::write(temp.path().join("notes.bak.txt"), "").unwrap();

    let options = WalkOptions::builder()
        .with_skip_files(vec![".bak".to_string()])
        .build();
    insta::assert_snapshot!(relative_names(&temp, &options), @"values.yaml");
}

#[test]
fn test_read_tree_single_file_root() {
    let temp = temp_dir();
    let file = temp.path().join("only.txt");
    std::fs::write(&file, "content").unwrap();

    let options = WalkOptions::builder()
        .with_skip_files(vec!["only".to_string()])
        .build();
    let files = read_tree(&file, &options).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[&file], b"content");
}

#[test]
fn test_read_tree_missing_root_is_empty() {
    let temp = temp_dir();
    let files = read_tree(temp.path().join("missing"), &WalkOptions::default()).unwrap();
    assert!(files.is_empty());
}
