// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (writes, submodules, credentials)
//! ```

use crate::error::GtcResult;
use std::path::Path;

use super::backend::{CommandEnv, GitMutation, ShellBackend};

/// Porcelain status lines, submodule pointer changes included.
///
/// # Errors
///
/// Returns a `GitError` if `git status` fails.
pub fn status_lines(path: &Path) -> GtcResult<Vec<String>> {
    ShellBackend::status_lines(path)
}

/// # Errors
///
/// Returns `GitError::RemoteNotFound` if the remote does not exist.
pub fn remote_url(path: &Path, remote: &str) -> GtcResult<String> {
    ShellBackend::remote_url(path, remote)
}

/// Clone a repository.
///
/// # Errors
///
/// Returns `GitError::CloneFailed` if the clone fails.
pub fn clone(url: &str, dest: &Path, branch: Option<&str>, env: &CommandEnv) -> GtcResult<()> {
    ShellBackend::clone(url, dest, branch, env)
}

/// Initialize a new repository.
///
/// # Errors
///
/// Returns a `GitError` if repository initialization fails.
pub fn init_repo(path: &Path, initial_branch: &str) -> GtcResult<()> {
    ShellBackend::init_repo(path, initial_branch)
}

/// # Errors
///
/// Returns a `GitError` if the fetch fails.
pub fn fetch(repo_path: &Path, remote: &str, force: bool, env: &CommandEnv) -> GtcResult<()> {
    ShellBackend::fetch(repo_path, remote, force, env)
}

/// Fast-forward pull with recurse-submodules.
///
/// # Errors
///
/// Returns a `GitError` if the pull fails.
pub fn pull(repo_path: &Path, remote: &str, branch: Option<&str>, env: &CommandEnv) -> GtcResult<()> {
    ShellBackend::pull(repo_path, remote, branch, env)
}

/// # Errors
///
/// Returns a `GitError` if the push is rejected.
pub fn push(repo_path: &Path, remote: &str, refspec: &str, env: &CommandEnv) -> GtcResult<()> {
    ShellBackend::push(repo_path, remote, refspec, env)
}

/// Checkout a branch, tag, or commit.
///
/// # Errors
///
/// Returns `GitError::CheckoutFailed` if the checkout fails.
pub fn checkout(repo_path: &Path, what: &str, force: bool) -> GtcResult<()> {
    ShellBackend::checkout(repo_path, what, force)
}

/// # Errors
///
/// Returns `GitError::CheckoutFailed` if the branch cannot be created.
pub fn checkout_new_branch(repo_path: &Path, name: &str, force: bool) -> GtcResult<()> {
    ShellBackend::checkout_new_branch(repo_path, name, force)
}

/// # Errors
///
/// Returns `GitError::CheckoutFailed` if the checkout fails.
pub fn reset_branch(repo_path: &Path, name: &str) -> GtcResult<()> {
    ShellBackend::reset_branch(repo_path, name)
}

/// # Errors
///
/// Returns a `GitError` if the path matches nothing.
pub fn add(repo_path: &Path, pathspec: &str) -> GtcResult<()> {
    ShellBackend::add(repo_path, pathspec)
}

/// # Errors
///
/// Returns a `GitError` if staging fails.
pub fn add_all(repo_path: &Path) -> GtcResult<()> {
    ShellBackend::add_all(repo_path)
}

/// # Errors
///
/// Returns a `GitError` if the commit fails.
pub fn commit(repo_path: &Path, message: &str, env: &CommandEnv) -> GtcResult<()> {
    ShellBackend::commit(repo_path, message, env)
}

/// # Errors
///
/// Returns a `GitError` if the tag already exists.
pub fn tag(repo_path: &Path, name: &str) -> GtcResult<()> {
    ShellBackend::tag(repo_path, name)
}

/// Add a submodule.
///
/// # Errors
///
/// Returns a `GitError` if the submodule cannot be added.
pub fn add_submodule(
    repo_path: &Path,
    url: &str,
    submodule_path: &str,
    branch: Option<&str>,
    env: &CommandEnv,
) -> GtcResult<()> {
    ShellBackend::add_submodule(repo_path, url, submodule_path, branch, env)
}

/// # Errors
///
/// Returns a `GitError` if the submodule is unknown.
pub fn set_submodule_url(repo_path: &Path, submodule_path: &str, url: &str) -> GtcResult<()> {
    ShellBackend::set_submodule_url(repo_path, submodule_path, url)
}

/// # Errors
///
/// Returns a `GitError` if the update fails.
pub fn update_submodule(
    repo_path: &Path,
    submodule_path: &str,
    init: bool,
    env: &CommandEnv,
) -> GtcResult<()> {
    ShellBackend::update_submodule(repo_path, submodule_path, init, env)
}

/// Set git config value.
///
/// # Errors
///
/// Returns a `GitError` if the config cannot be written.
pub fn set_config(repo_path: &Path, key: &str, value: &str) -> GtcResult<()> {
    ShellBackend::set_config(repo_path, key, value)
}
