// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```
//!
//! Uses gix for read-only operations (faster, no subprocess overhead).

use crate::error::GtcResult;
use std::collections::BTreeMap;
use std::path::Path;

use super::backend::{GitQuery, GixBackend, SubmoduleEntry, TagEntry};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
pub fn current_branch(path: &Path) -> GtcResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Hex id of the commit `HEAD` points at.
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD is unborn.
pub fn head_commit(path: &Path) -> GtcResult<String> {
    GixBackend::head_commit(path)
}

/// Resolve a revision to a commit id.
///
/// # Errors
///
/// Returns `GitError::RevisionNotFound` if nothing matches.
pub fn resolve_revision(path: &Path, spec: &str) -> GtcResult<String> {
    GixBackend::resolve_revision(path, spec)
}

/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened.
pub fn commit_exists(path: &Path, hash: &str) -> GtcResult<bool> {
    GixBackend::commit_exists(path, hash)
}

/// # Errors
///
/// Returns a `GitError` if the references cannot be listed.
pub fn local_branches(path: &Path) -> GtcResult<BTreeMap<String, String>> {
    GixBackend::local_branches(path)
}

/// # Errors
///
/// Returns a `GitError` if a tag cannot be peeled to a commit.
pub fn tags(path: &Path) -> GtcResult<Vec<TagEntry>> {
    GixBackend::tags(path)
}

/// # Errors
///
/// Returns a `GitError` if `.gitmodules` cannot be read.
pub fn submodules(path: &Path) -> GtcResult<Vec<SubmoduleEntry>> {
    GixBackend::submodules(path)
}
