// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive snapshot of a work tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::client::Client;
use super::{cmd, query};
use crate::error::{FsError, GtcResult};

/// State of a work tree and, recursively, its checked-out submodules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Absolute work tree root.
    pub dir_path: PathBuf,
    /// Commit id of `HEAD`.
    pub current: String,
    /// `None` when `HEAD` is detached.
    pub current_branch: Option<String>,
    pub branch_hashes: BTreeMap<String, String>,
    /// Porcelain status lines (`XY path`).
    pub status: Vec<String>,
    /// Keyed by submodule path.
    pub submodules: BTreeMap<String, Self>,
}

impl Info {
    /// Snapshot the work tree at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if `dir` does not exist, or a `GitError` if it
    /// has no commits or cannot be read.
    pub fn collect(dir: &Path) -> GtcResult<Self> {
        let dir_path = dir.canonicalize().map_err(|e| FsError::io(dir, e))?;

        let mut submodules = BTreeMap::new();
        for sub in query::submodules(&dir_path)? {
            if !sub.initialized {
                debug!(path = %sub.path, "Skipping uninitialized submodule");
                continue;
            }
            let nested = Self::collect(&dir_path.join(&sub.path))?;
            submodules.insert(sub.path, nested);
        }

        Ok(Self {
            current: query::head_commit(&dir_path)?,
            current_branch: query::current_branch(&dir_path)?,
            branch_hashes: query::local_branches(&dir_path)?,
            status: cmd::status_lines(&dir_path)?,
            submodules,
            dir_path,
        })
    }

    /// True when this tree and every submodule have no pending changes.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.status.is_empty() && self.submodules.values().all(Self::is_clean)
    }
}

impl Client {
    /// Snapshot this client's work tree.
    ///
    /// # Errors
    ///
    /// Same as [`Info::collect`].
    pub fn info(&self) -> GtcResult<Info> {
        Info::collect(self.dir_path())
    }
}
