// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  read_tree()    ignore::Walk, every entry (hidden, ignored)
//!        WalkOptions    skip_dirs (exact), skip_files (substring)
//! ```

pub mod walk;

#[cfg(test)]
mod tests;
