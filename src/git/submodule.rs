// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule management.
//!
//! ```text
//! submodule_update(remote = false)       submodule_update(remote = true)
//!   for each submodule:                    for each submodule:
//!     refresh auth (logged on error)         refresh auth (logged on error)
//!     submodule update --init                fetch --force origin
//!     pull --ff-only origin HEAD             checkout -f origin/<revision>
//!
//! ref lock conflict --> restart the pass, at most retry_limit times
//! ```

use tracing::{debug, error, info, warn};

use super::auth::{AuthMethod, strip_credentials};
use super::client::{Client, ORIGIN};
use super::{cmd, query};
use crate::error::GtcResult;

/// Run `pass`, restarting it while it fails on ref contention and fewer than
/// `limit` restarts have happened.
pub(crate) fn with_ref_retry<T>(
    limit: u32,
    operation: &str,
    mut pass: impl FnMut() -> GtcResult<T>,
) -> GtcResult<T> {
    let mut restarts = 0;
    loop {
        match pass() {
            Err(err) if err.is_ref_contention() && restarts < limit => {
                restarts += 1;
                warn!(
                    operation,
                    restart = restarts,
                    limit,
                    error = %err,
                    "Reference changed during operation, restarting"
                );
            }
            result => return result,
        }
    }
}

impl Client {
    /// Add the repository at `url` as submodule `name`, tracking `revision`.
    ///
    /// Does nothing when a submodule called `name` already exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git submodule add` fails or the URL cannot be
    /// rewritten afterwards.
    pub fn submodule_add(
        &self,
        name: &str,
        url: &str,
        revision: &str,
        auth: &AuthMethod,
    ) -> GtcResult<()> {
        let dir = self.dir_path();
        if query::submodules(dir)?.iter().any(|s| s.name == name) {
            debug!(name, "Submodule already exists");
            return Ok(());
        }

        let repository_url = auth.inject_into_url(url)?;
        let env = self.options().network_env(auth, url);
        info!(name, revision, "Adding submodule");
        cmd::add_submodule(dir, &repository_url, name, Some(revision), &env)?;
        self.submodule_update_auth(name, url, auth)
    }

    /// Add `other`'s origin as submodule `name`, tracking `other`'s revision
    /// with `other`'s credentials.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submodule_add`].
    pub fn add_client_as_submodule(&self, name: &str, other: &Self) -> GtcResult<()> {
        let opts = other.options();
        self.submodule_add(name, opts.origin_url(), opts.revision(), opts.auth())
    }

    /// Keep basic credentials out of `.gitmodules`: persist an `insteadOf`
    /// rule for the submodule host and reset the recorded URL to its plain
    /// form. Non-network URLs and non-basic auth are left alone.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repo config or `.gitmodules` cannot be
    /// updated.
    pub fn submodule_update_auth(&self, path: &str, url: &str, auth: &AuthMethod) -> GtcResult<()> {
        if !auth.is_basic() {
            return Ok(());
        }
        let Some(plain) = strip_credentials(url) else {
            return Ok(());
        };
        self.replace_to_auth_url(url, auth)?;
        cmd::set_submodule_url(self.dir_path(), path, &plain)
    }

    /// Bring every submodule up to date.
    ///
    /// With `remote`, each submodule is force-fetched and detached at
    /// `origin/<revision>` of this client. Otherwise the recorded commit is
    /// checked out and fast-forwarded to the submodule's remote `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if a fetch, checkout, or pull fails, or if ref
    /// contention outlasts the retry limit.
    pub fn submodule_update(&self, remote: bool) -> GtcResult<()> {
        let operation = if remote {
            "submodule update --remote"
        } else {
            "submodule update"
        };
        with_ref_retry(self.options().retry_limit(), operation, || {
            if remote {
                self.update_submodules_from_remote()
            } else {
                self.update_submodules_recorded()
            }
        })
    }

    /// Move submodules to their remote revision and, when that leaves the
    /// work tree dirty, commit and push the new pointers.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the update, commit, or push fails.
    pub fn sync_up_to_date(&self, message: &str) -> GtcResult<()> {
        self.submodule_update(true)?;
        if self.is_clean()? {
            debug!("Submodules already up to date");
            return Ok(());
        }
        info!("Committing updated submodule pointers");
        self.add_all()?;
        self.commit(message)?;
        self.push()
    }

    fn refresh_submodule_auth(&self, path: &str, url: &str) {
        if let Err(err) = self.submodule_update_auth(path, url, self.options().auth()) {
            error!(path, error = %err, "Failed to update submodule auth");
        }
    }

    fn update_submodules_recorded(&self) -> GtcResult<()> {
        let dir = self.dir_path();
        for sub in query::submodules(dir)? {
            self.refresh_submodule_auth(&sub.path, &sub.url);
            let env = self.options().remote_env(&sub.url);

            debug!(path = %sub.path, "Updating submodule");
            cmd::update_submodule(dir, &sub.path, true, &env)?;
            cmd::pull(&dir.join(&sub.path), ORIGIN, Some("HEAD"), &env)?;
        }
        Ok(())
    }

    fn update_submodules_from_remote(&self) -> GtcResult<()> {
        let dir = self.dir_path();
        let tracking = format!("refs/remotes/{ORIGIN}/{}", self.options().revision());
        for sub in query::submodules(dir)? {
            self.refresh_submodule_auth(&sub.path, &sub.url);
            let env = self.options().remote_env(&sub.url);

            if !sub.initialized {
                debug!(path = %sub.path, "Initializing submodule");
                cmd::update_submodule(dir, &sub.path, true, &env)?;
            }

            let sub_dir = dir.join(&sub.path);
            cmd::fetch(&sub_dir, ORIGIN, true, &env)?;
            let hash = query::resolve_revision(&sub_dir, &tracking)?;
            debug!(path = %sub.path, %hash, "Attaching submodule to remote revision");
            cmd::checkout(&sub_dir, &hash, true)?;
        }
        Ok(())
    }
}
