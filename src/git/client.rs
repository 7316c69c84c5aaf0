// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository client.
//!
//! ```text
//! Client::init / open / clone (ClientOptions)
//!     |
//!     +-- reads  --> query (gix)
//!     +-- writes --> cmd   (git CLI + CommandEnv)
//!                          auth: insteadOf / GIT_SSH_COMMAND
//!                          author: GIT_AUTHOR_* / GIT_COMMITTER_*
//! ```
//!
//! The client keeps no open repository handle; every call re-reads the work
//! tree at `dir_path`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use bon::Builder;
use tracing::{debug, info, warn};

use super::auth::AuthMethod;
use super::backend::{CommandEnv, TagEntry};
use super::{cmd, query};
use crate::config::Config;
use crate::error::{FsError, GitError, GtcResult};
use crate::utility::fs::walk::{WalkOptions, read_tree};

/// Name of the remote every client talks to.
pub const ORIGIN: &str = "origin";

/// Settings for a [`Client`].
#[derive(Debug, Clone, Builder)]
pub struct ClientOptions {
    /// Local work tree.
    #[builder(setters(name = with_dir_path), into)]
    dir_path: PathBuf,
    /// URL of `origin`. May be a local path.
    #[builder(setters(name = with_origin_url), into, default)]
    origin_url: String,
    /// Branch the client works on.
    #[builder(setters(name = with_revision), into, default = "master".to_string())]
    revision: String,
    /// Create `revision` locally when the remote lacks it.
    #[builder(setters(name = with_create_branch), default = false)]
    create_branch: bool,
    #[builder(setters(name = with_author_name), into, default)]
    author_name: String,
    #[builder(setters(name = with_author_email), into, default)]
    author_email: String,
    #[builder(setters(name = with_auth), default)]
    auth: AuthMethod,
    /// Allow `file://` and local-path submodules (`protocol.file.allow=always`).
    #[builder(setters(name = with_allow_file_protocol), default = false)]
    allow_file_protocol: bool,
    /// Restarts of a submodule pass after a ref lock conflict.
    #[builder(setters(name = with_retry_limit), default = 3)]
    retry_limit: u32,
}

impl ClientOptions {
    /// Build options from the `[client]`, `[auth]` and `[submodule]` sections.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoAuthMethod` for incomplete credentials, or an
    /// `FsError` when the SSH key cannot be read.
    pub fn from_config(config: &Config) -> GtcResult<Self> {
        Ok(Self::builder()
            .with_dir_path(config.client.dir_path.clone())
            .with_origin_url(config.client.origin_url.clone())
            .with_revision(config.client.revision.clone())
            .with_create_branch(config.client.create_branch)
            .with_author_name(config.client.author_name.clone())
            .with_author_email(config.client.author_email.clone())
            .with_auth(AuthMethod::from_config(&config.auth)?)
            .with_allow_file_protocol(config.submodule.allow_file_protocol)
            .with_retry_limit(config.submodule.retry_limit)
            .build())
    }

    #[must_use]
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }

    #[must_use]
    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    #[must_use]
    pub fn revision(&self) -> &str {
        &self.revision
    }

    #[must_use]
    pub const fn create_branch(&self) -> bool {
        self.create_branch
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthMethod {
        &self.auth
    }

    #[must_use]
    pub const fn allow_file_protocol(&self) -> bool {
        self.allow_file_protocol
    }

    #[must_use]
    pub const fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    /// Command environment for network operations against `url`.
    pub(crate) fn remote_env(&self, url: &str) -> CommandEnv {
        self.network_env(&self.auth, url)
    }

    /// Like [`Self::remote_env`] but authenticating with `auth`.
    pub(crate) fn network_env(&self, auth: &AuthMethod, url: &str) -> CommandEnv {
        let env = auth.command_env(url);
        if self.allow_file_protocol {
            env.with_config("protocol.file.allow", "always")
        } else {
            env
        }
    }

    /// Author and committer identity, dated `at` when given.
    fn author_env(&self, at: Option<SystemTime>) -> CommandEnv {
        let mut env = CommandEnv::new();
        if !self.author_name.is_empty() {
            env = env
                .with_var("GIT_AUTHOR_NAME", &self.author_name)
                .with_var("GIT_COMMITTER_NAME", &self.author_name);
        }
        if !self.author_email.is_empty() {
            env = env
                .with_var("GIT_AUTHOR_EMAIL", &self.author_email)
                .with_var("GIT_COMMITTER_EMAIL", &self.author_email);
        }
        if let Some(at) = at {
            let secs = at.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
            let date = format!("@{secs} +0000");
            env = env
                .with_var("GIT_AUTHOR_DATE", &date)
                .with_var("GIT_COMMITTER_DATE", date);
        }
        env
    }
}

/// A branch or tag reference found by [`Client::revision_reference_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RefName {
    Branch(String),
    Tag(String),
}

impl RefName {
    /// Short name without the `refs/...` prefix.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Branch(name) | Self::Tag(name) => name,
        }
    }

    /// Fully qualified name (`refs/heads/x`, `refs/tags/x`).
    #[must_use]
    pub fn full(&self) -> String {
        match self {
            Self::Branch(name) => format!("refs/heads/{name}"),
            Self::Tag(name) => format!("refs/tags/{name}"),
        }
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}

/// A working repository driven through git.
#[derive(Debug, Clone)]
pub struct Client {
    opts: ClientOptions,
}

impl Client {
    /// Create an empty repository at `dir_path` whose initial branch is
    /// `revision`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git init` fails.
    pub fn init(opts: ClientOptions) -> GtcResult<Self> {
        cmd::init_repo(&opts.dir_path, &opts.revision)?;
        info!(path = %opts.dir_path.display(), branch = %opts.revision, "Initialized repository");
        Ok(Self { opts })
    }

    /// Open an existing work tree.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepoNotFound` if `dir_path` is not a git work tree.
    pub fn open(opts: ClientOptions) -> GtcResult<Self> {
        if !query::is_git_repo(&opts.dir_path) {
            return Err(GitError::RepoNotFound {
                path: opts.dir_path.display().to_string(),
            }
            .into());
        }
        Ok(Self { opts })
    }

    /// Clone `origin_url` at `revision`, recursing into submodules.
    ///
    /// With `create_branch`, a missing remote branch falls back to cloning the
    /// default branch and creating `revision` locally.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CloneFailed` if the clone fails.
    pub fn clone(opts: ClientOptions) -> GtcResult<Self> {
        let env = opts.remote_env(&opts.origin_url);
        info!(
            path = %opts.dir_path.display(),
            revision = %opts.revision,
            "Cloning repository"
        );
        match cmd::clone(&opts.origin_url, &opts.dir_path, Some(&opts.revision), &env) {
            Ok(()) => Ok(Self { opts }),
            Err(err) if opts.create_branch => {
                warn!(
                    revision = %opts.revision,
                    error = %err,
                    "Revision not cloneable, cloning default branch and creating it"
                );
                cmd::clone(&opts.origin_url, &opts.dir_path, None, &env)?;
                let client = Self { opts };
                client.checkout(&client.opts.revision, true)?;
                Ok(client)
            }
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.opts
    }

    #[must_use]
    pub fn dir_path(&self) -> &Path {
        &self.opts.dir_path
    }

    /// Stage one path.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the path does not exist.
    pub fn add(&self, path: &str) -> GtcResult<()> {
        cmd::add(self.dir_path(), path)
    }

    /// Stage every change in the work tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    pub fn add_all(&self) -> GtcResult<()> {
        cmd::add_all(self.dir_path())
    }

    /// Remove the work tree from disk.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the directory exists but cannot be removed.
    pub fn clean(&self) -> GtcResult<()> {
        let dir = self.dir_path();
        match std::fs::remove_dir_all(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::io(dir, e).into()),
        }
    }

    #[must_use]
    pub fn initialized(&self) -> bool {
        query::is_git_repo(self.dir_path())
    }

    /// True when the work tree exists and `origin` can be fetched.
    #[must_use]
    pub fn initialized_with_remote(&self) -> bool {
        self.initialized() && self.fetch().is_ok()
    }

    /// Fetch `origin`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote is missing or unreachable.
    pub fn fetch(&self) -> GtcResult<()> {
        cmd::fetch(self.dir_path(), ORIGIN, false, &self.origin_env())
    }

    /// Commit the index as the configured author. Empty commits are allowed.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails.
    pub fn commit(&self, message: &str) -> GtcResult<()> {
        cmd::commit(self.dir_path(), message, &self.opts.author_env(None))
    }

    /// [`Self::commit`] with author and committer dates pinned to `at`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails.
    pub fn commit_at(&self, message: &str, at: SystemTime) -> GtcResult<()> {
        cmd::commit(self.dir_path(), message, &self.opts.author_env(Some(at)))
    }

    /// Push `HEAD` to the same-named branch on `origin`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `origin` is missing or rejects the push.
    pub fn push(&self) -> GtcResult<()> {
        cmd::push(self.dir_path(), ORIGIN, "HEAD", &self.origin_env())
    }

    /// Fast-forward the current branch to `origin/<branch>`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch is missing or histories diverged.
    pub fn pull(&self, branch: &str) -> GtcResult<()> {
        cmd::pull(self.dir_path(), ORIGIN, Some(branch), &self.origin_env())
    }

    /// Fast-forward the current branch to its upstream.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if there is no upstream or histories diverged.
    pub fn pull_all(&self) -> GtcResult<()> {
        cmd::pull(self.dir_path(), ORIGIN, None, &self.origin_env())
    }

    /// Switch to branch `name`.
    ///
    /// With `force`, local changes are discarded and a missing branch is
    /// created at `HEAD`. Without it, a missing branch is an error.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if the switch fails.
    pub fn checkout(&self, name: &str, force: bool) -> GtcResult<()> {
        let dir = self.dir_path();
        if !force {
            return cmd::checkout(dir, name, false);
        }
        if self.branch_exists(name) {
            cmd::checkout(dir, name, true)
        } else {
            debug!(branch = name, "Creating branch");
            cmd::checkout_new_branch(dir, name, true)
        }
    }

    /// Switch to `dst`, creating it when missing. With `recreate`, `dst` is
    /// first reset to the current `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if the switch fails.
    pub fn create_branch(&self, dst: &str, recreate: bool) -> GtcResult<()> {
        if recreate {
            return cmd::reset_branch(self.dir_path(), dst);
        }
        self.checkout(dst, true)
    }

    /// No staged, unstaged or untracked changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status cannot be read.
    pub fn is_clean(&self) -> GtcResult<bool> {
        Ok(cmd::status_lines(self.dir_path())?.is_empty())
    }

    /// Resolve `name` as a branch, then as a tag.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RevisionNotFound` when neither exists.
    pub fn revision_reference_name(&self, name: &str) -> GtcResult<RefName> {
        let branch = RefName::Branch(name.to_string());
        if query::resolve_revision(self.dir_path(), &branch.full()).is_ok() {
            return Ok(branch);
        }
        let tag = RefName::Tag(name.to_string());
        if query::resolve_revision(self.dir_path(), &tag.full()).is_ok() {
            return Ok(tag);
        }
        Err(GitError::RevisionNotFound {
            revision: name.to_string(),
        }
        .into())
    }

    /// Commit id of branch `base`, tag `base`, or `base` itself when it is
    /// the full id of an existing commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RevisionNotFound` when nothing matches.
    pub fn hash_of(&self, base: &str) -> GtcResult<String> {
        if let Ok(reference) = self.revision_reference_name(base) {
            return query::resolve_revision(self.dir_path(), &reference.full());
        }
        if query::commit_exists(self.dir_path(), base)? {
            return Ok(base.to_string());
        }
        Err(GitError::RevisionNotFound {
            revision: base.to_string(),
        }
        .into())
    }

    /// Tag whose commit is the newest. Ties go to the first tag by name.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoTags` when the repository has no tags.
    pub fn latest_tag(&self) -> GtcResult<TagEntry> {
        query::tags(self.dir_path())?
            .into_iter()
            .reduce(|best, tag| if tag.time > best.time { tag } else { best })
            .ok_or_else(|| GitError::NoTags.into())
    }

    /// Create a lightweight tag at `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the tag exists.
    pub fn tag(&self, name: &str) -> GtcResult<()> {
        cmd::tag(self.dir_path(), name)
    }

    /// Write `files` (relative path to content), stage them, and commit.
    /// Nothing is committed when the work tree ends up clean.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if a file cannot be written, or a `GitError` if
    /// staging or committing fails.
    pub fn commit_files(&self, files: &BTreeMap<String, Vec<u8>>, message: &str) -> GtcResult<()> {
        for (path, content) in files {
            self.write_file(path, content)?;
            self.add(path)?;
        }
        if self.is_clean()? {
            debug!("Nothing to commit");
            return Ok(());
        }
        self.commit(message)
    }

    /// Read files and directories under the work tree.
    ///
    /// Directories named in `ignore_dirs` are pruned; files whose name
    /// contains an `ignore_files` entry are skipped. Keys are relative to the
    /// work tree unless `absolute`. Missing paths are skipped.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if a file cannot be read.
    pub fn read_files(
        &self,
        paths: &[&str],
        ignore_files: &[&str],
        ignore_dirs: &[&str],
        absolute: bool,
    ) -> GtcResult<BTreeMap<String, Vec<u8>>> {
        let options = WalkOptions::builder()
            .with_skip_dirs(ignore_dirs.iter().map(ToString::to_string).collect())
            .with_skip_files(ignore_files.iter().map(ToString::to_string).collect())
            .build();

        let mut result = BTreeMap::new();
        for path in paths {
            for (file, content) in read_tree(self.dir_path().join(path), &options)? {
                let key = if absolute {
                    file.display().to_string()
                } else {
                    file.strip_prefix(self.dir_path())
                        .unwrap_or(&file)
                        .display()
                        .to_string()
                };
                result.insert(key, content);
            }
        }
        Ok(result)
    }

    /// Point `dst` on `origin` at the fetched `origin/src`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `origin/src` is unknown or the push is rejected.
    pub fn mirror_branch(&self, src: &str, dst: &str) -> GtcResult<()> {
        let refspec = format!("refs/remotes/{ORIGIN}/{src}:refs/heads/{dst}");
        cmd::push(self.dir_path(), ORIGIN, &refspec, &self.origin_env())
    }

    /// Persist a `url.<authenticated>.insteadOf <plain>` rule for the host of
    /// `url`. No-op without basic credentials or for non-network URLs.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config cannot be written.
    pub fn replace_to_auth_url(&self, url: &str, auth: &AuthMethod) -> GtcResult<()> {
        let Some((authenticated, plain)) = auth.instead_of(url) else {
            return Ok(());
        };
        cmd::set_config(
            self.dir_path(),
            &format!("url.{authenticated}.insteadOf"),
            &plain,
        )
    }

    pub(crate) fn write_file(&self, relative: &str, content: &[u8]) -> GtcResult<()> {
        let path = self.dir_path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| FsError::io(&path, e))?;
        Ok(())
    }

    /// Local branch `name` exists.
    fn branch_exists(&self, name: &str) -> bool {
        query::resolve_revision(self.dir_path(), &RefName::Branch(name.to_string()).full()).is_ok()
    }

    /// Auth environment for `origin`, using the configured URL or the one in
    /// the repository config.
    pub(crate) fn origin_env(&self) -> CommandEnv {
        if self.opts.origin_url.is_empty() {
            let url = cmd::remote_url(self.dir_path(), ORIGIN).unwrap_or_default();
            self.opts.remote_env(&url)
        } else {
            self.opts.remote_env(&self.opts.origin_url)
        }
    }
}
