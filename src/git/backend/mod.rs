// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend   (pure Rust gix)
//!                     --> ShellBackend (git CLI, cross-check)
//! GitMutation (write) --> ShellBackend (git CLI)
//!
//! CommandEnv: per-invocation `-c key=value` + env vars
//!             (credentials, author identity, file protocol)
//! ```

use crate::error::{FsError, GitError, GixError, GtcResult, ProcessError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace};

use super::auth::redact_url;

/// A tag and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// Short tag name (`v1.0.0`).
    pub name: String,
    /// Hex id of the peeled commit.
    pub commit: String,
    /// Author time of the peeled commit in seconds since the unix epoch.
    pub time: i64,
}

/// A submodule declared in `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleEntry {
    pub name: String,
    /// Path relative to the superproject work tree.
    pub path: String,
    pub url: String,
    /// A repository is checked out at `path`.
    pub initialized: bool,
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors inspect repository state at exactly `path`; parents are not
/// searched.
pub trait GitQuery {
    /// Check if `path` is the root of a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD cannot be read.
    fn current_branch(path: &Path) -> GtcResult<Option<String>>;

    /// Hex id of the commit `HEAD` points at.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD is unborn.
    fn head_commit(path: &Path) -> GtcResult<String>;

    /// Resolve a revision (`refs/heads/x`, `refs/tags/y`, `HEAD`, ...) to the
    /// hex id of the commit it ultimately points at.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RevisionNotFound` if the revision does not resolve.
    fn resolve_revision(path: &Path, spec: &str) -> GtcResult<String>;

    /// True when `hash` is a full hex object id naming an existing commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened.
    fn commit_exists(path: &Path, hash: &str) -> GtcResult<bool>;

    /// Local branches, short name to hex id.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the references cannot be listed.
    fn local_branches(path: &Path) -> GtcResult<BTreeMap<String, String>>;

    /// All tags with their peeled commit and commit time.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the references or commits cannot be read.
    fn tags(path: &Path) -> GtcResult<Vec<TagEntry>>;

    /// Submodules declared in `.gitmodules`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `.gitmodules` cannot be read.
    fn submodules(path: &Path) -> GtcResult<Vec<SubmoduleEntry>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// These go through the git CLI for:
/// - credential injection per invocation
/// - submodule add/update
/// - full git CLI compatibility (push, pull, merge)
pub trait GitMutation {
    /// Clone a repository, recursing into submodules.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CloneFailed` if the clone fails.
    fn clone(url: &str, dest: &Path, branch: Option<&str>, env: &CommandEnv) -> GtcResult<()>;

    /// Initialize a new repository with the given initial branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the directory cannot be created or init fails.
    fn init_repo(path: &Path, initial_branch: &str) -> GtcResult<()>;

    /// Fetch from remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch fails.
    fn fetch(repo_path: &Path, remote: &str, force: bool, env: &CommandEnv) -> GtcResult<()>;

    /// Fast-forward pull with recurse-submodules.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the pull fails or is not a fast-forward.
    fn pull(
        repo_path: &Path,
        remote: &str,
        branch: Option<&str>,
        env: &CommandEnv,
    ) -> GtcResult<()>;

    /// Push a refspec to a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected or the remote is missing.
    fn push(repo_path: &Path, remote: &str, refspec: &str, env: &CommandEnv) -> GtcResult<()>;

    /// Checkout a branch, tag, or commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if the checkout fails.
    fn checkout(repo_path: &Path, what: &str, force: bool) -> GtcResult<()>;

    /// Create a branch at `HEAD` and switch to it.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if the branch exists or checkout fails.
    fn checkout_new_branch(repo_path: &Path, name: &str, force: bool) -> GtcResult<()>;

    /// Point `name` at `HEAD` (creating or replacing it) and switch to it.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if the checkout fails.
    fn reset_branch(repo_path: &Path, name: &str) -> GtcResult<()>;

    /// Stage a path.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the path does not match anything.
    fn add(repo_path: &Path, pathspec: &str) -> GtcResult<()>;

    /// Stage all changes, including deletions and untracked files.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    fn add_all(repo_path: &Path) -> GtcResult<()>;

    /// Commit the index. Empty commits and empty messages are allowed.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails (e.g. no author identity).
    fn commit(repo_path: &Path, message: &str, env: &CommandEnv) -> GtcResult<()>;

    /// Create a lightweight tag at `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the tag exists or cannot be created.
    fn tag(repo_path: &Path, name: &str) -> GtcResult<()>;

    /// Add a submodule tracking `branch`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the submodule cannot be added.
    fn add_submodule(
        repo_path: &Path,
        url: &str,
        submodule_path: &str,
        branch: Option<&str>,
        env: &CommandEnv,
    ) -> GtcResult<()>;

    /// Rewrite a submodule URL in `.gitmodules` and the repo config.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the submodule is unknown.
    fn set_submodule_url(repo_path: &Path, submodule_path: &str, url: &str) -> GtcResult<()>;

    /// Check out the recorded commit of one submodule.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the update fails.
    fn update_submodule(
        repo_path: &Path,
        submodule_path: &str,
        init: bool,
        env: &CommandEnv,
    ) -> GtcResult<()>;

    /// Set git config value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    fn set_config(repo_path: &Path, key: &str, value: &str) -> GtcResult<()>;
}

// --- Command environment ---

/// Extra state attached to a single git invocation.
///
/// `config` entries become `-c key=value` arguments placed before the
/// subcommand; `vars` are exported to the child process.
#[derive(Clone, Default)]
pub struct CommandEnv {
    config: Vec<(String, String)>,
    vars: Vec<(String, String)>,
}

impl CommandEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn config(&self) -> &[(String, String)] {
        &self.config
    }

    #[must_use]
    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    fn config_args(&self) -> Vec<String> {
        self.config
            .iter()
            .flat_map(|(key, value)| ["-c".to_string(), format!("{key}={value}")])
            .collect()
    }
}

// Config keys and values may embed credentials; only names are printed.
impl fmt::Debug for CommandEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEnv")
            .field("config", &self.config.len())
            .field(
                "vars",
                &self.vars.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// True for a 40-character hex SHA-1 object id.
pub(crate) fn is_full_hex_id(value: &str) -> bool {
    value.len() == 40 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only; never spawns a subprocess.
pub struct GixBackend;

impl GixBackend {
    fn open(path: &Path) -> GtcResult<gix::Repository> {
        gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))).into())
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(path: &Path) -> GtcResult<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn head_commit(path: &Path) -> GtcResult<String> {
        let repo = Self::open(path)?;
        let id = repo
            .head_id()
            .map_err(|e| GitError::Gix(GixError::query("head_id", e)))?;
        Ok(id.detach().to_string())
    }

    fn resolve_revision(path: &Path, spec: &str) -> GtcResult<String> {
        let repo = Self::open(path)?;
        let peeled = format!("{spec}^{{commit}}");
        let id = repo
            .rev_parse_single(peeled.as_str())
            .map_err(|_| GitError::RevisionNotFound {
                revision: spec.to_string(),
            })?;
        Ok(id.detach().to_string())
    }

    fn commit_exists(path: &Path, hash: &str) -> GtcResult<bool> {
        let repo = Self::open(path)?;
        if !is_full_hex_id(hash) {
            return Ok(false);
        }
        let Ok(oid) = gix::ObjectId::from_hex(hash.as_bytes()) else {
            return Ok(false);
        };
        Ok(repo.find_commit(oid).is_ok())
    }

    fn local_branches(path: &Path) -> GtcResult<BTreeMap<String, String>> {
        let repo = Self::open(path)?;
        let platform = repo
            .references()
            .map_err(|e| GitError::Gix(GixError::query("references", e)))?;
        let iter = platform
            .local_branches()
            .map_err(|e| GitError::Gix(GixError::query("local_branches", e)))?;

        let mut branches = BTreeMap::new();
        for reference in iter {
            let reference =
                reference.map_err(|e| GitError::Gix(GixError::query("local_branches", e)))?;
            if let Some(id) = reference.try_id() {
                branches.insert(
                    reference.name().shorten().to_string(),
                    id.detach().to_string(),
                );
            }
        }
        Ok(branches)
    }

    fn tags(path: &Path) -> GtcResult<Vec<TagEntry>> {
        let repo = Self::open(path)?;
        let platform = repo
            .references()
            .map_err(|e| GitError::Gix(GixError::query("references", e)))?;
        let iter = platform
            .tags()
            .map_err(|e| GitError::Gix(GixError::query("tags", e)))?;

        let mut tags = Vec::new();
        for reference in iter {
            let reference = reference.map_err(|e| GitError::Gix(GixError::query("tags", e)))?;
            let name = reference.name().shorten().to_string();
            let spec = format!("{}^{{commit}}", reference.name().as_bstr());
            let commit_id = repo
                .rev_parse_single(spec.as_str())
                .map_err(|e| GitError::Gix(GixError::query("peel tag", e)))?
                .detach();
            let commit = repo
                .find_commit(commit_id)
                .map_err(|e| GitError::Gix(GixError::query("find_commit", e)))?;
            let time = commit
                .author()
                .map_err(|e| GitError::Gix(GixError::query("commit author", e)))?
                .time()
                .map_err(|e| GitError::Gix(GixError::query("author time", e)))?;
            tags.push(TagEntry {
                name,
                commit: commit_id.to_string(),
                time: time.seconds,
            });
        }
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn submodules(path: &Path) -> GtcResult<Vec<SubmoduleEntry>> {
        let repo = Self::open(path)?;
        let Some(submodules) = repo
            .submodules()
            .map_err(|e| GitError::Gix(GixError::query("submodules", e)))?
        else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for submodule in submodules {
            let sub_path = submodule
                .path()
                .map_err(|e| GitError::Gix(GixError::query("submodule path", e)))?
                .to_string();
            let url = submodule
                .url()
                .map_err(|e| GitError::Gix(GixError::query("submodule url", e)))?
                .to_bstring()
                .to_string();
            let initialized = submodule
                .open()
                .map_err(|e| GitError::Gix(GixError::query("open submodule", e)))?
                .is_some();
            entries.push(SubmoduleEntry {
                name: submodule.name().to_string(),
                path: sub_path,
                url,
                initialized,
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for:
/// - every write (commit, push, pull, checkout)
/// - submodule add/update/set-url
/// - per-invocation credentials (`-c url.<auth>.insteadOf`, `GIT_SSH_COMMAND`)
pub struct ShellBackend;

static GIT_EXECUTABLE: OnceLock<Option<PathBuf>> = OnceLock::new();

fn git_executable() -> GtcResult<&'static Path> {
    GIT_EXECUTABLE
        .get_or_init(|| which::which("git").ok())
        .as_deref()
        .ok_or_else(|| {
            ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            }
            .into()
        })
}

impl ShellBackend {
    /// Execute a git command and return its trimmed stdout.
    /// Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` with stderr on a non-zero exit, or a
    /// `ProcessError` if git cannot be found or spawned.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> GtcResult<String> {
        Self::git_command_with(args, cwd, &CommandEnv::default())
    }

    /// [`Self::git_command`] with per-invocation config and environment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::git_command`].
    pub(crate) fn git_command_with(
        args: &[&str],
        cwd: &Path,
        env: &CommandEnv,
    ) -> GtcResult<String> {
        Self::run(args, cwd, env).map(|out| out.trim().to_string())
    }

    /// Run git and return stdout untouched (porcelain output is column-sensitive).
    fn run(args: &[&str], cwd: &Path, env: &CommandEnv) -> GtcResult<String> {
        use std::process::Command;

        let git = git_executable()?;
        let command_line = format!(
            "git {}",
            args.iter()
                .map(|a| redact_url(a))
                .collect::<Vec<_>>()
                .join(" ")
        );
        debug!(command = %command_line, cwd = %cwd.display(), "executing");

        let output = Command::new(git)
            .args(env.config_args())
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .envs(env.vars().iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            trace!(command = %command_line, %message, "git failed");
            return Err(GitError::CommandFailed {
                command: command_line,
                message,
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Porcelain v1 status lines (`XY path`), including submodule pointer changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git status` fails.
    pub(crate) fn status_lines(path: &Path) -> GtcResult<Vec<String>> {
        let output = Self::run(&["status", "--porcelain"], path, &CommandEnv::default())?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// URL configured for `remote`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RemoteNotFound` if the remote does not exist.
    pub(crate) fn remote_url(path: &Path, remote: &str) -> GtcResult<String> {
        Self::git_command(&["remote", "get-url", remote], path).map_err(|_| {
            GitError::RemoteNotFound {
                remote: remote.to_string(),
            }
            .into()
        })
    }

    fn checkout_failed(what: &str, err: crate::error::GtcError) -> crate::error::GtcError {
        match err.as_git() {
            Some(GitError::CommandFailed { message, .. }) => GitError::CheckoutFailed {
                what: what.to_string(),
                message: message.clone(),
            }
            .into(),
            _ => err,
        }
    }
}

impl GitMutation for ShellBackend {
    fn clone(url: &str, dest: &Path, branch: Option<&str>, env: &CommandEnv) -> GtcResult<()> {
        let mut args = vec!["clone", "--recurse-submodules", "--quiet"];
        args.extend(&["-c", "advice.detachedHead=false"]);
        if let Some(b) = branch.filter(|b| !b.is_empty()) {
            args.extend(&["--branch", b]);
        }
        args.push(url);
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: redact_url(url).into_owned(),
            message: "invalid destination path".to_string(),
        })?;
        args.push(dest_str);

        let parent = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;

        Self::git_command_with(&args, parent, env).map_err(|err| match err.as_git() {
            Some(GitError::CommandFailed { message, .. }) => GitError::CloneFailed {
                url: redact_url(url).into_owned(),
                message: message.clone(),
            }
            .into(),
            _ => err,
        })?;
        Ok(())
    }

    fn init_repo(path: &Path, initial_branch: &str) -> GtcResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::io(path, e))?;
        let branch_arg = format!("--initial-branch={initial_branch}");
        Self::git_command(&["init", "--quiet", &branch_arg], path)?;
        Ok(())
    }

    fn fetch(repo_path: &Path, remote: &str, force: bool, env: &CommandEnv) -> GtcResult<()> {
        let mut args = vec!["fetch", "--quiet"];
        if force {
            args.push("--force");
        }
        args.push(remote);
        Self::git_command_with(&args, repo_path, env)?;
        Ok(())
    }

    fn pull(
        repo_path: &Path,
        remote: &str,
        branch: Option<&str>,
        env: &CommandEnv,
    ) -> GtcResult<()> {
        let mut args = vec![
            "pull",
            "--ff-only",
            "--recurse-submodules",
            "--quiet",
            remote,
        ];
        if let Some(b) = branch {
            args.push(b);
        }
        Self::git_command_with(&args, repo_path, env)?;
        Ok(())
    }

    fn push(repo_path: &Path, remote: &str, refspec: &str, env: &CommandEnv) -> GtcResult<()> {
        Self::git_command_with(&["push", "--quiet", remote, refspec], repo_path, env)?;
        Ok(())
    }

    fn checkout(repo_path: &Path, what: &str, force: bool) -> GtcResult<()> {
        let mut args = vec![
            "-c",
            "advice.detachedHead=false",
            "checkout",
            "-q",
            "--no-guess",
        ];
        if force {
            args.push("-f");
        }
        args.push(what);
        Self::git_command(&args, repo_path).map_err(|e| Self::checkout_failed(what, e))?;
        Ok(())
    }

    fn checkout_new_branch(repo_path: &Path, name: &str, force: bool) -> GtcResult<()> {
        let mut args = vec!["checkout", "-q"];
        if force {
            args.push("-f");
        }
        args.extend(&["-b", name]);
        Self::git_command(&args, repo_path).map_err(|e| Self::checkout_failed(name, e))?;
        Ok(())
    }

    fn reset_branch(repo_path: &Path, name: &str) -> GtcResult<()> {
        Self::git_command(&["checkout", "-q", "-f", "-B", name], repo_path)
            .map_err(|e| Self::checkout_failed(name, e))?;
        Ok(())
    }

    fn add(repo_path: &Path, pathspec: &str) -> GtcResult<()> {
        Self::git_command(&["add", "--", pathspec], repo_path)?;
        Ok(())
    }

    fn add_all(repo_path: &Path) -> GtcResult<()> {
        Self::git_command(&["add", "-A"], repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str, env: &CommandEnv) -> GtcResult<()> {
        Self::git_command_with(
            &[
                "commit",
                "--quiet",
                "--allow-empty",
                "--allow-empty-message",
                "-m",
                message,
            ],
            repo_path,
            env,
        )?;
        Ok(())
    }

    fn tag(repo_path: &Path, name: &str) -> GtcResult<()> {
        Self::git_command(&["tag", name], repo_path)?;
        Ok(())
    }

    fn add_submodule(
        repo_path: &Path,
        url: &str,
        submodule_path: &str,
        branch: Option<&str>,
        env: &CommandEnv,
    ) -> GtcResult<()> {
        let mut args = vec!["submodule", "add", "--quiet"];
        if let Some(b) = branch.filter(|b| !b.is_empty()) {
            args.extend(&["-b", b]);
        }
        args.extend(&["--", url, submodule_path]);
        Self::git_command_with(&args, repo_path, env)?;
        Ok(())
    }

    fn set_submodule_url(repo_path: &Path, submodule_path: &str, url: &str) -> GtcResult<()> {
        Self::git_command(
            &["submodule", "set-url", "--", submodule_path, url],
            repo_path,
        )?;
        Ok(())
    }

    fn update_submodule(
        repo_path: &Path,
        submodule_path: &str,
        init: bool,
        env: &CommandEnv,
    ) -> GtcResult<()> {
        let mut args = vec!["submodule", "update", "--quiet"];
        if init {
            args.push("--init");
        }
        args.extend(&["--", submodule_path]);
        Self::git_command_with(&args, repo_path, env)?;
        Ok(())
    }

    fn set_config(repo_path: &Path, key: &str, value: &str) -> GtcResult<()> {
        Self::git_command(&["config", key, value], repo_path)?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        path.join(".git").exists()
            && Self::git_command(&["rev-parse", "--is-inside-work-tree"], path)
                .is_ok_and(|out| out == "true")
    }

    fn current_branch(path: &Path) -> GtcResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "-q", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn head_commit(path: &Path) -> GtcResult<String> {
        Self::git_command(&["rev-parse", "--verify", "HEAD"], path)
    }

    fn resolve_revision(path: &Path, spec: &str) -> GtcResult<String> {
        let peeled = format!("{spec}^{{commit}}");
        Self::git_command(&["rev-parse", "--verify", "--quiet", &peeled], path).map_err(|_| {
            GitError::RevisionNotFound {
                revision: spec.to_string(),
            }
            .into()
        })
    }

    fn commit_exists(path: &Path, hash: &str) -> GtcResult<bool> {
        if !is_full_hex_id(hash) {
            return Ok(false);
        }
        let object = format!("{hash}^{{commit}}");
        Ok(Self::git_command(&["cat-file", "-e", &object], path).is_ok())
    }

    fn local_branches(path: &Path) -> GtcResult<BTreeMap<String, String>> {
        let output = Self::git_command(
            &[
                "for-each-ref",
                "--format=%(refname:short) %(objectname)",
                "refs/heads",
            ],
            path,
        )?;
        Ok(output
            .lines()
            .filter_map(|line| line.split_once(' '))
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect())
    }

    fn tags(path: &Path) -> GtcResult<Vec<TagEntry>> {
        let names = Self::git_command(
            &["for-each-ref", "--format=%(refname:short)", "refs/tags"],
            path,
        )?;
        let mut tags = Vec::new();
        for name in names.lines().filter(|l| !l.is_empty()) {
            let peeled = format!("refs/tags/{name}^{{commit}}");
            let line = Self::git_command(&["log", "-1", "--format=%H %at", &peeled], path)?;
            let (commit, time) = line.split_once(' ').ok_or_else(|| GitError::CommandFailed {
                command: "git log".to_string(),
                message: format!("unexpected output '{line}'"),
            })?;
            tags.push(TagEntry {
                name: name.to_string(),
                commit: commit.to_string(),
                time: time.parse().unwrap_or_default(),
            });
        }
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn submodules(path: &Path) -> GtcResult<Vec<SubmoduleEntry>> {
        if !path.join(".gitmodules").is_file() {
            return Ok(Vec::new());
        }
        // No match makes `git config --get-regexp` exit 1
        let paths = Self::git_command(
            &[
                "config",
                "--file",
                ".gitmodules",
                "--get-regexp",
                r"^submodule\..*\.path$",
            ],
            path,
        )
        .unwrap_or_default();

        let mut entries = Vec::new();
        for line in paths.lines() {
            let Some((key, sub_path)) = line.split_once(' ') else {
                continue;
            };
            let Some(name) = key
                .strip_prefix("submodule.")
                .and_then(|k| k.strip_suffix(".path"))
            else {
                continue;
            };
            let url_key = format!("submodule.{name}.url");
            let url = Self::git_command(&["config", "--file", ".gitmodules", &url_key], path)
                .unwrap_or_default();
            entries.push(SubmoduleEntry {
                name: name.to_string(),
                path: sub_path.to_string(),
                url,
                initialized: path.join(sub_path).join(".git").exists(),
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests;
