// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Throwaway repositories with prescribed state, for tests.
//!
//! ```text
//! MockOptions { remote: Some(..) }
//!        |
//!        v
//!  Mock::new(remote) --> remote work tree (receive.denyCurrentBranch=updateInstead)
//!        |
//!        v
//!  clone remote (or init) into /tmp/gtc-XXXX
//!        |
//!        v
//!  pull --> commits --> branches --> staged files --> unstaged files
//! ```
//!
//! Every temp directory lives exactly as long as its [`Mock`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use bon::Builder;
use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;
use crate::git::cmd;
use crate::git::{Client, ClientOptions};

pub const MOCK_AUTHOR_NAME: &str = "bob";
pub const MOCK_AUTHOR_EMAIL: &str = "bob@mail.com";

/// One commit to replay: files to write, then the message.
#[derive(Debug, Clone, Default)]
pub struct MockCommit {
    pub message: String,
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MockCommit {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            files: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

/// Shape of a mock repository.
#[derive(Debug, Clone, Builder)]
pub struct MockOptions {
    #[builder(setters(name = with_current_branch), into, default = "master".to_string())]
    current_branch: String,
    /// Branches created from the final commit.
    #[builder(setters(name = with_branches), default)]
    branches: Vec<String>,
    #[builder(setters(name = with_commits), default)]
    commits: Vec<MockCommit>,
    /// Written and staged after the commits.
    #[builder(setters(name = with_staged_files), default)]
    staged_files: BTreeMap<String, Vec<u8>>,
    /// Written but not staged.
    #[builder(setters(name = with_unstaged_files), default)]
    unstaged_files: BTreeMap<String, Vec<u8>>,
    /// Build a nested mock to act as `origin`.
    #[builder(setters(name = with_remote), into)]
    remote: Option<Box<Self>>,
    /// Use an existing repository as `origin`. Wins over `remote`.
    #[builder(setters(name = with_remote_client))]
    remote_client: Option<Client>,
}

/// A mock work tree, its optional remote, and the temp directory backing it.
#[derive(Debug)]
pub struct Mock {
    client: Client,
    remote: Option<Box<Self>>,
    remote_client: Option<Client>,
    _dir: TempDir,
}

impl Mock {
    /// Build the repository described by `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if a temp directory cannot be created or any git step
    /// fails.
    pub fn new(options: MockOptions) -> Result<Self> {
        let remote = options
            .remote
            .clone()
            .map(|remote_options| Self::new(*remote_options).map(Box::new))
            .transpose()
            .context("failed to build remote mock")?;

        let remote_client = options
            .remote_client
            .clone()
            .or_else(|| remote.as_ref().map(|m| m.client.clone()));

        if let Some(rc) = &remote_client {
            cmd::set_config(rc.dir_path(), "receive.denyCurrentBranch", "updateInstead")
                .context("failed to make remote accept pushes")?;
        }

        let dir = tempfile::Builder::new()
            .prefix("gtc-")
            .tempdir()
            .context("failed to create mock directory")?;

        let opts = Self::fixture_options(
            dir.path(),
            remote_client
                .as_ref()
                .map(|rc| rc.dir_path().display().to_string())
                .unwrap_or_default(),
            &options.current_branch,
        );

        let client = if remote_client.is_some() {
            Client::clone(opts).context("failed to clone mock remote")?
        } else {
            Client::init(opts).context("failed to init mock repository")?
        };
        debug!(path = %dir.path().display(), "Created mock repository");

        let mock = Self {
            client,
            remote,
            remote_client,
            _dir: dir,
        };
        mock.compose(&options)?;
        Ok(mock)
    }

    fn fixture_options(dir: &Path, origin_url: String, revision: &str) -> ClientOptions {
        ClientOptions::builder()
            .with_dir_path(dir)
            .with_origin_url(origin_url)
            .with_revision(revision)
            .with_author_name(MOCK_AUTHOR_NAME)
            .with_author_email(MOCK_AUTHOR_EMAIL)
            .with_allow_file_protocol(true)
            .build()
    }

    fn compose(&self, options: &MockOptions) -> Result<()> {
        let c = &self.client;
        if self.remote_client.is_some() {
            c.pull(&options.current_branch)
                .context("failed to pull mock remote")?;
        }

        for commit in &options.commits {
            for (name, content) in &commit.files {
                c.write_file(name, content)?;
                c.add(name)?;
            }
            c.commit(&commit.message)
                .with_context(|| format!("failed to commit '{}'", commit.message))?;
        }

        for branch in &options.branches {
            c.create_branch(branch, false)
                .with_context(|| format!("failed to create branch '{branch}'"))?;
            c.checkout(&options.current_branch, false)?;
        }

        for (name, content) in &options.staged_files {
            c.write_file(name, content)?;
            c.add(name)?;
        }

        for (name, content) in &options.unstaged_files {
            c.write_file(name, content)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn dir_path(&self) -> &Path {
        self.client.dir_path()
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub const fn client_options(&self) -> &ClientOptions {
        self.client.options()
    }

    /// The nested mock built from `MockOptions::remote`.
    #[must_use]
    pub fn remote(&self) -> Option<&Self> {
        self.remote.as_deref()
    }

    #[must_use]
    pub const fn remote_client(&self) -> Option<&Client> {
        self.remote_client.as_ref()
    }

    #[must_use]
    pub fn remote_client_options(&self) -> Option<&ClientOptions> {
        self.remote_client.as_ref().map(Client::options)
    }

    /// Commit a uniquely named file on `branch` (created when missing),
    /// pushing when `push` is set. Returns the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout, commit, or push fails.
    pub fn random_commit_local(&self, branch: &str, push: bool) -> Result<String> {
        let name = random_commit(&self.client, branch)?;
        if push {
            self.client.push().context("failed to push random commit")?;
        }
        Ok(name)
    }

    /// Commit a uniquely named file on `branch` of the remote repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the mock has no remote or the commit fails.
    pub fn random_commit_remote(&self, branch: &str) -> Result<String> {
        let remote = self
            .remote_client
            .as_ref()
            .context("mock has no remote repository")?;
        random_commit(remote, branch)
    }
}

fn random_commit(client: &Client, branch: &str) -> Result<String> {
    client
        .checkout(branch, true)
        .with_context(|| format!("failed to checkout '{branch}'"))?;
    let name = random_test_name();
    let files = BTreeMap::from([(name.clone(), name.clone().into_bytes())]);
    client.commit_files(&files, &name)?;
    Ok(name)
}

/// `unittest-` followed by ten random lowercase hex characters.
#[must_use]
pub fn random_test_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("unittest-{}", &id[..10])
}
