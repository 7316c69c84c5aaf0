// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Work tree commands: clone, fetch, pull, push, checkout, commit, info.

use anyhow::Context;
use tracing::info;

use super::open_client;
use crate::cli::{CheckoutArgs, CommitArgs, InfoArgs, PullArgs};
use crate::config::Config;
use crate::error::Result;
use crate::git::{Client, ClientOptions, Info};

/// Clone `client.origin_url` into `client.dir_path`.
///
/// # Errors
///
/// Returns an error if the credentials are incomplete or the clone fails.
pub fn run_clone_command(config: &Config) -> Result<()> {
    let opts = ClientOptions::from_config(config).context("invalid client configuration")?;
    let client = Client::clone(opts)
        .with_context(|| format!("failed to clone into {}", config.client.dir_path.display()))?;
    info!(path = %client.dir_path().display(), "Clone complete");
    Ok(())
}

/// Fetch `origin`.
///
/// # Errors
///
/// Returns an error if the repository cannot be opened or fetched.
pub fn run_fetch_command(config: &Config) -> Result<()> {
    open_client(config)?.fetch().context("fetch failed")
}

/// Pull `--branch`, or the tracked upstream.
///
/// # Errors
///
/// Returns an error if the pull is not a fast-forward or the branch is missing.
pub fn run_pull_command(args: &PullArgs, config: &Config) -> Result<()> {
    let client = open_client(config)?;
    match &args.branch {
        Some(branch) => client
            .pull(branch)
            .with_context(|| format!("failed to pull {branch}")),
        None => client.pull_all().context("pull failed"),
    }
}

/// Push `HEAD` to `origin`.
///
/// # Errors
///
/// Returns an error if the push is rejected.
pub fn run_push_command(config: &Config) -> Result<()> {
    open_client(config)?.push().context("push failed")
}

/// Switch branch.
///
/// # Errors
///
/// Returns an error if the checkout fails.
pub fn run_checkout_command(args: &CheckoutArgs, config: &Config) -> Result<()> {
    open_client(config)?
        .checkout(&args.name, args.force)
        .with_context(|| format!("failed to checkout {}", args.name))
}

/// Commit, staging everything first with `--all`.
///
/// # Errors
///
/// Returns an error if staging or committing fails.
pub fn run_commit_command(args: &CommitArgs, config: &Config) -> Result<()> {
    let client = open_client(config)?;
    if args.all {
        client.add_all().context("failed to stage changes")?;
    }
    client.commit(&args.message).context("commit failed")
}

/// Print [`Info`] as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the repository state cannot be read.
pub fn run_info_command(args: &InfoArgs, config: &Config) -> Result<()> {
    let info = open_client(config)?
        .info()
        .context("failed to collect repository info")?;
    println!("{}", render_info(&info, args.compact)?);
    Ok(())
}

pub(crate) fn render_info(info: &Info, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(info)?
    } else {
        serde_json::to_string_pretty(info)?
    };
    Ok(json)
}
