// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> git::Client
//!   config (options, inis), repo, submodule
//! ```

pub mod config;
pub mod repo;
pub mod submodule;

#[cfg(test)]
mod tests;

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::git::{Client, ClientOptions};

/// Open the work tree configured in `[client]`.
///
/// # Errors
///
/// Returns an error if the credentials are incomplete or `client.dir_path`
/// is not a git work tree.
pub fn open_client(config: &Config) -> Result<Client> {
    let opts = ClientOptions::from_config(config).context("invalid client configuration")?;
    let dir = opts.dir_path().display().to_string();
    Client::open(opts).with_context(|| format!("failed to open repository at {dir}"))
}
