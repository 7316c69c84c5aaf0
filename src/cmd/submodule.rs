// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule command implementation for gtc.

use anyhow::Context;

use super::open_client;
use crate::cli::{SubmoduleArgs, SubmoduleSubcommand};
use crate::config::Config;
use crate::error::Result;

/// Main handler for the submodule command.
///
/// # Errors
///
/// Returns an error if any submodule operation fails.
pub fn run_submodule_command(args: &SubmoduleArgs, config: &Config) -> Result<()> {
    let client = open_client(config)?;
    match &args.subcommand {
        SubmoduleSubcommand::Add {
            name,
            url,
            revision,
        } => {
            let revision = revision.as_deref().unwrap_or(&config.client.revision);
            client
                .submodule_add(name, url, revision, client.options().auth())
                .with_context(|| format!("failed to add submodule {name}"))
        }
        SubmoduleSubcommand::Update { remote } => client
            .submodule_update(*remote)
            .context("submodule update failed"),
        SubmoduleSubcommand::Sync { message } => client
            .sync_up_to_date(message)
            .context("submodule sync failed"),
    }
}
