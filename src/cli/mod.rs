// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gtc using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gtc [global options] <command>
//! version | options | inis
//! clone | fetch | push
//! pull [--branch B]
//! checkout NAME [--force]
//! commit -m MSG [--all]
//! submodule {add NAME URL [-r REV] | update [--remote] | sync -m MSG}
//! info [--compact]
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};

/// Git repository client for GitOps automation.
#[derive(Debug, Parser)]
#[command(
    name = "gtc",
    author,
    version,
    about = "Git repository client for GitOps automation",
    long_about = "gtc Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Drives one working repository: clone, commit, push, and keep\n\
                  its submodules on their remote revision. See\n\
                  `gtc <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  gtc reads `gtc.toml` from the current directory when present.\n\
                  Additional files can be given with --ini and are loaded after it.\n\
                  GTC_<SECTION>__<KEY> environment variables and --set override\n\
                  both, e.g. GTC_CLIENT__REVISION=main or --set client/revision=main."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by gtc.
    Inis,

    /// Clones `client.origin_url` into `client.dir_path`.
    Clone,

    /// Fetches `origin`.
    Fetch,

    /// Fast-forwards the current branch from `origin`.
    Pull(PullArgs),

    /// Pushes `HEAD` to `origin`.
    Push,

    /// Switches branch.
    Checkout(CheckoutArgs),

    /// Commits staged changes as the configured author.
    Commit(CommitArgs),

    /// Manages submodules.
    Submodule(SubmoduleArgs),

    /// Prints the repository state as JSON.
    Info(InfoArgs),
}

/// Arguments for the `pull` command.
#[derive(Debug, Clone, Args)]
pub struct PullArgs {
    /// Branch on `origin` to pull; the tracked upstream when omitted.
    #[arg(short = 'b', long)]
    pub branch: Option<String>,
}

/// Arguments for the `checkout` command.
#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Branch to switch to.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Discards local changes and creates the branch when missing.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long, default_value = "")]
    pub message: String,

    /// Stages every change before committing.
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Arguments for the `submodule` command.
#[derive(Debug, Clone, Args)]
pub struct SubmoduleArgs {
    #[command(subcommand)]
    pub subcommand: SubmoduleSubcommand,
}

/// Submodule subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SubmoduleSubcommand {
    /// Adds a submodule with the configured credentials.
    Add {
        /// Submodule name and path.
        #[arg(value_name = "NAME")]
        name: String,

        /// Repository URL.
        #[arg(value_name = "URL")]
        url: String,

        /// Branch to track; `client.revision` when omitted.
        #[arg(short = 'r', long)]
        revision: Option<String>,
    },

    /// Updates every submodule.
    Update {
        /// Moves submodules to `origin/<client.revision>` instead of the
        /// recorded commit.
        #[arg(long)]
        remote: bool,
    },

    /// Updates submodules from their remote, then commits and pushes the new
    /// pointers.
    Sync {
        /// Commit message.
        #[arg(short = 'm', long, default_value = "Update submodules")]
        message: String,
    },
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Args)]
pub struct InfoArgs {
    /// Prints single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
