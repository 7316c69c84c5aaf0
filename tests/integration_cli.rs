// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns and the
//! config overrides they produce.

use clap::Parser;
use gtc::cli::global::GlobalOptions;
use gtc::cli::{Cli, Command, SubmoduleSubcommand};
use gtc::config::loader::ConfigLoader;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["gtc", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_unknown_command_fails() {
    assert!(Cli::try_parse_from(["gtc", "build"]).is_err());
}

// =============================================================================
// Global options into config
// =============================================================================

#[test]
fn cli_overrides_reach_config() {
    let cli = Cli::try_parse_from([
        "gtc",
        "--dir",
        "/srv/deploy",
        "-s",
        "client.revision=env/prod",
        "-l",
        "1",
        "info",
    ])
    .unwrap();

    let mut loader = ConfigLoader::new().add_toml_str("[client]\nrevision = \"main\"\n");
    for assignment in cli.global.to_config_overrides() {
        loader = loader.set_from_str(&assignment).unwrap();
    }
    let config = loader.build().unwrap();

    assert_eq!(config.client.dir_path.display().to_string(), "/srv/deploy");
    assert_eq!(config.client.revision, "env/prod");
    assert_eq!(config.global.output_log_level.as_u8(), 1);
    assert_eq!(config.global.file_log_level.as_u8(), 1);
}

#[test]
fn cli_default_global_options_produce_no_overrides() {
    assert!(GlobalOptions::default().to_config_overrides().is_empty());
}

// =============================================================================
// Submodule Command
// =============================================================================

#[test]
fn cli_submodule_update_defaults_to_recorded() {
    let cli = Cli::try_parse_from(["gtc", "submodule", "update"]).unwrap();
    let Some(Command::Submodule(args)) = cli.command else {
        panic!("expected submodule command");
    };
    assert!(matches!(
        args.subcommand,
        SubmoduleSubcommand::Update { remote: false }
    ));
}

#[test]
fn cli_submodule_sync_message() {
    let cli = Cli::try_parse_from(["gtc", "submodule", "sync", "-m", "Bump charts"]).unwrap();
    let Some(Command::Submodule(args)) = cli.command else {
        panic!("expected submodule command");
    };
    let SubmoduleSubcommand::Sync { message } = args.subcommand else {
        panic!("expected sync");
    };
    assert_eq!(message, "Bump charts");
}

#[test]
fn cli_submodule_add_requires_url() {
    assert!(Cli::try_parse_from(["gtc", "submodule", "add", "charts"]).is_err());
}
