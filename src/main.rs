// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Clone | Fetch | Pull | Push | Checkout | Commit | Submodule | Info
//! ```

use std::process::ExitCode;

use gtc::cli::global::GlobalOptions;
use gtc::cli::{self, Command};
use gtc::cmd::config::{run_inis_command, run_options_command};
use gtc::cmd::repo::{
    run_checkout_command, run_clone_command, run_commit_command, run_fetch_command,
    run_info_command, run_pull_command, run_push_command,
};
use gtc::cmd::submodule::run_submodule_command;
use gtc::config::Config;
use gtc::config::loader::ConfigLoader;
use gtc::config::types::GlobalConfig;
use gtc::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Invalid option: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &loaded_files)
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_json_console(global.json_logs)
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: &Config, loaded_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(loaded_files);
            Ok(())
        }
        Some(Command::Clone) => run_clone_command(config),
        Some(Command::Fetch) => run_fetch_command(config),
        Some(Command::Pull(args)) => run_pull_command(args, config),
        Some(Command::Push) => run_push_command(config),
        Some(Command::Checkout(args)) => run_checkout_command(args, config),
        Some(Command::Commit(args)) => run_commit_command(args, config),
        Some(Command::Submodule(args)) => run_submodule_command(args, config),
        Some(Command::Info(args)) => run_info_command(args, config),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> gtc::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional("gtc.toml");
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix("GTC");
    for assignment in global.to_config_overrides() {
        loader = loader.set_from_str(&assignment)?;
    }
    Ok(loader)
}
