// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `inis`.

use crate::config::Config;

/// Print every option as `section.key = value`, secrets hidden.
pub fn run_options_command(config: &Config) {
    print_lines(&config.format_options());
}

/// Print the config files that were loaded, in load order.
pub fn run_inis_command(config_files: &[String]) {
    print_lines(&inis_lines(config_files));
}

pub(crate) fn inis_lines(config_files: &[String]) -> Vec<String> {
    if config_files.is_empty() {
        vec!["No configuration files loaded".to_string()]
    } else {
        config_files.to_vec()
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
