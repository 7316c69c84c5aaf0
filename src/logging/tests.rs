// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    let err = LogLevel::new(7).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'output_log_level' in section '[global]': log level must be 0-6, got 7"
    );
}

#[test]
fn test_log_level_filters_scope_dependencies() {
    assert_eq!(LogLevel::SILENT.to_filter_string(), "off");
    assert_eq!(LogLevel::INFO.to_filter_string(), "warn,gtc=info");
    assert_eq!(LogLevel::DEBUG.to_filter_string(), "warn,gtc=debug");
    assert_eq!(LogLevel::DUMP.to_filter_string(), "trace");
}

#[test]
fn test_log_level_to_tracing_level() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::WARN.to_tracing_level(), Some(Level::WARN));
    assert_eq!(LogLevel::DUMP.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_level_serde_roundtrip_rejects_out_of_range() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_console());
    assert!(!config.show_target());
}
