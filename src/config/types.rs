// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gtc.
//!
//! ```text
//! Config: GlobalConfig, ClientConfig, AuthConfig, SubmoduleConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: Option<PathBuf>,
    /// Emit console logs as JSON lines.
    pub json_logs: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_logs: false,
        }
    }
}

/// Working repository settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Local working directory of the repository.
    pub dir_path: PathBuf,
    /// URL of the `origin` remote.
    pub origin_url: String,
    /// Branch the client works on.
    pub revision: String,
    /// Create `revision` locally when the remote does not have it.
    pub create_branch: bool,
    /// Author name for commits.
    pub author_name: String,
    /// Author email for commits.
    pub author_email: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dir_path: PathBuf::from("."),
            origin_url: String::new(),
            revision: "master".to_string(),
            create_branch: false,
            author_name: String::new(),
            author_email: String::new(),
        }
    }
}

/// Credentials for remote operations.
///
/// Username + password selects HTTP basic auth; username + key path selects SSH.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_path: Option<PathBuf>,
}

impl AuthConfig {
    /// True when no credential field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty() && self.ssh_key_path.is_none()
    }
}

/// Submodule handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmoduleConfig {
    /// Pass `protocol.file.allow=always` so local-path submodules work.
    /// Intended for CI and fixtures.
    pub allow_file_protocol: bool,
    /// How many times an update pass restarts after a ref lock conflict.
    pub retry_limit: u32,
}

impl Default for SubmoduleConfig {
    fn default() -> Self {
        Self {
            allow_file_protocol: false,
            retry_limit: 3,
        }
    }
}
