// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gtc.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local gtc.toml (cwd)
//! 3. --ini FILE (repeatable)
//! 4. GTC_* env vars
//! 5. --set / CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GTC_CLIENT__REVISION=main            → client.revision = "main"
//! GTC_AUTH__USERNAME=bot               → auth.username = "bot"
//! GTC_SUBMODULE__ALLOW_FILE_PROTOCOL=1 → submodule.allow_file_protocol = true
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{AuthConfig, ClientConfig, GlobalConfig, SubmoduleConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Working repository settings.
    pub client: ClientConfig,
    /// Credentials.
    pub auth: AuthConfig,
    /// Submodule handling.
    pub submodule: SubmoduleConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gtc::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gtc.toml")
    ///     .with_env_prefix("GTC")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` when a password or SSH key is set
    /// without a username, or when `client.revision` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.auth.username.is_empty()
            && (!self.auth.password.is_empty() || self.auth.ssh_key_path.is_some())
        {
            return Err(ConfigError::InvalidValue {
                section: "auth".to_string(),
                key: "username".to_string(),
                message: "a username is required when a password or ssh key is set".to_string(),
            }
            .into());
        }
        if self.client.revision.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "client".to_string(),
                key: "revision".to_string(),
                message: "revision must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Secrets are replaced with `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_client_options(&mut options);
        self.format_auth_options(&mut options);
        self.format_submodule_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.json_logs".into(), self.global.json_logs.to_string());
    }

    fn format_client_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "client.dir_path".into(),
            self.client.dir_path.display().to_string(),
        );
        options.insert("client.origin_url".into(), self.client.origin_url.clone());
        options.insert("client.revision".into(), self.client.revision.clone());
        options.insert(
            "client.create_branch".into(),
            self.client.create_branch.to_string(),
        );
        options.insert("client.author_name".into(), self.client.author_name.clone());
        options.insert(
            "client.author_email".into(),
            self.client.author_email.clone(),
        );
    }

    fn format_auth_options(&self, options: &mut BTreeMap<String, String>) {
        if !self.auth.username.is_empty() {
            options.insert("auth.username".into(), self.auth.username.clone());
        }
        if !self.auth.password.is_empty() {
            options.insert("auth.password".into(), "[hidden]".into());
        }
        if let Some(key) = &self.auth.ssh_key_path {
            options.insert("auth.ssh_key_path".into(), key.display().to_string());
        }
    }

    fn format_submodule_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "submodule.allow_file_protocol".into(),
            self.submodule.allow_file_protocol.to_string(),
        );
        options.insert(
            "submodule.retry_limit".into(),
            self.submodule.retry_limit.to_string(),
        );
    }
}
