// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!           GtcError (~24 bytes)
//!                  |
//!     +------+------+------+------+
//!     |      |      |      |      |
//!     v      v      v      v      v
//!    Git   Config Process  Fs    Io
//!    Box    Box    Box    Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Git     Gix, CommandFailed, CloneFailed, RevisionNotFound, ...
//!   Config  LoadFailed, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed
//!   Fs      IoError
//!
//! All variants boxed => GtcError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GtcError`].
pub type GtcResult<T> = std::result::Result<T, GtcError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GtcError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl GtcError {
    /// Returns the inner [`GitError`], if any.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }

    /// True when the failure came from a reference or lock file that changed
    /// underneath the operation. Such operations can be retried.
    #[must_use]
    pub fn is_ref_contention(&self) -> bool {
        self.as_git().is_some_and(GitError::is_ref_contention)
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GtcError {
                fn from(err: $error) -> Self {
                    GtcError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// gix has many error types; the frequently hit ones are kept typed, the
/// rest are flattened into [`GixError::Query`].
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Any other library failure, tagged with the operation that hit it.
    #[error("{operation} failed: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },
}

impl GixError {
    /// Flatten a library error into [`GixError::Query`].
    pub(crate) fn query(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Query {
            operation,
            message: err.to_string(),
        }
    }
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Neither a branch, a tag nor a commit matches.
    #[error("revision not found: {revision}")]
    RevisionNotFound { revision: String },

    /// The repository has no tags.
    #[error("no tag was found")]
    NoTags,

    /// No usable credentials were supplied.
    #[error("no auth method was found")]
    NoAuthMethod,

    /// Remote not found.
    #[error("remote not found: {remote}")]
    RemoteNotFound { remote: String },

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },

    /// A URL could not be parsed or rewritten.
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// stderr fragments git prints when a ref or lock file moved under it.
const REF_CONTENTION_MARKERS: &[&str] = &[
    "cannot lock ref",
    ".lock': file exists",
    "unable to update local ref",
    "reference has changed",
];

impl GitError {
    /// True when the failure came from concurrent reference updates.
    #[must_use]
    pub fn is_ref_contention(&self) -> bool {
        match self {
            Self::CommandFailed { message, .. }
            | Self::CloneFailed { message, .. }
            | Self::CheckoutFailed { message, .. } => {
                let message = message.to_lowercase();
                REF_CONTENTION_MARKERS
                    .iter()
                    .any(|marker| message.contains(marker))
            }
            _ => false,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read, parsed, or deserialized.
    #[error("failed to load config from {sources}: {message}")]
    LoadFailed { sources: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests;
