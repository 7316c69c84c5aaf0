// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!   client.rs   submodule.rs   info.rs
//!        \           |           /
//!         v          v          v
//!        query.rs          cmd.rs      auth.rs
//!            |                |        (CommandEnv)
//!      ,-----+----------------+------,
//!      |       backend (traits)      |
//!      '-----+----------------+------'
//!            |                |
//!            v                v
//!        GitQuery        GitMutation
//!       (gix, read)      (CLI, write)
//!            |                |
//!            v                v
//!       GixBackend      ShellBackend
//!       .head/.refs     .clone/.pull/.push
//!       .tags           .commit/.checkout
//!       .submodules     .submodule add/update
//!       .status         .status --porcelain
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for writes, submodules, and credentials.

pub mod auth;
pub mod backend;
pub mod client;
pub mod cmd;
pub mod info;
pub mod query;
pub mod submodule;

pub use auth::AuthMethod;
pub use backend::{SubmoduleEntry, TagEntry};
pub use client::{Client, ClientOptions, RefName};
pub use info::Info;
