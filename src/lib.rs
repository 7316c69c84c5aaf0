// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         repo / submodule / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML + GTC_* env vars   |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |            git            |
//!              | client  submodule  info   |
//!              | auth    query(gix) cmd(CLI)|
//!              '-------------+-------------'
//!                            |
//!                          mock
//!                 (fixture repositories)
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod mock;
pub mod utility;
