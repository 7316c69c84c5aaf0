// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, GtcError, GtcResult};

#[test]
fn test_config_error_display() {
    let err = ConfigError::LoadFailed {
        sources: "gtc.toml".to_string(),
        message: "unknown field `revison`".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"failed to load config from gtc.toml: unknown field `revison`"
    );
}

#[test]
fn test_gtc_error_size() {
    let size = std::mem::size_of::<GtcError>();
    assert!(size <= 24, "GtcError is {size} bytes, expected <= 24");
}

#[test]
fn test_gtc_result_size() {
    let size = std::mem::size_of::<GtcResult<()>>();
    assert!(size <= 24, "GtcResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_ref_contention_detected_from_stderr() {
    let lock = GitError::CommandFailed {
        command: "git fetch".to_string(),
        message: "error: cannot lock ref 'refs/remotes/origin/master': is at 1a2b but expected 3c4d"
            .to_string(),
    };
    assert!(lock.is_ref_contention());

    let index_lock = GitError::CommandFailed {
        command: "git checkout".to_string(),
        message: "fatal: Unable to create '/tmp/x/.git/index.lock': File exists.".to_string(),
    };
    assert!(index_lock.is_ref_contention());

    let wrapped: GtcError = lock.into();
    assert!(wrapped.is_ref_contention());
}

#[test]
fn test_ref_contention_ignores_other_failures() {
    let err = GitError::CommandFailed {
        command: "git pull".to_string(),
        message: "fatal: 'origin' does not appear to be a git repository".to_string(),
    };
    assert!(!err.is_ref_contention());
    assert!(!GitError::NoTags.is_ref_contention());

    let io: GtcError = std::io::Error::other("boom").into();
    assert!(!io.is_ref_contention());
    assert!(io.as_git().is_none());
}
