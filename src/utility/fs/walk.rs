// gtc: Git repository client for GitOps automation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, GtcResult};
use bon::Builder;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Options for reading a directory tree.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
    /// Skip files whose name contains any of these fragments
    #[builder(setters(name = with_skip_files), default)]
    skip_files: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    #[must_use]
    pub fn skip_files(&self) -> &[String] {
        &self.skip_files
    }

    fn skips_file(&self, name: &str) -> bool {
        self.skip_files.iter().any(|frag| name.contains(frag.as_str()))
    }
}

/// Builds a `WalkBuilder` that sees every entry (hidden and ignored files
/// included) and prunes `skip_dirs` before descending.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.follow_links(options.follow_links());
    builder.standard_filters(false);

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.depth() > 0
                && entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Reads every file under `root` into memory, keyed by full path.
///
/// A file `root` is read as-is (skip rules do not apply to it). A missing
/// `root` yields an empty map.
///
/// # Errors
///
/// Returns an `FsError` if a file cannot be read.
///
/// # Example
/// ```no_run
/// use gtc::utility::fs::walk::{read_tree, WalkOptions};
///
/// let options = WalkOptions::builder()
///     .with_skip_dirs(vec![".git".to_string()])
///     .build();
/// let files = read_tree("/srv/deploy/manifests", &options)?;
/// println!("read {} files", files.len());
/// # Ok::<(), gtc::error::GtcError>(())
/// ```
pub fn read_tree<P: AsRef<Path>>(
    root: P,
    options: &WalkOptions,
) -> GtcResult<BTreeMap<PathBuf, Vec<u8>>> {
    let root = root.as_ref();
    let mut files = BTreeMap::new();

    let Ok(meta) = std::fs::metadata(root) else {
        return Ok(files);
    };
    if meta.is_file() {
        let content = std::fs::read(root).map_err(|e| FsError::io(root, e))?;
        files.insert(root.to_path_buf(), content);
        return Ok(files);
    }

    for entry in build_walker(root, options).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk error");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if options.skips_file(&name) {
            continue;
        }
        let path = entry.path();
        let content = std::fs::read(path).map_err(|e| FsError::io(path, e))?;
        files.insert(path.to_path_buf(), content);
    }

    Ok(files)
}
