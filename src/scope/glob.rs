//! Include-glob expansion relative to the repository root.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::git;
use crate::utils::normalize_path;

/// Candidate files under `root` matching any of `patterns`.
///
/// Candidates are the same index and untracked listing the scanner uses, so
/// ignored trees such as `target/` or `node_modules/` are never visited.
/// `*` stays within one path segment and `**/` spans any number of
/// directories: `*.md` only matches root-level files while `src/**/*.py`
/// matches the whole `src/` subtree. Invalid patterns are logged and skipped.
/// Outside a git working tree nothing matches.
pub fn glob_files(root: &Path, patterns: &[String]) -> BTreeSet<PathBuf> {
    let Some(globset) = build_include_globset(patterns) else {
        return BTreeSet::new();
    };

    let candidates = match git::tracked_files(root) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!("include query failed for {}: {}", root.display(), err);
            return BTreeSet::new();
        }
    };

    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let matched: BTreeSet<PathBuf> = candidates
        .into_iter()
        .filter(|path| match path.strip_prefix(&root) {
            Ok(rel) => globset.is_match(normalize_path(&rel.to_string_lossy())),
            Err(_) => false,
        })
        .collect();

    tracing::debug!("{} files matched include patterns {:?}", matched.len(), patterns);
    matched
}

fn build_include_globset(patterns: &[String]) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let mut added = 0usize;
    for pattern in patterns {
        let pattern = pattern.trim().trim_start_matches("./");
        if pattern.is_empty() {
            continue;
        }
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
                added += 1;
            }
            Err(err) => tracing::warn!("Ignoring invalid include pattern '{}': {}", pattern, err),
        }
    }

    if added == 0 {
        return None;
    }

    match builder.build() {
        Ok(set) => Some(set),
        Err(err) => {
            tracing::warn!("Failed to compile include patterns: {}", err);
            None
        }
    }
}
