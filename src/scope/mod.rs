//! Scope resolution
//!
//! Turns the user's narrowing criteria (recent commits, uncommitted changes,
//! include globs, changes against a target branch) into an optional whitelist
//! of absolute paths. Each active criterion is evaluated independently and the results are
//! unioned. `None` means no restriction; `Some` of an empty set means a
//! restriction is active but nothing matched, and the scanner must then emit
//! nothing.

mod glob;

pub use glob::glob_files;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::git;

/// Optional set of absolute paths the scanner may emit.
pub type ScopeWhitelist = Option<BTreeSet<PathBuf>>;

/// User-supplied narrowing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Number of recent commits whose changed files are in scope
    pub recent: Option<usize>,
    /// Include staged, unstaged and untracked files
    pub uncommitted: bool,
    /// Glob patterns relative to the repository root
    pub include_patterns: Vec<String>,
    /// Files changed on the current branch since it diverged from this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_target: Option<String>,
}

impl ScopeConfig {
    pub fn is_scoped(&self) -> bool {
        self.recent.is_some()
            || self.uncommitted
            || !self.include_patterns.is_empty()
            || self.branch_target.is_some()
    }

    /// Active strategies in a fixed order: recent commits, uncommitted, globs, branch.
    pub fn strategies(&self) -> Vec<ScopeStrategy> {
        let mut strategies = Vec::new();
        if let Some(n) = self.recent {
            strategies.push(ScopeStrategy::RecentCommits(n));
        }
        if self.uncommitted {
            strategies.push(ScopeStrategy::Uncommitted);
        }
        if !self.include_patterns.is_empty() {
            strategies.push(ScopeStrategy::IncludeGlobs(self.include_patterns.clone()));
        }
        if let Some(target) = &self.branch_target {
            strategies.push(ScopeStrategy::BranchChanges(target.clone()));
        }
        strategies
    }
}

/// One way of selecting files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeStrategy {
    RecentCommits(usize),
    Uncommitted,
    IncludeGlobs(Vec<String>),
    BranchChanges(String),
}

impl ScopeStrategy {
    pub fn evaluate(&self, root: &Path) -> BTreeSet<PathBuf> {
        match self {
            ScopeStrategy::RecentCommits(n) => git::recent_commit_files(root, *n),
            ScopeStrategy::Uncommitted => git::uncommitted_files(root),
            ScopeStrategy::IncludeGlobs(patterns) => glob_files(root, patterns),
            ScopeStrategy::BranchChanges(target) => git::branch_changed_files(root, target),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ScopeStrategy::RecentCommits(n) => format!("last {} commit(s)", n),
            ScopeStrategy::Uncommitted => "uncommitted changes".to_string(),
            ScopeStrategy::IncludeGlobs(patterns) => format!("include {}", patterns.join(", ")),
            ScopeStrategy::BranchChanges(target) => format!("changes against {}", target),
        }
    }
}

/// Resolve `config` into a whitelist for the repository at `root`.
///
/// Criteria are combined with OR: `--recent 1 --include "*.py"` keeps the files
/// of the last commit plus every root-level Python file.
pub fn resolve_scope(root: &Path, config: &ScopeConfig) -> ScopeWhitelist {
    if !config.is_scoped() {
        return None;
    }

    let mut whitelist = BTreeSet::new();
    for strategy in config.strategies() {
        let files = strategy.evaluate(root);
        tracing::debug!("Scope '{}' selected {} file(s)", strategy.label(), files.len());
        whitelist.extend(files);
    }

    if whitelist.is_empty() {
        tracing::warn!("Scope criteria matched no files under {}", root.display());
    }
    Some(whitelist)
}
