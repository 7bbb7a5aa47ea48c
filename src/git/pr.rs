//! Branch comparison for review documents.
//!
//! Everything is measured from the merge base of `HEAD` and the target
//! branch, so commits that landed on the target after the branch point do
//! not show up as changes.

use git2::{BranchType, Commit, Diff, DiffFormat, Oid, Repository};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::error::{GitError, GitResult};
use super::queries::{existing_files_under, open_repository};

/// Branch used when nothing better can be detected.
pub const DEFAULT_TARGET_BRANCH: &str = "main";

/// What a review document needs to know about the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrContext {
    pub current_branch: String,
    pub target_branch: String,
    /// Unified patch text from the merge base to `HEAD`
    pub diff: String,
    /// Changed files that still exist, as absolute paths
    pub changed_files: BTreeSet<PathBuf>,
    /// Commits reachable from `HEAD` but not from the target
    pub commit_count: usize,
}

/// Gather branch names, diff, changed files and commit count in one pass.
///
/// `target` wins when given; otherwise see [`target_branch`].
pub fn pr_context(root: &Path, target: Option<&str>) -> GitResult<PrContext> {
    let target_branch = target_branch(root, target);
    let (repo, _) = open_repository(root)?;
    let current_branch = head_name(&repo)?;

    let (head, base) = merge_base(&repo, &target_branch)?;
    let diff = base_diff(&repo, &head, base)?;

    let context = PrContext {
        current_branch,
        diff: patch_text(&diff)?,
        changed_files: diff_files(root, &repo, &diff)?,
        commit_count: commits_since(&repo, &head, base)?,
        target_branch,
    };
    tracing::debug!(
        "{} is {} commit(s) ahead of {} with {} changed file(s)",
        context.current_branch,
        context.commit_count,
        context.target_branch,
        context.changed_files.len()
    );
    Ok(context)
}

/// Short name of the checked-out branch, or `HEAD` when detached.
pub fn current_branch(root: &Path) -> GitResult<String> {
    let (repo, _) = open_repository(root)?;
    head_name(&repo)
}

/// Branch to compare against.
///
/// An explicit, non-blank name is returned as given. Otherwise the branch
/// `origin/HEAD` points at, then a local `main`, then a local `master`, and
/// finally [`DEFAULT_TARGET_BRANCH`].
pub fn target_branch(root: &Path, explicit: Option<&str>) -> String {
    if let Some(name) = explicit.map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    match open_repository(root) {
        Ok((repo, _)) => detect_default_branch(&repo),
        Err(err) => {
            tracing::debug!("target detection failed for {}: {}", root.display(), err);
            DEFAULT_TARGET_BRANCH.to_string()
        }
    }
}

/// Unified diff from the merge base with `target` to `HEAD`. Empty when `HEAD`
/// has nothing the target lacks.
pub fn branch_diff(root: &Path, target: &str) -> GitResult<String> {
    let (repo, _) = open_repository(root)?;
    let (head, base) = merge_base(&repo, target)?;
    let diff = base_diff(&repo, &head, base)?;
    patch_text(&diff)
}

/// Files changed since `HEAD` diverged from `target`.
///
/// Fail-soft like the other scope queries: errors are logged and yield an
/// empty set. Deleted files are dropped.
pub fn branch_changed_files(root: &Path, target: &str) -> BTreeSet<PathBuf> {
    match try_branch_changed_files(root, target) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!("branch query failed for {}: {}", root.display(), err);
            BTreeSet::new()
        }
    }
}

fn try_branch_changed_files(root: &Path, target: &str) -> GitResult<BTreeSet<PathBuf>> {
    let (repo, _) = open_repository(root)?;
    let (head, base) = merge_base(&repo, target)?;
    let diff = base_diff(&repo, &head, base)?;
    diff_files(root, &repo, &diff)
}

fn head_name(repo: &Repository) -> GitResult<String> {
    let head = repo.head()?;
    Ok(head.shorthand().unwrap_or("HEAD").to_string())
}

fn detect_default_branch(repo: &Repository) -> String {
    let remote_default = repo.find_reference("refs/remotes/origin/HEAD").ok().and_then(|r| {
        r.symbolic_target().and_then(|t| t.strip_prefix("refs/remotes/")).map(str::to_string)
    });
    if let Some(name) = remote_default {
        return name;
    }
    for candidate in [DEFAULT_TARGET_BRANCH, "master"] {
        if repo.find_branch(candidate, BranchType::Local).is_ok() {
            return candidate.to_string();
        }
    }
    DEFAULT_TARGET_BRANCH.to_string()
}

/// `HEAD` and the merge base of `HEAD` with `target`.
fn merge_base<'r>(repo: &'r Repository, target: &str) -> GitResult<(Commit<'r>, Oid)> {
    let head = repo.head()?.peel_to_commit()?;
    let target_commit = repo
        .revparse_single(target)
        .and_then(|object| object.peel_to_commit())
        .map_err(|source| GitError::UnknownRevision { name: target.to_string(), source })?;
    let base = repo.merge_base(head.id(), target_commit.id())?;
    Ok((head, base))
}

fn base_diff<'r>(repo: &'r Repository, head: &Commit<'r>, base: Oid) -> GitResult<Diff<'r>> {
    let base_tree = repo.find_commit(base)?.tree()?;
    let head_tree = head.tree()?;
    Ok(repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), None)?)
}

fn patch_text(diff: &Diff<'_>) -> GitResult<String> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        // Content lines carry their marker in `origin`; headers already include theirs.
        if matches!(line.origin(), '+' | '-' | ' ') {
            text.push(line.origin());
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}

fn diff_files(root: &Path, repo: &Repository, diff: &Diff<'_>) -> GitResult<BTreeSet<PathBuf>> {
    let workdir = repo.workdir().ok_or_else(|| GitError::BareRepository(root.to_path_buf()))?;
    let workdir = super::queries::canonical_or_raw(workdir);
    let changed: BTreeSet<PathBuf> = diff
        .deltas()
        .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
        .map(|path| workdir.join(path))
        .collect();
    Ok(existing_files_under(root, changed))
}

fn commits_since(repo: &Repository, head: &Commit<'_>, base: Oid) -> GitResult<usize> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push(head.id())?;
    revwalk.hide(base)?;
    let mut count = 0;
    for oid in revwalk {
        oid?;
        count += 1;
    }
    Ok(count)
}
