//! git2-backed queries returning absolute paths of files that exist on disk.

use git2::{Repository, Status, StatusOptions};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::error::{GitError, GitResult};

/// Open the repository whose working tree contains `root`.
///
/// Returns the repository together with its canonical working-tree path.
pub fn open_repository(root: &Path) -> GitResult<(Repository, PathBuf)> {
    let repo = Repository::discover(root)
        .map_err(|source| GitError::NotARepository { path: root.to_path_buf(), source })?;
    let workdir = repo
        .workdir()
        .map(canonical_or_raw)
        .ok_or_else(|| GitError::BareRepository(root.to_path_buf()))?;
    Ok((repo, workdir))
}

/// Files that differ between `HEAD~num_commits` and `HEAD`.
///
/// The first-parent chain is followed. When `HEAD~(num_commits - 1)` is the
/// root commit the empty tree stands in for its parent, so asking for exactly
/// the whole history covers every file it added. Returns an empty set when the
/// history has fewer than `num_commits` commits, `root` is not a repository,
/// `HEAD` is unborn, or any query fails. A file changed and then restored
/// inside the window is not reported.
pub fn recent_commit_files(root: &Path, num_commits: usize) -> BTreeSet<PathBuf> {
    if num_commits == 0 {
        return BTreeSet::new();
    }
    match try_recent_commit_files(root, num_commits) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!("recent-commits query failed for {}: {}", root.display(), err);
            BTreeSet::new()
        }
    }
}

fn try_recent_commit_files(root: &Path, num_commits: usize) -> GitResult<BTreeSet<PathBuf>> {
    let (repo, workdir) = open_repository(root)?;
    let head = repo.head()?.peel_to_commit()?;

    // Walk to HEAD~(n-1); running out of parents first means the history is too short.
    let mut oldest = head.clone();
    for _ in 1..num_commits {
        oldest = match oldest.parent(0) {
            Ok(parent) => parent,
            Err(_) => {
                tracing::debug!("History has fewer than {} commit(s)", num_commits);
                return Ok(BTreeSet::new());
            }
        };
    }
    let base_tree = match oldest.parent(0) {
        Ok(base) => Some(base.tree()?),
        Err(_) => None,
    };

    let head_tree = head.tree()?;
    let diff = repo.diff_tree_to_tree(base_tree.as_ref(), Some(&head_tree), None)?;

    let mut changed = BTreeSet::new();
    for delta in diff.deltas() {
        if let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) {
            changed.insert(workdir.join(path));
        }
    }

    tracing::debug!("{} paths changed in last {} commit(s)", changed.len(), num_commits);
    Ok(existing_files_under(root, changed))
}

/// Staged, unstaged and untracked (non-ignored) files.
///
/// Returns an empty set when `root` is not a repository or the status query fails.
pub fn uncommitted_files(root: &Path) -> BTreeSet<PathBuf> {
    match try_uncommitted_files(root) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!("uncommitted query failed for {}: {}", root.display(), err);
            BTreeSet::new()
        }
    }
}

fn try_uncommitted_files(root: &Path) -> GitResult<BTreeSet<PathBuf>> {
    let (repo, workdir) = open_repository(root)?;

    let mut opts = status_options();
    let statuses = repo.statuses(Some(&mut opts))?;

    let mut changed = BTreeSet::new();
    for entry in statuses.iter() {
        let status = entry.status();
        if status == Status::CURRENT || status.is_ignored() {
            continue;
        }
        if let Some(path) = entry.path() {
            changed.insert(workdir.join(path));
        }
    }

    Ok(existing_files_under(root, changed))
}

/// Candidate files for scanning: index entries plus untracked, non-ignored files.
///
/// Sorted by repository-relative path, byte-wise. Only files located under
/// `root` are returned. Fails when `root` is not inside a git working tree.
pub fn tracked_files(root: &Path) -> GitResult<Vec<PathBuf>> {
    let (repo, workdir) = open_repository(root)?;

    let mut relative: BTreeSet<String> = BTreeSet::new();

    let index = repo.index()?;
    for entry in index.iter() {
        match String::from_utf8(entry.path) {
            Ok(path) => {
                relative.insert(path);
            }
            Err(err) => {
                tracing::warn!("Skipping index entry with non UTF-8 path: {:?}", err.as_bytes());
            }
        }
    }

    let mut opts = status_options();
    let statuses = repo.statuses(Some(&mut opts))?;
    for entry in statuses.iter() {
        if entry.status().is_wt_new() {
            if let Some(path) = entry.path() {
                relative.insert(path.to_string());
            }
        }
    }

    let root = canonical_or_raw(root);
    let files: Vec<PathBuf> = relative
        .into_iter()
        .map(|rel| workdir.join(rel))
        .filter(|path| path.starts_with(&root) && path.is_file())
        .collect();

    tracing::debug!("{} candidate files under {}", files.len(), root.display());
    Ok(files)
}

fn status_options() -> StatusOptions {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .exclude_submodules(true);
    opts
}

/// Keep paths that still exist as files and lie under `root`.
pub(super) fn existing_files_under(root: &Path, paths: BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
    let root = canonical_or_raw(root);
    paths.into_iter().filter(|path| path.starts_with(&root) && path.is_file()).collect()
}

pub(super) fn canonical_or_raw(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestRepo;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn recent_commits_returns_files_from_last_commit() {
        let repo = TestRepo::init();
        repo.commit_file("old.py", "# old", "first");
        repo.commit_file("new.py", "# new", "second");

        let files = recent_commit_files(&repo.root(), 1);
        assert_eq!(files, BTreeSet::from([repo.root().join("new.py")]));
    }

    #[test]
    fn recent_commits_spans_multiple_commits_including_root() {
        let repo = TestRepo::init();
        repo.commit_file("old.py", "# old", "first");
        repo.commit_file("new.py", "# new", "second");

        let files = recent_commit_files(&repo.root(), 2);
        assert_eq!(
            files,
            BTreeSet::from([repo.root().join("new.py"), repo.root().join("old.py")])
        );
    }

    #[test]
    fn recent_commits_beyond_history_is_empty() {
        let repo = TestRepo::init();
        repo.commit_file("only.py", "# only", "first");
        repo.commit_file("second.py", "# second", "second");

        assert!(recent_commit_files(&repo.root(), 3).is_empty());
        assert!(recent_commit_files(&repo.root(), 10).is_empty());
    }

    #[test]
    fn recent_commits_skip_files_restored_within_window() {
        let repo = TestRepo::init();
        repo.commit_file("base.py", "# base", "base");
        repo.commit_file("flip.py", "v1", "add flip");
        repo.commit_file("flip.py", "v2", "change flip");
        repo.commit_file("flip.py", "v1", "revert flip");

        assert!(recent_commit_files(&repo.root(), 2).is_empty());
        assert_eq!(
            recent_commit_files(&repo.root(), 3),
            BTreeSet::from([repo.root().join("flip.py")])
        );
    }

    #[test]
    fn recent_commits_drops_deleted_files() {
        let repo = TestRepo::init();
        repo.commit_file("gone.py", "# gone", "first");
        fs::remove_file(repo.root().join("gone.py")).expect("remove");

        assert!(recent_commit_files(&repo.root(), 1).is_empty());
    }

    #[test]
    fn recent_commits_on_unborn_head_is_empty() {
        let repo = TestRepo::init();
        repo.write("staged.py", "# staged");
        repo.stage("staged.py");

        assert!(recent_commit_files(&repo.root(), 1).is_empty());
    }

    #[test]
    fn uncommitted_includes_modified_and_untracked() {
        let repo = TestRepo::init();
        repo.commit_file("committed.py", "# committed", "init");
        repo.write("committed.py", "# modified");
        repo.write("new_file.py", "# new");

        let files = uncommitted_files(&repo.root());
        assert!(files.contains(&repo.root().join("committed.py")));
        assert!(files.contains(&repo.root().join("new_file.py")));
    }

    #[test]
    fn uncommitted_keeps_staged_files() {
        let repo = TestRepo::init();
        repo.commit_file("committed.py", "# committed", "init");
        repo.write("committed.py", "# modified");
        repo.write("new_file.py", "# new");
        repo.stage("new_file.py");

        let files = uncommitted_files(&repo.root());
        assert!(files.contains(&repo.root().join("new_file.py")));
        assert!(files.contains(&repo.root().join("committed.py")));
    }

    #[test]
    fn uncommitted_skips_ignored_and_clean_files() {
        let repo = TestRepo::init();
        repo.commit_file(".gitignore", "*.log\n", "ignore logs");
        repo.commit_file("clean.py", "# clean", "clean");
        repo.write("debug.log", "noise");

        let files = uncommitted_files(&repo.root());
        assert!(files.is_empty(), "got: {:?}", files);
    }

    #[test]
    fn scope_queries_on_plain_directory_are_empty() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.py"), "# a").expect("write");

        assert!(recent_commit_files(tmp.path(), 1).is_empty());
        assert!(uncommitted_files(tmp.path()).is_empty());
    }

    #[test]
    fn tracked_files_on_plain_directory_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.py"), "# a").expect("write");

        let err = tracked_files(tmp.path()).expect_err("plain dir must fail");
        assert!(matches!(err, GitError::NotARepository { .. }));
    }

    #[test]
    fn tracked_files_lists_index_and_untracked_sorted() {
        let repo = TestRepo::init();
        repo.commit_file(".gitignore", "*.log\n", "ignore");
        repo.commit_file("src/main.py", "# main", "main");
        repo.write("b.py", "# untracked");
        repo.write("a.log", "ignored");

        let files = tracked_files(&repo.root()).expect("tracked");
        let root = repo.root();
        assert_eq!(files, vec![root.join(".gitignore"), root.join("b.py"), root.join("src/main.py")]);
    }

    #[test]
    fn tracked_files_from_subdirectory_stays_in_subtree() {
        let repo = TestRepo::init();
        repo.commit_file("top.py", "# top", "top");
        repo.commit_file("pkg/inner.py", "# inner", "inner");

        let files = tracked_files(&repo.root().join("pkg")).expect("tracked");
        assert_eq!(files, vec![repo.root().join("pkg/inner.py")]);
    }
}
