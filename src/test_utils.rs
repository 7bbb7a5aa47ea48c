//! Fixture repositories for unit tests.

use git2::{BranchType, Commit, IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway git repository in a temp directory.
pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    /// Empty repository whose unborn `HEAD` points at `main`.
    pub fn init() -> Self {
        let dir = TempDir::new().expect("tmp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("git init");
        Self { dir, repo }
    }

    /// Canonical working-tree path.
    pub fn root(&self) -> PathBuf {
        self.dir.path().canonicalize().expect("canonical root")
    }

    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, content).expect("write fixture file");
    }

    pub fn stage(&self, rel: &str) {
        let mut index = self.repo.index().expect("index");
        index.add_path(Path::new(rel)).expect("add path");
        index.write().expect("write index");
    }

    pub fn stage_all(&self) {
        let mut index = self.repo.index().expect("index");
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None).expect("add all");
        index.write().expect("write index");
    }

    /// Commit whatever is staged on top of `HEAD`.
    pub fn commit(&self, message: &str) -> Oid {
        let mut index = self.repo.index().expect("index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::now("Test", "test@test.com").expect("signature");
        let parent = self.repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        self.repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).expect("commit")
    }

    pub fn commit_file(&self, rel: &str, content: &str, message: &str) -> Oid {
        self.write(rel, content);
        self.stage(rel);
        self.commit(message)
    }

    /// Create `name` at `HEAD` and switch to it. The working tree is unchanged.
    pub fn checkout_new_branch(&self, name: &str) {
        let head = self.repo.head().expect("head").peel_to_commit().expect("head commit");
        self.repo.branch(name, &head, false).expect("create branch");
        self.repo.set_head(&format!("refs/heads/{}", name)).expect("set head");
    }

    /// Switch to an existing local branch, forcing the working tree to match.
    pub fn checkout(&self, name: &str) {
        let branch = self.repo.find_branch(name, BranchType::Local).expect("find branch");
        let refname = branch.get().name().expect("branch ref name").to_string();
        self.repo.set_head(&refname).expect("set head");
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force().remove_untracked(false);
        self.repo.checkout_head(Some(&mut checkout)).expect("checkout head");
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }
}
