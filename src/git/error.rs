//! Error types for version-control queries

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the load-bearing git queries.
#[derive(Error, Debug)]
pub enum GitError {
    /// The path is not inside a git working tree
    #[error("Not a git repository: {}", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// The repository has no working tree to export
    #[error("Repository has no working tree: {}", .0.display())]
    BareRepository(PathBuf),

    /// A branch or revision name that does not resolve to a commit
    #[error("Unknown branch or revision '{name}'")]
    UnknownRevision {
        name: String,
        #[source]
        source: git2::Error,
    },

    /// Generic libgit2 failure
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

/// Specialized Result type for git queries
pub type GitResult<T> = Result<T, GitError>;
