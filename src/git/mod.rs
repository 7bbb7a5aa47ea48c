//! Read-only version-control queries
//!
//! The scope queries ([`recent_commit_files`], [`uncommitted_files`]) are
//! fail-soft: any failure yields an empty set. [`tracked_files`] feeds the
//! scanner and surfaces failures to the caller. The branch queries in
//! [`pr`] compare the current branch with a target branch for review
//! documents; [`branch_changed_files`] is fail-soft like the scope queries.

mod error;
pub mod pr;
mod queries;

pub use error::{GitError, GitResult};
pub use pr::{branch_changed_files, pr_context, PrContext};
pub use queries::{open_repository, recent_commit_files, tracked_files, uncommitted_files};
