//! repo2md: export a git repository as a single Markdown document
//!
//! The selection pipeline resolves an optional scope (recent commits,
//! uncommitted changes, include globs), filters the tracked-file listing by
//! exclude patterns, meta-file policy, binary detection and size, and renders
//! the survivors with a summary, a file tree and one fenced block per file.
//! The same pipeline, scoped to a branch's changes, backs the review document
//! built by [`render::generate_pr_markdown`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod git;
pub mod output;
pub mod render;
pub mod scan;
pub mod scope;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use domain::{RepositoryFile, ScanResult, ScanStats, SkipReason};
pub use render::generate_markdown;
pub use scan::{scan_repository, ScanError, ScanOptions};
pub use scope::{resolve_scope, ScopeConfig, ScopeWhitelist};
