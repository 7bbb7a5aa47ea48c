//! Repository scanning over the git tracked-file listing

use std::path::Path;

pub mod scanner;
pub mod tree;

pub use scanner::{FileScanner, ScanError, ScanOptions};
pub use tree::generate_tree;

use crate::domain::ScanResult;

/// Scan the repository at `root` with `options`.
///
/// Fails when `root` is missing, not a directory, or not inside a git work
/// tree, and when an exclude pattern does not compile.
pub fn scan_repository<P: AsRef<Path>>(
    root: P,
    options: &ScanOptions,
) -> Result<ScanResult, ScanError> {
    FileScanner::new(root.as_ref().to_path_buf()).with_options(options.clone()).scan()
}
