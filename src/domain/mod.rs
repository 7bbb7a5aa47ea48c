//! Core data model shared by the scanner, the renderers and the CLI.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::path::PathBuf;

pub mod language;
pub mod meta;

pub use language::get_language;
pub use meta::is_meta_file;

/// Default per-file size limit (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Schema version of the JSON scan report.
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One file retained by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Root-relative path with `/` separators
    pub relative_path: String,
    pub content: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Fence label, `None` when the file type is unknown
    pub language: Option<String>,
}

/// Why a candidate file was left out of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    OutOfScope,
    ExcludedByPattern,
    MetaFile,
    Binary,
    TooLarge,
    Unreadable,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::OutOfScope => "out of scope",
            SkipReason::ExcludedByPattern => "excluded by pattern",
            SkipReason::MetaFile => "meta file excluded",
            SkipReason::Binary => "binary file",
            SkipReason::TooLarge => "exceeds size limit",
            SkipReason::Unreadable => "unreadable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters maintained for every scan, verbose or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_considered: usize,
    pub files_included: usize,
    pub files_skipped_scope: usize,
    pub files_skipped_pattern: usize,
    pub files_skipped_meta: usize,
    pub files_skipped_binary: usize,
    pub files_skipped_size: usize,
    pub files_skipped_unreadable: usize,
    pub total_bytes_included: u64,
}

impl ScanStats {
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::OutOfScope => self.files_skipped_scope += 1,
            SkipReason::ExcludedByPattern => self.files_skipped_pattern += 1,
            SkipReason::MetaFile => self.files_skipped_meta += 1,
            SkipReason::Binary => self.files_skipped_binary += 1,
            SkipReason::TooLarge => self.files_skipped_size += 1,
            SkipReason::Unreadable => self.files_skipped_unreadable += 1,
        }
    }

    pub fn files_skipped(&self) -> usize {
        self.files_skipped_scope
            + self.files_skipped_pattern
            + self.files_skipped_meta
            + self.files_skipped_binary
            + self.files_skipped_size
            + self.files_skipped_unreadable
    }

    pub fn to_report_value(&self) -> Value {
        json!({
            "files_considered": self.files_considered,
            "files_included": self.files_included,
            "files_skipped": {
                "scope": self.files_skipped_scope,
                "pattern": self.files_skipped_pattern,
                "meta": self.files_skipped_meta,
                "binary": self.files_skipped_binary,
                "size": self.files_skipped_size,
                "unreadable": self.files_skipped_unreadable,
            },
            "total_bytes_included": self.total_bytes_included,
        })
    }
}

/// Outcome of one scan. Built once and read by the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Retained files, in tracked-file listing order
    pub files: Vec<RepositoryFile>,
    /// Canonical repository root
    pub root: PathBuf,
    pub total_size: u64,
    /// Accepted paths, populated only in verbose mode
    pub included_files: Vec<PathBuf>,
    /// Rejected paths with their reason, populated only in verbose mode
    pub ignored_files: Vec<(PathBuf, SkipReason)>,
    pub stats: ScanStats,
}

impl ScanResult {
    /// Directory name of the root, used as the document title.
    pub fn repo_name(&self) -> String {
        self.root
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.root.display().to_string())
    }
}
