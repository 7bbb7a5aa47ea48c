//! Candidate filtering over the tracked-file listing

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{
    get_language, is_meta_file, RepositoryFile, ScanResult, ScanStats, SkipReason,
    DEFAULT_MAX_FILE_SIZE,
};
use crate::git::{self, GitError};
use crate::scope::{resolve_scope, ScopeConfig, ScopeWhitelist};
use crate::utils::{is_binary_file, read_file_safe, relative_path_string, BINARY_SAMPLE_SIZE};

/// Fatal scan failures. Per-file rejections are never errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Repository path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Repository path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that shapes a scan besides the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Shell-glob patterns matched against the root-relative path and the file name
    pub exclude_patterns: Vec<String>,
    pub exclude_meta_files: bool,
    /// Meta file names kept even when `exclude_meta_files` is set
    pub include_meta: Vec<String>,
    pub max_file_size: u64,
    /// Record accepted and rejected paths on the result
    pub verbose: bool,
    pub scope: Option<ScopeConfig>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            exclude_meta_files: false,
            include_meta: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            verbose: false,
            scope: None,
        }
    }
}

/// Walks the tracked-file listing of one repository and keeps what passes.
pub struct FileScanner {
    root_path: PathBuf,
    options: ScanOptions,
}

impl FileScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path, options: ScanOptions::default() }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Set glob patterns to exclude
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude_patterns = patterns;
        self
    }

    pub fn exclude_meta_files(mut self, exclude: bool) -> Self {
        self.options.exclude_meta_files = exclude;
        self
    }

    /// Set maximum file size in bytes
    pub fn max_file_size(mut self, max_bytes: u64) -> Self {
        self.options.max_file_size = max_bytes;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = verbose;
        self
    }

    pub fn scope(mut self, scope: ScopeConfig) -> Self {
        self.options.scope = Some(scope);
        self
    }

    /// Run the selection pipeline.
    ///
    /// Each candidate goes through scope, exclude patterns, meta policy,
    /// binary detection and the size limit, in that order. The first failing
    /// check decides the skip reason. Output order is the listing order.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let root = self.resolve_root()?;
        let excludes = ExcludeMatcher::new(&self.options.exclude_patterns)?;
        let candidates = git::tracked_files(&root)?;

        let whitelist: ScopeWhitelist =
            self.options.scope.as_ref().and_then(|scope| resolve_scope(&root, scope));

        let mut stats = ScanStats::default();
        let mut files = Vec::new();
        let mut included_files = Vec::new();
        let mut ignored_files = Vec::new();

        for path in candidates {
            stats.files_considered += 1;
            let rel_path = relative_path_string(&path, &root);

            match self.evaluate(&path, &rel_path, whitelist.as_ref(), &excludes) {
                Ok(file) => {
                    tracing::debug!("Including {}", rel_path);
                    stats.files_included += 1;
                    stats.total_bytes_included += file.size;
                    if self.options.verbose {
                        included_files.push(path);
                    }
                    files.push(file);
                }
                Err(reason) => {
                    tracing::debug!("Skipping {}: {}", rel_path, reason);
                    stats.record_skip(reason);
                    if self.options.verbose {
                        ignored_files.push((path, reason));
                    }
                }
            }
        }

        let total_size = files.iter().map(|f| f.size).sum();
        Ok(ScanResult { files, root, total_size, included_files, ignored_files, stats })
    }

    fn resolve_root(&self) -> Result<PathBuf, ScanError> {
        if !self.root_path.exists() {
            return Err(ScanError::RootNotFound(self.root_path.clone()));
        }
        if !self.root_path.is_dir() {
            return Err(ScanError::NotADirectory(self.root_path.clone()));
        }
        self.root_path
            .canonicalize()
            .map_err(|source| ScanError::Io { path: self.root_path.clone(), source })
    }

    fn evaluate(
        &self,
        path: &Path,
        rel_path: &str,
        whitelist: Option<&BTreeSet<PathBuf>>,
        excludes: &ExcludeMatcher,
    ) -> Result<RepositoryFile, SkipReason> {
        if let Some(allowed) = whitelist {
            if !allowed.contains(path) {
                return Err(SkipReason::OutOfScope);
            }
        }

        if excludes.is_match(rel_path) {
            return Err(SkipReason::ExcludedByPattern);
        }

        if self.options.exclude_meta_files && is_meta_file(rel_path) && !self.keeps_meta(rel_path)
        {
            return Err(SkipReason::MetaFile);
        }

        match is_binary_file(path, BINARY_SAMPLE_SIZE) {
            Ok(true) => return Err(SkipReason::Binary),
            Ok(false) => {}
            Err(err) => {
                tracing::warn!("Could not read {}: {}", rel_path, err);
                return Err(SkipReason::Unreadable);
            }
        }

        let size = match path.metadata() {
            Ok(m) => m.len(),
            Err(err) => {
                tracing::warn!("Could not stat {}: {}", rel_path, err);
                return Err(SkipReason::Unreadable);
            }
        };
        if size > self.options.max_file_size {
            return Err(SkipReason::TooLarge);
        }

        let (content, _encoding) = read_file_safe(path).map_err(|err| {
            tracing::warn!("{:#}", err);
            SkipReason::Unreadable
        })?;

        Ok(RepositoryFile {
            path: path.to_path_buf(),
            relative_path: rel_path.to_string(),
            content,
            size,
            language: get_language(path).map(str::to_string),
        })
    }

    fn keeps_meta(&self, rel_path: &str) -> bool {
        self.options.include_meta.iter().any(|name| {
            let name = name.trim().trim_start_matches("./");
            name.eq_ignore_ascii_case(rel_path)
        })
    }
}

/// Exclude patterns with `fnmatch`-like semantics.
///
/// `*` may cross `/`. A pattern matches when it matches the relative path or
/// the bare file name. A trailing `/` makes the pattern a directory glob:
/// `build*/` or `*.egg-info/` match anything below a directory whose name
/// matches, and `a/b/` matches anything below an `a/b` run of directories.
struct ExcludeMatcher {
    globs: GlobSet,
    dir_globs: GlobSet,
}

impl ExcludeMatcher {
    fn new(patterns: &[String]) -> Result<Self, ScanError> {
        let mut builder = GlobSetBuilder::new();
        let mut dir_builder = GlobSetBuilder::new();

        for raw in patterns {
            let pattern = raw.trim().trim_start_matches("./");
            if pattern.is_empty() {
                continue;
            }
            let invalid = |source| ScanError::InvalidPattern { pattern: raw.clone(), source };
            if let Some(dir) = pattern.strip_suffix('/') {
                let dir = dir.trim_end_matches('/');
                if !dir.is_empty() {
                    // Directory globs stay within whole components.
                    dir_builder.add(
                        GlobBuilder::new(dir).literal_separator(true).build().map_err(invalid)?,
                    );
                }
                continue;
            }
            builder.add(Glob::new(pattern).map_err(invalid)?);
        }

        let joined = || patterns.join(", ");
        let globs = builder
            .build()
            .map_err(|source| ScanError::InvalidPattern { pattern: joined(), source })?;
        let dir_globs = dir_builder
            .build()
            .map_err(|source| ScanError::InvalidPattern { pattern: joined(), source })?;
        Ok(Self { globs, dir_globs })
    }

    fn is_match(&self, rel_path: &str) -> bool {
        if self.globs.is_match(rel_path) {
            return true;
        }
        let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        if self.globs.is_match(file_name) {
            return true;
        }
        self.matches_directory(rel_path)
    }

    /// Try every contiguous run of the parent directories against the directory globs.
    fn matches_directory(&self, rel_path: &str) -> bool {
        if self.dir_globs.is_empty() {
            return false;
        }
        let components: Vec<&str> = rel_path.split('/').collect();
        let dirs = &components[..components.len().saturating_sub(1)];
        (0..dirs.len()).any(|start| {
            (start + 1..=dirs.len()).any(|end| self.dir_globs.is_match(dirs[start..end].join("/")))
        })
    }
}
