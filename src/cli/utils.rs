//! Shared CLI arguments and helpers.

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::ScanResult;
use crate::scan::ScanOptions;
use crate::utils::relative_path_string;
use anyhow::Result;

/// Filtering flags shared by every command that scans.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exclude files matching this glob (repeatable)
    #[arg(short = 'e', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Exclude additional meta files matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude_meta: Vec<String>,

    /// Leave out root-level meta files (license, readme, ignore files, ...)
    #[arg(long)]
    pub no_meta: bool,

    /// Keep this meta file even with --no-meta (repeatable)
    #[arg(long, value_name = "NAME")]
    pub include_meta: Vec<String>,

    /// Skip files larger than this (bytes) [default: 1048576]
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_file_size: Option<u64>,

    /// Defaults file (repo2md.toml or repo2md.yml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl FilterArgs {
    pub fn to_overrides(&self, verbose: bool) -> CliOverrides {
        CliOverrides {
            exclude: self.exclude.clone(),
            exclude_meta: self.exclude_meta.clone(),
            no_meta: self.no_meta,
            include_meta: self.include_meta.clone(),
            max_file_size: self.max_file_size,
            verbose,
            ..Default::default()
        }
    }

    /// Load the defaults file for `root` and merge these flags over it.
    pub fn scan_options(&self, root: &Path, verbose: bool) -> Result<ScanOptions> {
        merge_over_file(root, self.config.as_deref(), &self.to_overrides(verbose))
    }
}

/// Filtering plus scope flags, shared by `export` and `info`.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Only files changed in the last N commits
    #[arg(long, value_name = "N", value_parser = parse_positive)]
    pub recent: Option<usize>,

    /// Only staged, unstaged and untracked files
    #[arg(long)]
    pub uncommitted: bool,

    /// Only files matching this glob, relative to the repository root (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,
}

impl SelectionArgs {
    pub fn to_overrides(&self, verbose: bool) -> CliOverrides {
        CliOverrides {
            include: self.include.clone(),
            recent: self.recent,
            uncommitted: self.uncommitted,
            ..self.filter.to_overrides(verbose)
        }
    }

    pub fn scan_options(&self, root: &Path, verbose: bool) -> Result<ScanOptions> {
        merge_over_file(root, self.filter.config.as_deref(), &self.to_overrides(verbose))
    }
}

fn merge_over_file(
    root: &Path,
    config: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<ScanOptions> {
    let file_config = load_config(root, config)?;
    merge_cli_with_config(overrides, &file_config)
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        Ok(_) => Err("must be at least 1".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Print the included and ignored paths recorded by a verbose scan.
pub fn print_verbose_report(result: &ScanResult) {
    eprintln!("=== Verbose File Report ===");
    eprintln!("Included files:");
    for path in &result.included_files {
        eprintln!("  {}", relative_path_string(path, &result.root));
    }
    eprintln!("\nIgnored files:");
    for (path, reason) in &result.ignored_files {
        eprintln!("  {} ({})", relative_path_string(path, &result.root), reason);
    }
    eprintln!("===========================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("3"), Ok(3));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-1").is_err());
        assert!(parse_positive("abc").is_err());
    }

    #[test]
    fn test_to_overrides_carries_verbose() {
        let args = SelectionArgs {
            filter: FilterArgs { no_meta: true, ..Default::default() },
            recent: Some(2),
            ..Default::default()
        };
        let overrides = args.to_overrides(true);
        assert!(overrides.no_meta);
        assert!(overrides.verbose);
        assert_eq!(overrides.recent, Some(2));
    }

    #[test]
    fn test_filter_overrides_carry_no_scope() {
        let args = FilterArgs { exclude: vec!["*.log".into()], ..Default::default() };
        let overrides = args.to_overrides(false);
        assert_eq!(overrides.exclude, vec!["*.log"]);
        assert!(overrides.include.is_empty());
        assert_eq!(overrides.recent, None);
        assert!(!overrides.uncommitted);
    }
}
