//! Merge command-line values over the defaults file

use super::FileConfig;
use crate::domain::DEFAULT_MAX_FILE_SIZE;
use crate::scan::ScanOptions;
use crate::scope::ScopeConfig;
use anyhow::Result;

/// Selection values given on the command line. Unset values defer to the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub exclude: Vec<String>,
    /// Extra patterns for meta files, appended to the exclude list
    pub exclude_meta: Vec<String>,
    pub no_meta: bool,
    pub include_meta: Vec<String>,
    pub max_file_size: Option<u64>,
    pub include: Vec<String>,
    pub recent: Option<usize>,
    pub uncommitted: bool,
    pub verbose: bool,
}

/// Build scan options with CLI > file > built-in precedence.
///
/// A non-empty CLI list replaces the file's list. Flags set on the command line
/// win; otherwise the file value applies. `exclude_meta` patterns always add to
/// the exclude list.
pub fn merge_cli_with_config(cli: &CliOverrides, file: &FileConfig) -> Result<ScanOptions> {
    let mut exclude_patterns = pick_list(&cli.exclude, &file.exclude);
    exclude_patterns.extend(cli.exclude_meta.iter().cloned());

    let max_file_size = cli.max_file_size.or(file.max_file_size).unwrap_or(DEFAULT_MAX_FILE_SIZE);
    if max_file_size == 0 {
        anyhow::bail!("max file size must be greater than 0");
    }

    let recent = cli.recent.or(file.recent);
    if recent == Some(0) {
        anyhow::bail!("recent commit count must be at least 1");
    }

    let scope = ScopeConfig {
        recent,
        uncommitted: cli.uncommitted || file.uncommitted.unwrap_or(false),
        include_patterns: pick_list(&cli.include, &file.include),
        branch_target: None,
    };

    Ok(ScanOptions {
        exclude_patterns,
        exclude_meta_files: cli.no_meta || file.no_meta.unwrap_or(false),
        include_meta: pick_list(&cli.include_meta, &file.include_meta),
        max_file_size,
        verbose: cli.verbose,
        scope: scope.is_scoped().then_some(scope),
    })
}

fn pick_list(cli: &[String], file: &[String]) -> Vec<String> {
    if cli.is_empty() {
        file.to_vec()
    } else {
        cli.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_cli_or_file() {
        let options =
            merge_cli_with_config(&CliOverrides::default(), &FileConfig::default()).expect("merge");
        assert_eq!(options, ScanOptions::default());
    }

    #[test]
    fn test_file_values_apply_when_cli_is_silent() {
        let file = FileConfig {
            exclude: strings(&["*.log"]),
            no_meta: Some(true),
            max_file_size: Some(2048),
            include: strings(&["src/**"]),
            recent: Some(2),
            ..Default::default()
        };
        let options = merge_cli_with_config(&CliOverrides::default(), &file).expect("merge");

        assert_eq!(options.exclude_patterns, strings(&["*.log"]));
        assert!(options.exclude_meta_files);
        assert_eq!(options.max_file_size, 2048);
        let scope = options.scope.expect("scoped");
        assert_eq!(scope.recent, Some(2));
        assert_eq!(scope.include_patterns, strings(&["src/**"]));
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = FileConfig {
            exclude: strings(&["*.log"]),
            max_file_size: Some(2048),
            recent: Some(5),
            ..Default::default()
        };
        let cli = CliOverrides {
            exclude: strings(&["*.tmp"]),
            exclude_meta: strings(&["LICENSE*"]),
            max_file_size: Some(10),
            recent: Some(1),
            verbose: true,
            ..Default::default()
        };
        let options = merge_cli_with_config(&cli, &file).expect("merge");

        assert_eq!(options.exclude_patterns, strings(&["*.tmp", "LICENSE*"]));
        assert_eq!(options.max_file_size, 10);
        assert_eq!(options.scope.expect("scoped").recent, Some(1));
        assert!(options.verbose);
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let cli = CliOverrides { max_file_size: Some(0), ..Default::default() };
        assert!(merge_cli_with_config(&cli, &FileConfig::default()).is_err());

        let file = FileConfig { recent: Some(0), ..Default::default() };
        assert!(merge_cli_with_config(&CliOverrides::default(), &file).is_err());
    }
}
