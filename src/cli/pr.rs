//! PR review command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::export::output_file;
use super::utils::{print_verbose_report, FilterArgs};
use crate::git::pr_context;
use crate::output::{handle_output, OutputTargets};
use crate::render::generate_pr_markdown;
use crate::scan::scan_repository;
use crate::scope::ScopeConfig;
use crate::utils::format_megabytes;

#[derive(Args, Debug)]
pub struct PrArgs {
    /// Repository directory on the branch under review
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Branch to compare against [default: origin's default branch, else main or master]
    #[arg(short, long, value_name = "BRANCH")]
    pub target: Option<String>,

    /// Write the review document to this file [bare flag: <repo>_export.md]
    #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
    pub output: Option<Option<PathBuf>>,

    /// Copy the review document to the clipboard
    #[arg(short, long)]
    pub clipboard: bool,

    /// Print the review document to stdout (default when no other output is given)
    #[arg(short, long)]
    pub stdout: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// The scope is always the branch's changed files; scope criteria from the
/// defaults file do not apply here.
pub fn run(args: PrArgs, verbose: bool) -> Result<()> {
    let mut options = args.filter.scan_options(&args.path, verbose)?;

    let context = pr_context(&args.path, args.target.as_deref())
        .with_context(|| format!("Failed to compare branches in {}", args.path.display()))?;
    eprintln!(
        "Comparing {} against {} ({} commit(s), {} changed file(s))",
        context.current_branch,
        context.target_branch,
        context.commit_count,
        context.changed_files.len()
    );

    options.scope = Some(ScopeConfig {
        branch_target: Some(context.target_branch.clone()),
        ..Default::default()
    });
    let result = scan_repository(&args.path, &options)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    if verbose {
        print_verbose_report(&result);
    }

    let markdown = generate_pr_markdown(&context, &result);
    let targets = OutputTargets {
        file: output_file(&args.path, args.output.as_ref()),
        clipboard: args.clipboard,
        stdout: args.stdout,
    };
    handle_output(&markdown, &targets)?;

    eprintln!(
        "Processed {} files ({} MB)",
        result.files.len(),
        format_megabytes(result.total_size)
    );
    Ok(())
}
