//! Export command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::utils::{print_verbose_report, SelectionArgs};
use crate::output::{default_output_filename, handle_output, OutputTargets};
use crate::render::{generate_markdown, write_report};
use crate::scan::{scan_repository, ScanOptions};
use crate::utils::format_megabytes;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Repository directory to export
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Write the Markdown document to this file [bare flag: <repo>_export.md]
    #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
    pub output: Option<Option<PathBuf>>,

    /// Copy the Markdown document to the clipboard
    #[arg(short, long)]
    pub clipboard: bool,

    /// Print the Markdown document to stdout (default when no other output is given)
    #[arg(short, long)]
    pub stdout: bool,

    /// Also write a JSON scan report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn run(args: ExportArgs, verbose: bool) -> Result<()> {
    let start = Instant::now();
    let options = args.selection.scan_options(&args.path, verbose)?;

    eprintln!("Scanning repository...");
    let result = scan_repository(&args.path, &options)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    if verbose {
        print_verbose_report(&result);
    }

    eprintln!("Generating markdown...");
    let markdown = generate_markdown(&result);

    let targets = OutputTargets {
        file: output_file(&args.path, args.output.as_ref()),
        clipboard: args.clipboard,
        stdout: args.stdout,
    };
    handle_output(&markdown, &targets)?;

    if let Some(report_path) = &args.report {
        write_report(report_path, &result, &options_value(&options), true)?;
        eprintln!("Report written to: {}", report_path.display());
    }

    eprintln!(
        "Processed {} files ({} MB)",
        result.files.len(),
        format_megabytes(result.total_size)
    );
    tracing::debug!("Export finished in {:.2?}", start.elapsed());
    Ok(())
}

/// A bare `--output` names the file after the repository directory.
pub(super) fn output_file(root: &Path, output: Option<&Option<PathBuf>>) -> Option<PathBuf> {
    output.map(|file| file.clone().unwrap_or_else(|| default_output_filename(root)))
}

fn options_value(options: &ScanOptions) -> serde_json::Value {
    json!({
        "exclude_patterns": options.exclude_patterns,
        "exclude_meta_files": options.exclude_meta_files,
        "include_meta": options.include_meta,
        "max_file_size": options.max_file_size,
        "scope": options.scope,
    })
}
