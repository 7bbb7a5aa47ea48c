//! Info command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::utils::{print_verbose_report, SelectionArgs};
use crate::scan::{generate_tree, scan_repository};
use crate::utils::format_file_size;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Repository directory to analyze
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let options = args.selection.scan_options(&args.path, verbose)?;
    let result = scan_repository(&args.path, &options)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    if verbose {
        print_verbose_report(&result);
    }

    println!("Repository: {}", result.repo_name());
    println!("Root: {}", result.root.display());
    if let Some(scope) = &options.scope {
        let labels: Vec<String> = scope.strategies().iter().map(|s| s.label()).collect();
        println!("Scope: {}", labels.join(" OR "));
    }

    let mut languages: BTreeMap<&str, usize> = BTreeMap::new();
    for file in &result.files {
        *languages.entry(file.language.as_deref().unwrap_or("(none)")).or_insert(0) += 1;
    }
    if !languages.is_empty() {
        let mut langs: Vec<_> = languages.into_iter().collect();
        langs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        println!("Languages detected:");
        for (lang, count) in langs {
            println!("  {}: {} files", lang, count);
        }
    }

    let stats = &result.stats;
    println!("Statistics:");
    println!("  Files considered: {}", stats.files_considered);
    println!("  Files included: {}", stats.files_included);
    println!("  Files skipped (scope): {}", stats.files_skipped_scope);
    println!("  Files skipped (pattern): {}", stats.files_skipped_pattern);
    println!("  Files skipped (meta): {}", stats.files_skipped_meta);
    println!("  Files skipped (binary): {}", stats.files_skipped_binary);
    println!("  Files skipped (size): {}", stats.files_skipped_size);
    println!("  Files skipped (unreadable): {}", stats.files_skipped_unreadable);
    println!("  Total size: {}", format_file_size(stats.total_bytes_included));

    let tree =
        generate_tree(&result.repo_name(), result.files.iter().map(|f| f.relative_path.as_str()));
    println!("\n{}", tree);

    Ok(())
}
