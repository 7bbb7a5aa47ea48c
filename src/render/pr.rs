//! Review document for the current branch.

use super::markdown::{fence_for, render_file};
use crate::domain::ScanResult;
use crate::git::PrContext;
use crate::utils::format_file_size;

/// Render a review document: branch summary, the patch, then the content of
/// every changed file that survived the scan filters.
pub fn generate_pr_markdown(context: &PrContext, result: &ScanResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# PR Review: {} → {}\n\n",
        context.current_branch, context.target_branch
    ));

    out.push_str("## Summary\n\n");
    out.push_str(&format!("**Repository:** {}\n", result.repo_name()));
    out.push_str(&format!("**Branch:** `{}`\n", context.current_branch));
    out.push_str(&format!("**Target:** `{}`\n", context.target_branch));
    out.push_str(&format!("**Commits:** {}\n", context.commit_count));
    out.push_str(&format!("**Files Changed:** {}\n", context.changed_files.len()));
    out.push_str(&format!(
        "**Files Included:** {} ({})\n\n",
        result.files.len(),
        format_file_size(result.total_size)
    ));

    out.push_str("## Diff\n\n");
    if context.diff.is_empty() {
        out.push_str(&format!("No changes against `{}`.\n\n", context.target_branch));
    } else {
        let fence = fence_for(&context.diff);
        out.push_str(&format!("{}diff\n", fence));
        out.push_str(&context.diff);
        if !context.diff.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&fence);
        out.push_str("\n\n");
    }

    out.push_str("## Changed Files\n\n");
    for file in &result.files {
        render_file(&mut out, file);
    }

    out
}
