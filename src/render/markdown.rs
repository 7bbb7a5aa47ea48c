//! Markdown document generation.

use crate::domain::{RepositoryFile, ScanResult};
use crate::scan::generate_tree;
use crate::utils::format_file_size;

/// Render `result` as one Markdown document.
///
/// Pure function of the scan result: a summary block, the tree of selected
/// files, then one fenced section per file in scan order.
pub fn generate_markdown(result: &ScanResult) -> String {
    let mut out = String::new();
    let repo_name = result.repo_name();

    out.push_str(&format!("# {}\n\n", repo_name));

    out.push_str("## Repository Summary\n\n");
    out.push_str(&format!("**Files:** {}\n", result.files.len()));
    out.push_str(&format!("**Total Size:** {}\n", format_file_size(result.total_size)));
    out.push_str(&format!("**Root:** `{}`\n\n", result.root.display()));

    out.push_str("## File Structure\n\n");
    let tree = generate_tree(&repo_name, result.files.iter().map(|f| f.relative_path.as_str()));
    out.push_str("```\n");
    out.push_str(&tree);
    out.push_str("\n```\n\n");

    out.push_str("## File Contents\n\n");
    for file in &result.files {
        render_file(&mut out, file);
    }

    out
}

pub(crate) fn render_file(out: &mut String, file: &RepositoryFile) {
    let fence = fence_for(&file.content);
    out.push_str(&format!("### {}\n\n", file.relative_path));
    out.push_str(&fence);
    if let Some(lang) = &file.language {
        out.push_str(lang);
    }
    out.push('\n');
    out.push_str(&file.content);
    if !file.content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push_str("\n\n");
}

/// Three backticks, or one more than the longest backtick run in `content`.
pub(crate) fn fence_for(content: &str) -> String {
    let mut longest = 0usize;
    let mut current = 0usize;
    for c in content.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
