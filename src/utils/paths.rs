//! Path and size formatting

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Forward slashes on every platform
    path.replace('\\', "/")
}

/// `path` relative to `root` with `/` separators, or the full path when it
/// lies outside `root`.
pub fn relative_path_string(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    normalize_path(&rel.to_string_lossy())
}

/// Human-readable byte count: `512 B`, `1.5 KB`, `2.00 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.2} MB", b / MB)
    } else {
        format!("{:.2} GB", b / GB)
    }
}

/// Megabytes with two decimals, as used by the summary line.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / (1024.0 * 1024.0))
}
