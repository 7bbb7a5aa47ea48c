//! Output destinations for the generated document

mod clipboard;

pub use clipboard::{copy_to_clipboard, ClipboardError};

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the document goes. Destinations combine; none at all means stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTargets {
    pub file: Option<PathBuf>,
    pub clipboard: bool,
    pub stdout: bool,
}

impl OutputTargets {
    /// Apply the stdout default when no destination was requested.
    pub fn resolved(&self) -> Self {
        let mut targets = self.clone();
        if targets.file.is_none() && !targets.clipboard && !targets.stdout {
            targets.stdout = true;
        }
        targets
    }
}

/// Deliver `content` to every requested destination.
///
/// Status messages go to stderr so stdout carries only the document.
pub fn handle_output(content: &str, targets: &OutputTargets) -> Result<()> {
    handle_output_to(content, targets, &mut std::io::stdout().lock())
}

fn handle_output_to<W: Write>(content: &str, targets: &OutputTargets, out: &mut W) -> Result<()> {
    let targets = targets.resolved();

    if let Some(path) = &targets.file {
        write_file(path, content)?;
        eprintln!("Markdown exported to: {}", path.display());
    }

    if targets.clipboard {
        copy_to_clipboard(content).context("Failed to copy to clipboard")?;
        eprintln!("Markdown copied to clipboard");
    }

    if targets.stdout {
        out.write_all(content.as_bytes()).context("Failed to write to stdout")?;
        if !content.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        out.flush()?;
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Error writing to file {}", path.display()))
}

/// `<root name>_export.md`, relative to the current directory.
pub fn default_output_filename(root: &Path) -> PathBuf {
    let name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .or_else(|| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "repository".to_string());
    PathBuf::from(format!("{}_export.md", name))
}
