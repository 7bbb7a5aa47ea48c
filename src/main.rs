//! repo2md: export a git repository as a single Markdown document

use anyhow::Result;

fn main() -> Result<()> {
    repo2md::cli::run()
}
