//! Output rendering (Markdown document, branch review document, JSON scan report)

pub mod markdown;
pub mod pr;
pub mod report;

pub use markdown::generate_markdown;
pub use pr::generate_pr_markdown;
pub use report::write_report;
