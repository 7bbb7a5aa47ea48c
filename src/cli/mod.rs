//! Command-line interface for repo2md
//!
//! Provides `export`, `info`, `pr` and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod export;
mod info;
mod pr;
mod utils;

/// Export a git repository as a single Markdown document
#[derive(Parser)]
#[command(name = "repo2md")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose file report and DEBUG logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the selected files as Markdown
    Export(Box<export::ExportArgs>),

    /// Show what an export would contain without rendering it
    Info(info::InfoArgs),

    /// Render the current branch's changes against a target branch for review
    Pr(Box<pr::PrArgs>),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// A non-empty RUST_LOG replaces the built-in level; otherwise `--verbose` selects DEBUG over WARN.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    match rust_log.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None if verbose => EnvFilter::default().add_directive(Level::DEBUG.into()),
        None => EnvFilter::default().add_directive(Level::WARN.into()),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), cli.verbose);
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Export(args) => export::run(*args, cli.verbose),
        Commands::Info(args) => info::run(args, cli.verbose),
        Commands::Pr(args) => pr::run(*args, cli.verbose),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
