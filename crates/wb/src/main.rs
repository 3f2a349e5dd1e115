//! Website builder CLI.
//!
//! Provides commands for:
//! - `list`, `search`, `show`: browse stored sites
//! - `create`, `update`, `delete`: change the site collection
//! - `export`: write the dashboard CSV

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CreateArgs, DeleteArgs, ExportArgs, GlobalArgs, ListArgs, SearchArgs, ShowArgs, UpdateArgs,
};
use output::Output;

/// Website builder - manage generated sites.
#[derive(Parser)]
#[command(name = "wb", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sites, optionally filtered by status and sorted.
    List(ListArgs),
    /// Search sites by title or slug.
    Search(SearchArgs),
    /// Show a site by slug.
    Show(ShowArgs),
    /// Create a site.
    Create(CreateArgs),
    /// Update fields of a site.
    Update(UpdateArgs),
    /// Delete a site.
    Delete(DeleteArgs),
    /// Export sites as CSV.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = cli.global.open().and_then(|ctx| match cli.command {
        Commands::List(args) => args.execute(&ctx),
        Commands::Search(args) => args.execute(&ctx),
        Commands::Show(args) => args.execute(&ctx),
        Commands::Create(args) => args.execute(&ctx),
        Commands::Update(args) => args.execute(&ctx),
        Commands::Delete(args) => args.execute(&ctx),
        Commands::Export(args) => args.execute(&ctx),
    });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
