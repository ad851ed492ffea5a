//! hymark CLI - static-site builder.
//!
//! Provides commands for:
//! - `build`: Render every matching source file into the output directory
//! - `render`: Render a single document to standard output

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RenderArgs};
use error::CliError;
use output::Output;

/// hymark - Markdown and HTML through templates into a static site.
#[derive(Parser)]
#[command(name = "hymark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site.
    Build(BuildArgs),
    /// Render one document to standard output.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    match command {
        Commands::Build(args) => rt.block_on(args.execute()),
        Commands::Render(args) => rt.block_on(args.execute()),
    }
}
