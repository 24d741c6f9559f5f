mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    block, init, kinds, page, render, revisions, BlockCommand, InitArgs, KindsArgs, PageCommand,
    RenderArgs, RevisionsCommand,
};
use tracing_subscriber::EnvFilter;

/// Mosaic CLI - block-based pages for a personal site
#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log library activity (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Mosaic site
    Init(InitArgs),

    /// List the available block kinds
    Kinds(KindsArgs),

    /// Create, list, publish and delete pages
    Page {
        #[command(subcommand)]
        command: PageCommand,
    },

    /// Edit the blocks of a page
    Block {
        #[command(subcommand)]
        command: BlockCommand,
    },

    /// Render a page to HTML
    Render(RenderArgs),

    /// Inspect and restore page revisions
    Revisions {
        #[command(subcommand)]
        command: RevisionsCommand,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Kinds(args) => kinds(args),
            Command::Page { command } => page(command, &cwd),
            Command::Block { command } => block(command, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Revisions { command } => revisions(command, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
