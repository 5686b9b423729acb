//! # sigil
//!
//! Sigil - Comment-driven visual configuration for JavaScript sources.
//!
//! ## Name Origin
//!
//! A **sigil** is a mark inscribed to bind a name to a thing. Sigil's marks
//! are `// @tag` comments that bind a form control to the JavaScript literal
//! below them, so the literal can be read and rewritten without a parser.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "sigil")]
#[command(about = "Comment-driven visual configuration for JavaScript sources", long_about = None)]
#[command(version)]
struct Cli {
    /// Log skipped directives and per-file details to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the controls declared in JavaScript files as JSON
    Parse(commands::parse::ParseArgs),

    /// Give every directive without a hash a fresh one
    Hash(commands::hash::HashArgs),

    /// Write values, keyed by hash, into a file's literals
    Set(commands::set::SetArgs),

    /// Remove every directive line
    Strip(commands::strip::StripArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(None);
    let result = match cli.command {
        Commands::Parse(args) => commands::parse::run(args, &config),
        Commands::Hash(args) => commands::hash::run(args, &config),
        Commands::Set(args) => commands::set::run(args, &config),
        Commands::Strip(args) => commands::strip::run(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();
}
