//! txtepub CLI - Convert plain-text manuscripts into EPUB books

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "txtepub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a text manuscript to EPUB
    Convert {
        /// Manuscript file (UTF-8)
        input: PathBuf,

        #[command(flatten)]
        book: commands::BookArgs,
    },

    /// Show how a manuscript segments into front matter, sub-books and chapters
    Inspect {
        /// Manuscript file (UTF-8)
        input: PathBuf,

        /// Book configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Group chapters into sub-books
        #[arg(long)]
        multi_book: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the container structure of an EPUB file
    Check {
        /// EPUB file path
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "txtepub_cli=debug,txtepub_core=debug"
    } else {
        "txtepub_cli=info,txtepub_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert { input, book } => commands::convert(&input, &book),

        Commands::Inspect {
            input,
            config,
            multi_book,
            json,
        } => commands::inspect(&input, config.as_deref(), multi_book, json),

        Commands::Check { input } => commands::check(&input),
    }
}
