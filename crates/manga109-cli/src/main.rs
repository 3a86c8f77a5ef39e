mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "manga109",
    version,
    about = "Read Manga109 annotations and resolve page images"
)]
struct Cli {
    /// Dataset root (the directory containing books.txt)
    #[arg(long, global = true, env = "MANGA109_ROOT", default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the books in the manifest
    Books,
    /// Parse a book's annotation into structured data
    Parse {
        /// Book title as listed in books.txt
        book: String,

        /// Region layout: tagged (default) or flat
        #[arg(short, long, default_value = "tagged")]
        mode: String,

        /// Annotation subdirectory under the dataset root
        #[arg(long, default_value = "annotations")]
        annotation_type: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the image path of a page
    ImgPath {
        book: String,
        index: i64,
    },
    /// List the regions that would be cropped out of page images
    Crops {
        book: String,

        /// Region kind: frame, face, body, text or an extension tag
        #[arg(short, long)]
        kind: String,

        /// Number of leading pages to scan
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Skip regions smaller than half this size in either dimension
        #[arg(long, default_value_t = 128)]
        size: i64,

        /// Annotation subdirectory under the dataset root
        #[arg(long, default_value = "annotations")]
        annotation_type: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let root = cli.root;

    let result = match cli.command {
        Commands::Books => commands::books::run(&root),
        Commands::Parse {
            book,
            mode,
            annotation_type,
            output,
            out,
        } => commands::parse::run(&root, &book, &mode, annotation_type, &output, out),
        Commands::ImgPath { book, index } => commands::img_path::run(&root, &book, index),
        Commands::Crops {
            book,
            kind,
            pages,
            size,
            annotation_type,
            output,
        } => commands::crops::run(&root, book, kind, pages, size, annotation_type, &output),
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
