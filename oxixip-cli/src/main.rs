//! OxiXIP CLI - The Oxidized XIP compressor
//!
//! A Pure Rust command-line tool for the XIP pair-substitution format.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{CompressOptions, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use oxixip::DEFAULT_OUTPUT_LIMIT;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "oxixip")]
#[command(
    author,
    version,
    about = "The Oxidized XIP compressor - Pure Rust pair-substitution compression"
)]
#[command(long_about = "
OxiXIP compresses files by repeatedly replacing the most frequent byte pair
with an unused byte value, and appends the resulting code table to the output.

Examples:
  oxixip compress document.xml
  oxixip compress a.xml b.xml c.xml
  oxixip compress --compact document.xml -o small.xip
  oxixip decompress document.xml.xip
  oxixip info document.xml.xip --table
  oxixip test *.xip
")]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files to .xip
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (only with a single input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the final single-occurrence substitution
        #[arg(long)]
        compact: bool,

        /// Allocate codes randomly from this seed instead of ascending
        #[arg(long)]
        seed: Option<u64>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a .xip file
    #[command(alias = "d")]
    Decompress {
        /// Artifact to decompress
        file: PathBuf,

        /// Output file (defaults to the input without its .xip extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Refuse to write more than this many bytes
        #[arg(long, default_value_t = DEFAULT_OUTPUT_LIMIT)]
        max_size: usize,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },

    /// Show information about a .xip file
    #[command(alias = "i")]
    Info {
        /// Artifact to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// List the code table records
        #[arg(short, long)]
        table: bool,
    },

    /// Test artifact integrity
    #[command(alias = "t")]
    Test {
        /// Artifacts to test
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report artifacts decoding to more than this many bytes as failed
        #[arg(long, default_value_t = DEFAULT_OUTPUT_LIMIT)]
        max_size: usize,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "oxixip=debug" } else { "oxixip=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            compact,
            seed,
            force,
        } => cmd_compress(
            &files,
            &CompressOptions {
                output,
                compact,
                seed,
                force,
            },
        ),
        Commands::Decompress {
            file,
            output,
            max_size,
            force,
        } => cmd_decompress(&file, output, max_size, force),
        Commands::Info { file, json, table } => cmd_info(&file, json, table),
        Commands::Test { files, max_size } => cmd_test(&files, max_size),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
