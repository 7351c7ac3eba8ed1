//! Memgrid CLI - replay, generate and validate memory-grid games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Memgrid - A deterministic memory-grid round engine
#[derive(Parser, Debug)]
#[command(name = "memgrid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded game and print the results
    Run {
        /// Recording file (JSON)
        #[arg(required = true)]
        recording: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Stop after this many rounds (default: all)
        #[arg(short, long)]
        round: Option<usize>,

        /// Override the recording's rules with a JSON rules file
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Generate an initial grid as JSON
    Generate {
        /// Number of cells (multiple of 4)
        #[arg(short, long, default_value = "64")]
        cells: usize,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Probability that a cell is SYSTEM
        #[arg(long, default_value = "0.1")]
        system: f64,

        /// Probability that a non-system cell starts CORRUPT
        #[arg(long, default_value = "0.05")]
        corrupt: f64,
    },

    /// Replay a recording and check game invariants after every round
    Validate {
        /// Recording file (JSON)
        #[arg(required = true)]
        recording: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            recording,
            format,
            round,
            rules,
        } => cli::run::execute(recording, format, round, rules),

        Commands::Generate {
            cells,
            seed,
            system,
            corrupt,
        } => cli::generate::execute(cells, seed, system, corrupt),

        Commands::Validate { recording } => cli::validate::execute(recording),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
