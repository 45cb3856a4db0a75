//! Pellet CLI - run and inspect grid capture matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Pellet - a goal-driven grid capture agent and match harness
#[derive(Parser, Debug)]
#[command(name = "pellet")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match on a layout
    Run {
        /// Layout file (default: built-in arena)
        #[arg(short, long)]
        layout: Option<std::path::PathBuf>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Ticks to simulate (default: 500)
        #[arg(short, long, default_value = "500")]
        ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the per-agent move log as JSON
        #[arg(long)]
        save_log: Option<std::path::PathBuf>,

        /// Suppress informational output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many matches in parallel and aggregate statistics
    Batch {
        /// Layout file (default: built-in arena)
        #[arg(short, long)]
        layout: Option<std::path::PathBuf>,

        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        matches: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Ticks per match (default: 500)
        #[arg(short, long, default_value = "500")]
        ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Validate a layout file
    Validate {
        /// Layout file to validate
        #[arg(required = true)]
        layout: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            layout,
            seed,
            ticks,
            format,
            save_log,
            quiet,
        } => cli::run::execute(layout, seed, ticks, format, save_log, quiet),

        Commands::Batch {
            layout,
            matches,
            seed,
            threads,
            ticks,
            format,
            progress,
        } => cli::batch::execute(layout, matches, seed, threads, ticks, format, progress),

        Commands::Validate { layout } => cli::validate::execute(layout),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
