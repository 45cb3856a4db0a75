//! Batch command implementation.

use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use pellet::sim::{Layout, Match, MatchSummary, DEFAULT_LAYOUT};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Aggregated statistics over a batch of matches.
#[derive(Debug, Clone, Serialize)]
struct BatchStats {
    matches: u64,
    total_banked: u64,
    total_captures: u64,
    food_cleared_matches: u64,
    best_banked: u32,
}

impl BatchStats {
    const fn new() -> Self {
        Self {
            matches: 0,
            total_banked: 0,
            total_captures: 0,
            food_cleared_matches: 0,
            best_banked: 0,
        }
    }

    fn add(&mut self, summary: &MatchSummary) {
        self.matches += 1;
        self.total_banked += u64::from(summary.food_banked);
        self.total_captures += u64::from(summary.captures);
        if summary.food_remaining == 0 {
            self.food_cleared_matches += 1;
        }
        self.best_banked = self.best_banked.max(summary.food_banked);
    }

    fn merge(mut self, other: Self) -> Self {
        self.matches += other.matches;
        self.total_banked += other.total_banked;
        self.total_captures += other.total_captures;
        self.food_cleared_matches += other.food_cleared_matches;
        self.best_banked = self.best_banked.max(other.best_banked);
        self
    }
}

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the layout cannot be loaded.
pub(crate) fn execute(
    layout: Option<PathBuf>,
    matches: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    ticks: u64,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let layout = match layout {
        Some(path) => Layout::load(&path)?,
        None => Layout::parse(DEFAULT_LAYOUT)?,
    };

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(42))
            .unwrap_or(42)
    });

    let pb = if progress {
        let pb = ProgressBar::new(matches);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})",
                )
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own BatchStats, merged at the end.
    let stats = (0..matches)
        .into_par_iter()
        .fold(BatchStats::new, |mut local, i| {
            let match_seed = base_seed.wrapping_add(i);
            let summary = Match::new(&layout, match_seed).run(ticks, None);
            local.add(&summary);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(BatchStats::new, BatchStats::merge);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let elapsed = start.elapsed();

    match format {
        OutputFormat::Text => {
            println!("Batch of {} matches in {:.2}s", stats.matches, elapsed.as_secs_f64());
            println!("  total food banked: {}", stats.total_banked);
            println!("  total captures:    {}", stats.total_captures);
            println!("  boards cleared:    {}", stats.food_cleared_matches);
            println!("  best single match: {} banked", stats.best_banked);
            #[allow(clippy::cast_precision_loss)]
            let mean = stats.total_banked as f64 / stats.matches.max(1) as f64;
            println!("  mean banked:       {mean:.2}");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}
