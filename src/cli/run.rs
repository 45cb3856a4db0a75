//! Run command implementation.

use super::{CliError, OutputFormat};
use pellet::diagnostics::DiagnosticsStore;
use pellet::sim::{Layout, Match, MatchSummary, DEFAULT_LAYOUT};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the layout cannot be loaded or output cannot be
/// written.
pub(crate) fn execute(
    layout: Option<PathBuf>,
    seed: Option<u64>,
    ticks: u64,
    format: OutputFormat,
    save_log: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let layout = match layout {
        Some(path) => Layout::load(&path)?,
        None => Layout::parse(DEFAULT_LAYOUT)?,
    };

    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(42))
            .unwrap_or(42)
    });

    if !quiet && format == OutputFormat::Text {
        println!("Running match with seed {seed} for {ticks} ticks...");
        println!();
    }

    let mut diag = save_log.is_some().then(DiagnosticsStore::new);
    let summary = Match::new(&layout, seed).run(ticks, diag.as_mut());

    if let (Some(store), Some(path)) = (diag, save_log) {
        store.save(&path)?;
        if !quiet && format == OutputFormat::Text {
            println!("Move log written to {}", path.display());
        }
    }

    match format {
        OutputFormat::Text => print_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn print_summary(summary: &MatchSummary) {
    println!("Match finished after {} ticks", summary.ticks);
    println!("  food banked:    {}", summary.food_banked);
    println!("  food remaining: {}", summary.food_remaining);
    println!("  captures:       {}", summary.captures);
    println!("  offense state:  {}", summary.offense_state);
    println!("  defense state:  {}", summary.defense_state);
}
