//! Layout validation command implementation.

use super::CliError;
use pellet::oracle::{BfsOracle, DistanceOracle};
use pellet::sim::Layout;
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the layout cannot be read, fails to parse, or has
/// unreachable food or capsules.
pub(crate) fn execute(layout: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", layout.display());
    println!();

    let layout = Layout::load(&layout)?;
    print_check(
        &format!("parsed {}x{} board", layout.width(), layout.height()),
        true,
    );
    print_check(
        &format!(
            "{} food, {} capsules, {} enemy pawns",
            layout.food().len(),
            layout.capsules().len(),
            layout.pawn_starts().len()
        ),
        true,
    );

    let oracle = BfsOracle::new(layout.width(), layout.height(), layout.walls().clone());
    let start = layout.offense_start();

    let mut unreachable = Vec::new();
    for &cell in layout.food().iter().chain(layout.capsules()) {
        if oracle.maze_distance(start, cell).is_err() {
            unreachable.push(cell);
        }
    }
    print_check("all food and capsules reachable", unreachable.is_empty());
    if !unreachable.is_empty() {
        let cells: Vec<String> = unreachable.iter().map(ToString::to_string).collect();
        return Err(CliError::new(format!(
            "unreachable cells: {}",
            cells.join(", ")
        )));
    }

    let defense_linked = oracle
        .maze_distance(start, layout.defense_start())
        .is_ok();
    print_check("agent starts connected", defense_linked);
    if !defense_linked {
        return Err(CliError::new("agent starts are not connected"));
    }

    println!();
    println!("Layout OK");
    Ok(())
}

fn print_check(label: &str, ok: bool) {
    let mark = if ok { "ok" } else { "FAIL" };
    println!("  [{mark}] {label}");
}
