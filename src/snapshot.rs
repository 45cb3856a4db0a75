//! Per-tick world snapshot consumed by the decision engine.

use std::collections::HashSet;

use crate::grid::{Cell, Move};

/// What an agent knows about one enemy this tick.
///
/// Position is `None` when the enemy is outside sensor range; all policies
/// ignore unseen enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyObservation {
    /// Observed cell, when within sensor range.
    pub position: Option<Cell>,
    /// Whether the enemy is currently in pawn-vulnerable form on our side of
    /// the board (a raider rather than a defender).
    pub is_pacman: bool,
    /// Remaining scared ticks, when known.
    pub scared_ticks: Option<u32>,
}

impl EnemyObservation {
    /// Whether this enemy can currently be captured without risk.
    #[must_use]
    pub fn is_vulnerable(&self) -> bool {
        self.scared_ticks.is_some_and(|ticks| ticks > 0)
    }
}

/// Immutable snapshot of the world handed to an agent each tick.
#[derive(Debug, Clone)]
pub struct Observation {
    /// Moves the simulation will accept from this cell.
    pub legal_moves: Vec<Move>,
    /// This agent's current cell.
    pub position: Cell,
    /// Whether this agent is in raider form on the enemy side.
    pub is_pacman: bool,
    /// Whether this agent is currently scared.
    pub is_scared: bool,
    /// Remaining enemy-side food cells.
    pub food: Vec<Cell>,
    /// One entry per opposing agent, in a stable order.
    pub enemies: Vec<EnemyObservation>,
    /// Capsule cells still present on the board.
    pub capsules: Vec<Cell>,
    /// Permanent wall cells, border included.
    pub walls: HashSet<Cell>,
    /// Current game score.
    pub score: i32,
}

impl Observation {
    /// Whether the simulation would accept `mv` this tick.
    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves.contains(&mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vulnerability_requires_positive_ticks() {
        let mut enemy = EnemyObservation {
            position: Some(Cell::new(4, 4)),
            is_pacman: false,
            scared_ticks: None,
        };
        assert!(!enemy.is_vulnerable());

        enemy.scared_ticks = Some(0);
        assert!(!enemy.is_vulnerable());

        enemy.scared_ticks = Some(1);
        assert!(enemy.is_vulnerable());
    }

    #[test]
    fn test_legality_check() {
        let obs = Observation {
            legal_moves: vec![Move::North, Move::Stop],
            position: Cell::new(1, 1),
            is_pacman: false,
            is_scared: false,
            food: Vec::new(),
            enemies: Vec::new(),
            capsules: Vec::new(),
            walls: HashSet::new(),
            score: 0,
        };
        assert!(obs.is_legal(Move::North));
        assert!(obs.is_legal(Move::Stop));
        assert!(!obs.is_legal(Move::East));
    }
}
