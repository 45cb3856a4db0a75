//! Goal policies and their fixed evaluation rosters.

use std::collections::HashSet;

use crate::agent::context::AgentContext;
use crate::agent::state::Role;
use crate::agent::{defense, offense};
use crate::grid::Cell;
use crate::nav::Path;
use crate::oracle::{distance_or_sentinel, DistanceOracle};
use crate::snapshot::{EnemyObservation, Observation};

/// Carried pellets needed before the agent heads home to bank them.
pub const FOOD_DEPOSIT_THRESHOLD: u32 = 5;
/// Maze distance at which a threatening enemy triggers fleeing.
pub const FLEE_TRIGGER_RADIUS: u32 = 3;
/// Maze distance within which a vulnerable enemy is worth pursuing.
pub const PURSUIT_RADIUS: u32 = 15;
/// Maze distance within which an unconsumed capsule is worth a detour.
pub const CAPSULE_SEEK_RADIUS: u32 = 5;
/// Maze distance cap on random patrol targets.
pub const PATROL_RADIUS: u32 = 15;
/// Sampling attempts when picking a random target cell.
pub const RANDOM_CANDIDATE_ATTEMPTS: u32 = 50;
/// Consecutive flee plans toward the same cell before falling back to a
/// random reposition target.
pub const FLEE_REPEAT_LIMIT: u32 = 3;

/// One goal policy. Policies are stateless; all memory lives in the
/// [`AgentContext`] they mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Collect enemy-side food.
    SeekFood,
    /// Carry food home and bank it.
    DepositFood,
    /// Detour to a nearby power capsule.
    FindCapsule,
    /// Pursue vulnerable enemies under a capsule advantage.
    Attack,
    /// Retreat from defenders while raiding.
    FleeOffensive,
    /// Patrol home territory and intercept raiders.
    Defend,
    /// Retreat from raiders while vulnerable.
    FleeDefensive,
}

/// Offense roster, evaluated in declaration order every tick.
pub const OFFENSE_ROSTER: [Goal; 5] = [
    Goal::SeekFood,
    Goal::DepositFood,
    Goal::FindCapsule,
    Goal::Attack,
    Goal::FleeOffensive,
];

/// Defense roster, evaluated in declaration order every tick.
pub const DEFENSE_ROSTER: [Goal; 2] = [Goal::Defend, Goal::FleeDefensive];

impl Goal {
    /// Stable policy name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Goal::SeekFood => "seek_food",
            Goal::DepositFood => "deposit_food",
            Goal::FindCapsule => "find_capsule",
            Goal::Attack => "attack",
            Goal::FleeOffensive => "flee_offensive",
            Goal::Defend => "defend",
            Goal::FleeDefensive => "flee_defensive",
        }
    }

    /// Run the policy, mutating agent memory and optionally returning a
    /// rationale string. `None` means the policy declined this tick.
    pub(crate) fn evaluate(
        self,
        ctx: &mut AgentContext,
        obs: &Observation,
        oracle: &dyn DistanceOracle,
    ) -> Option<String> {
        match self {
            Goal::SeekFood => offense::seek_food(ctx, obs, oracle),
            Goal::DepositFood => offense::deposit_food(ctx, obs),
            Goal::FindCapsule => offense::find_capsule(ctx, obs, oracle),
            Goal::Attack => offense::attack(ctx, obs, oracle),
            Goal::FleeOffensive => offense::flee_offensive(ctx, obs, oracle),
            Goal::Defend => defense::defend(ctx, obs, oracle),
            Goal::FleeDefensive => defense::flee_defensive(ctx, obs, oracle),
        }
    }
}

impl Role {
    /// The fixed policy roster this role evaluates every tick.
    #[must_use]
    pub const fn roster(self) -> &'static [Goal] {
        match self {
            Role::Offense => &OFFENSE_ROSTER,
            Role::Defense => &DEFENSE_ROSTER,
        }
    }
}

/// Nearest food cell by authoritative maze distance; list order breaks ties.
pub(crate) fn closest_food(obs: &Observation, oracle: &dyn DistanceOracle) -> Option<Cell> {
    let mut best: Option<(u32, Cell)> = None;
    for &cell in &obs.food {
        let distance = distance_or_sentinel(oracle, obs.position, cell);
        if best.is_none_or(|(known, _)| distance < known) {
            best = Some((distance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// Nearest visible enemy standing on the unsafe side, within `radius`.
pub(crate) fn nearest_unsafe_enemy<'a>(
    ctx: &AgentContext,
    obs: &'a Observation,
    oracle: &dyn DistanceOracle,
    radius: u32,
) -> Option<(Cell, &'a EnemyObservation)> {
    let mut best: Option<(u32, Cell, &EnemyObservation)> = None;
    for enemy in &obs.enemies {
        let Some(cell) = enemy.position else {
            continue;
        };
        if ctx.territory.is_safe_side(cell) {
            continue;
        }
        let distance = distance_or_sentinel(oracle, obs.position, cell);
        if distance > radius {
            continue;
        }
        if best.is_none_or(|(known, _, _)| distance < known) {
            best = Some((distance, cell, enemy));
        }
    }
    best.map(|(_, cell, enemy)| (cell, enemy))
}

/// First visible enemy standing on the safe side, in list order.
pub(crate) fn first_safe_side_enemy<'a>(
    ctx: &AgentContext,
    obs: &'a Observation,
) -> Option<(Cell, &'a EnemyObservation)> {
    obs.enemies.iter().find_map(|enemy| {
        let cell = enemy.position?;
        ctx.territory.is_safe_side(cell).then_some((cell, enemy))
    })
}

/// Shortest route back onto the safe side.
///
/// Candidates are every open cell in the column of the last known safe cell;
/// the candidate with the shortest non-empty path wins. Falls back to the
/// spawn column when the agent has never been safe.
pub(crate) fn nearest_safe_path(
    ctx: &AgentContext,
    obs: &Observation,
    forbidden: Option<&HashSet<Cell>>,
) -> Option<Path> {
    let column = ctx
        .last_safe
        .or(ctx.starting_position)
        .map_or(obs.position.x, |cell| cell.x);

    let mut best: Option<Path> = None;
    for y in 0..ctx.territory.height() {
        let candidate = Cell::new(column, y);
        if obs.walls.contains(&candidate) || !ctx.territory.is_safe_side(candidate) {
            continue;
        }
        let path = Path::plan(obs.position, candidate, &obs.walls, forbidden);
        if path.is_empty() {
            continue;
        }
        if best.as_ref().is_none_or(|known| path.len() < known.len()) {
            best = Some(path);
        }
    }
    best
}

/// Random open safe-side cell with its x inside `range`.
///
/// Samples up to [`RANDOM_CANDIDATE_ATTEMPTS`] candidates, skipping walls,
/// the excluded cell and anything beyond `max_distance` when an oracle cap is
/// supplied. Returns `None` when every attempt fails.
pub(crate) fn random_cell_in(
    ctx: &mut AgentContext,
    obs: &Observation,
    range: std::ops::RangeInclusive<i32>,
    exclude: Option<Cell>,
    cap: Option<(&dyn DistanceOracle, u32)>,
) -> Option<Cell> {
    for _ in 0..RANDOM_CANDIDATE_ATTEMPTS {
        let x = ctx.rng.next_in_range(*range.start(), *range.end());
        let y = ctx.rng.next_in_range(0, ctx.territory.height() - 1);
        let candidate = Cell::new(x, y);

        if obs.walls.contains(&candidate)
            || exclude == Some(candidate)
            || !ctx.territory.is_safe_side(candidate)
        {
            continue;
        }
        if let Some((oracle, max_distance)) = cap
            && distance_or_sentinel(oracle, obs.position, candidate) > max_distance
        {
            continue;
        }
        return Some(candidate);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Move;
    use crate::oracle::BfsOracle;
    use crate::territory::{TeamSide, Territory};

    fn bordered_walls(width: i32, height: i32) -> HashSet<Cell> {
        let mut walls = HashSet::new();
        for x in -1..=width {
            walls.insert(Cell::new(x, -1));
            walls.insert(Cell::new(x, height));
        }
        for y in -1..=height {
            walls.insert(Cell::new(-1, y));
            walls.insert(Cell::new(width, y));
        }
        walls
    }

    fn observation_at(position: Cell, width: i32, height: i32) -> Observation {
        Observation {
            legal_moves: vec![
                Move::North,
                Move::South,
                Move::East,
                Move::West,
                Move::Stop,
            ],
            position,
            is_pacman: false,
            is_scared: false,
            food: Vec::new(),
            enemies: Vec::new(),
            capsules: Vec::new(),
            walls: bordered_walls(width, height),
            score: 0,
        }
    }

    #[test]
    fn test_roster_shapes() {
        assert_eq!(Role::Offense.roster().len(), 5);
        assert_eq!(Role::Defense.roster().len(), 2);
        assert_eq!(Role::Offense.roster()[0], Goal::SeekFood);
        assert_eq!(Role::Defense.roster()[0], Goal::Defend);
    }

    #[test]
    fn test_closest_food_by_maze_distance() {
        let oracle = BfsOracle::new(10, 10, HashSet::new());
        let mut obs = observation_at(Cell::new(0, 0), 10, 10);
        obs.food = vec![Cell::new(5, 5), Cell::new(2, 0), Cell::new(8, 8)];
        assert_eq!(closest_food(&obs, &oracle), Some(Cell::new(2, 0)));
    }

    #[test]
    fn test_closest_food_ties_break_by_list_order() {
        let oracle = BfsOracle::new(10, 10, HashSet::new());
        let mut obs = observation_at(Cell::new(0, 0), 10, 10);
        obs.food = vec![Cell::new(0, 3), Cell::new(3, 0)];
        assert_eq!(closest_food(&obs, &oracle), Some(Cell::new(0, 3)));
    }

    #[test]
    fn test_nearest_safe_path_targets_last_safe_column() {
        let territory = Territory::new(TeamSide::Red, 10, 6);
        let mut ctx = AgentContext::new(Role::Offense, territory, 1);
        ctx.last_safe = Some(Cell::new(4, 2));

        let obs = observation_at(Cell::new(7, 2), 10, 6);
        let path = nearest_safe_path(&ctx, &obs, None).unwrap();
        assert_eq!(path.destination().x, 4);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_random_cell_respects_constraints() {
        let territory = Territory::new(TeamSide::Red, 32, 8);
        let mut ctx = AgentContext::new(Role::Defense, territory, 42);
        let obs = observation_at(Cell::new(5, 4), 32, 8);

        for _ in 0..20 {
            let cell = random_cell_in(&mut ctx, &obs, territory.defend_range(), None, None)
                .expect("open board always yields a candidate");
            assert!(territory.defend_range().contains(&cell.x));
            assert!(territory.is_safe_side(cell));
            assert!(!obs.walls.contains(&cell));
        }
    }

    #[test]
    fn test_random_cell_exclusion() {
        // Width 4 board: Red defend range is 2..=2, height 1, so the only
        // candidate is (2, 0); excluding it must exhaust all attempts.
        let territory = Territory::new(TeamSide::Red, 8, 1);
        let mut ctx = AgentContext::new(Role::Defense, territory, 3);
        let obs = observation_at(Cell::new(1, 0), 8, 1);

        let excluded = Cell::new(2, 0);
        let picked = random_cell_in(
            &mut ctx,
            &obs,
            territory.defend_range(),
            Some(excluded),
            None,
        );
        assert_ne!(picked, Some(excluded));
    }

    #[test]
    fn test_policy_names_are_stable() {
        for goal in OFFENSE_ROSTER.iter().chain(DEFENSE_ROSTER.iter()) {
            assert!(!goal.name().is_empty());
        }
    }
}
