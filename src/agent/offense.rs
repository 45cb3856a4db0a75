//! Offense-roster policies.

use std::collections::HashSet;

use crate::agent::context::AgentContext;
use crate::agent::goal::{
    self, CAPSULE_SEEK_RADIUS, FLEE_REPEAT_LIMIT, FLEE_TRIGGER_RADIUS, FOOD_DEPOSIT_THRESHOLD,
    PURSUIT_RADIUS,
};
use crate::agent::state::BehavioralState;
use crate::grid::Cell;
use crate::nav::Path;
use crate::oracle::{distance_or_sentinel, DistanceOracle};
use crate::snapshot::Observation;

/// Collect enemy-side food; the stable base behavior of the offense role.
pub(crate) fn seek_food(
    ctx: &mut AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<String> {
    if !matches!(
        ctx.state,
        BehavioralState::SeekingFood | BehavioralState::DepositingFood | BehavioralState::Attacking
    ) {
        return None;
    }

    // An active hunt outranks food collection.
    if ctx.state == BehavioralState::Attacking && ctx.has_unfinished_path() {
        return None;
    }

    let mut notes = Vec::new();

    // Consumption shows up one tick after arrival: the cell we stand on was
    // food in the previous snapshot.
    if ctx.previous_food.contains(&obs.position) && !obs.food.contains(&obs.position) {
        ctx.carried_food += 1;
        notes.push(format!(
            "ate pellet at {} (carrying {})",
            obs.position, ctx.carried_food
        ));
    }

    if obs.food.is_empty() {
        // Already home with nothing left to collect: stand down rather than
        // planning a path onto the cell we occupy.
        if !ctx.territory.is_safe_side(obs.position) && !ctx.has_unfinished_path() {
            ctx.path = goal::nearest_safe_path(ctx, obs, None);
            notes.push("no food left, heading home".to_owned());
        }
        return if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        };
    }

    let nearest = goal::closest_food(obs, oracle)?;
    if ctx.state != BehavioralState::DepositingFood
        && ctx.carried_food >= FOOD_DEPOSIT_THRESHOLD
        && distance_or_sentinel(oracle, obs.position, nearest) >= 2
    {
        ctx.set_state(BehavioralState::DepositingFood);
        notes.push(format!("carrying {}, heading home to bank", ctx.carried_food));
        return Some(notes.join("; "));
    }

    if ctx.state != BehavioralState::DepositingFood && !ctx.has_unfinished_path() {
        ctx.path = Some(Path::plan(obs.position, nearest, &obs.walls, None));
        notes.push(format!("planning toward food at {nearest}"));
    }

    if notes.is_empty() {
        None
    } else {
        Some(notes.join("; "))
    }
}

/// Carry food home and bank it by crossing onto the safe side.
pub(crate) fn deposit_food(ctx: &mut AgentContext, obs: &Observation) -> Option<String> {
    if ctx.state != BehavioralState::DepositingFood {
        return None;
    }

    if ctx.territory.is_safe_side(obs.position) {
        let banked = ctx.carried_food;
        ctx.carried_food = 0;
        ctx.path = None;
        ctx.set_state(BehavioralState::SeekingFood);
        return Some(format!("banked {banked} pellets, resuming collection"));
    }

    if !ctx.has_unfinished_path() {
        ctx.path = goal::nearest_safe_path(ctx, obs, None);
        return Some(format!(
            "carrying {} pellets, retreating to safe side",
            ctx.carried_food
        ));
    }

    None
}

/// Detour to a nearby unconsumed capsule.
pub(crate) fn find_capsule(
    ctx: &mut AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<String> {
    if ctx.state == BehavioralState::Attacking {
        return None;
    }

    if ctx.state == BehavioralState::FindingCapsule {
        // The detour ends when the targeted capsule stops being worth
        // walking to: consumed, vanished, or the route fully walked.
        let target_live = ctx.path.as_ref().is_some_and(|path| {
            let cell = path.destination();
            ctx.capsules
                .iter()
                .any(|record| !record.is_consumed() && record.position() == cell)
        });
        if target_live && ctx.has_unfinished_path() {
            return None;
        }
        let resume = if ctx.previous_state.is_transient() {
            ctx.role.base_state()
        } else {
            ctx.previous_state
        };
        ctx.set_state(resume);
        ctx.path = None;
        return Some("capsule detour over, resuming".to_owned());
    }

    let target = ctx.capsules.iter().find_map(|record| {
        if record.is_consumed() {
            return None;
        }
        let cell = record.position();
        (distance_or_sentinel(oracle, obs.position, cell) <= CAPSULE_SEEK_RADIUS).then_some(cell)
    })?;

    ctx.set_state(BehavioralState::FindingCapsule);
    ctx.path = Some(Path::plan(obs.position, target, &obs.walls, None));
    Some(format!("capsule within reach at {target}"))
}

/// Pursue the nearest vulnerable enemy while a capsule advantage is active.
pub(crate) fn attack(
    ctx: &mut AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<String> {
    if ctx.state != BehavioralState::Attacking {
        return None;
    }

    // The advantage outlasts target visibility: with nobody in pursuit
    // range the capsule countdown, not this policy, ends Attacking, and
    // food seeking continues in the meantime.
    let (cell, enemy) = goal::nearest_unsafe_enemy(ctx, obs, oracle, PURSUIT_RADIUS)?;

    if !enemy.is_vulnerable() {
        ctx.set_state(BehavioralState::OffensiveFleeing);
        let forbidden: HashSet<Cell> = [cell].into_iter().collect();
        ctx.path = goal::nearest_safe_path(ctx, obs, Some(&forbidden));
        return Some(format!("target at {cell} recovered, breaking off"));
    }

    // Continuous pursuit: replan toward the target's current cell every tick.
    ctx.path = Some(Path::plan(obs.position, cell, &obs.walls, None));
    Some(format!("pursuing vulnerable enemy at {cell}"))
}

/// Retreat from a defender while raiding the unsafe side.
pub(crate) fn flee_offensive(
    ctx: &mut AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<String> {
    let threat = nearest_threat(ctx, obs, oracle);

    if ctx.state == BehavioralState::OffensiveFleeing {
        let Some(threat) = threat else {
            let resume = if ctx.previous_state == BehavioralState::Attacking {
                BehavioralState::SeekingFood
            } else {
                ctx.previous_state
            };
            ctx.set_state(resume);
            ctx.path = None;
            ctx.last_flee_target = None;
            ctx.flee_repeats = 0;
            return Some("threat cleared, resuming".to_owned());
        };

        if ctx.has_unfinished_path() {
            return None;
        }
        return Some(plan_retreat(ctx, obs, threat));
    }

    let threat = threat?;
    if ctx.state == BehavioralState::Defending {
        return None;
    }

    ctx.set_state(BehavioralState::OffensiveFleeing);
    Some(plan_retreat(ctx, obs, threat))
}

/// Nearest threatening enemy on the unsafe side: visible, in defender form,
/// not vulnerable, within the flee trigger radius.
fn nearest_threat(
    ctx: &AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<Cell> {
    let mut best: Option<(u32, Cell)> = None;
    for enemy in &obs.enemies {
        let Some(cell) = enemy.position else {
            continue;
        };
        if enemy.is_pacman || enemy.is_vulnerable() || ctx.territory.is_safe_side(cell) {
            continue;
        }
        let distance = distance_or_sentinel(oracle, obs.position, cell);
        if distance > FLEE_TRIGGER_RADIUS {
            continue;
        }
        if best.is_none_or(|(known, _)| distance < known) {
            best = Some((distance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// Plan a retreat away from `threat`, falling back to a random reposition
/// target when the retreat keeps landing on the same cell or no route exists.
fn plan_retreat(ctx: &mut AgentContext, obs: &Observation, threat: Cell) -> String {
    let forbidden: HashSet<Cell> = [threat].into_iter().collect();
    let retreat = goal::nearest_safe_path(ctx, obs, Some(&forbidden));

    let repeating = retreat.as_ref().is_some_and(|path| {
        ctx.last_flee_target == Some(path.destination()) && ctx.flee_repeats >= FLEE_REPEAT_LIMIT
    });

    if let Some(path) = retreat
        && !repeating
    {
        let destination = path.destination();
        if ctx.last_flee_target == Some(destination) {
            ctx.flee_repeats += 1;
        } else {
            ctx.last_flee_target = Some(destination);
            ctx.flee_repeats = 1;
        }
        ctx.path = Some(path);
        return format!("fleeing defender at {threat} toward {destination}");
    }

    // Oscillation breaker: pick a random reachable reposition cell, never the
    // cell just vacated.
    let range = ctx.territory.reposition_range();
    let vacated = ctx.previous_position;
    let target = goal::random_cell_in(ctx, obs, range, vacated, None);
    ctx.last_flee_target = None;
    ctx.flee_repeats = 0;
    match target {
        Some(cell) => {
            ctx.path = Some(Path::plan(obs.position, cell, &obs.walls, None));
            format!("fleeing defender at {threat} via reposition cell {cell}")
        }
        None => {
            ctx.path = None;
            format!("fleeing defender at {threat}, no retreat found")
        }
    }
}
