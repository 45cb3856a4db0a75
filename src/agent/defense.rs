//! Defense-roster policies.

use std::collections::HashSet;

use crate::agent::context::AgentContext;
use crate::agent::goal::{self, FLEE_TRIGGER_RADIUS, PATROL_RADIUS};
use crate::agent::state::BehavioralState;
use crate::grid::Cell;
use crate::nav::Path;
use crate::oracle::{distance_or_sentinel, DistanceOracle};
use crate::snapshot::Observation;

/// Hold home territory: patrol, and intercept any raider that crosses over.
pub(crate) fn defend(
    ctx: &mut AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<String> {
    if ctx.state != BehavioralState::Defending {
        return None;
    }

    // Fresh from spawn: move out to a patrol post before anything else.
    if ctx.territory.is_in_spawn(obs.position) && !ctx.has_unfinished_path() {
        let range = ctx.territory.defend_range();
        if let Some(post) = goal::random_cell_in(ctx, obs, range, None, None) {
            ctx.path = Some(Path::plan(obs.position, post, &obs.walls, None));
            return Some(format!("leaving spawn for patrol post {post}"));
        }
        return Some("leaving spawn, no patrol post found".to_owned());
    }

    // Pushed across the boundary: get back onto the safe side.
    if !ctx.territory.is_safe_side(obs.position) {
        if !ctx.has_unfinished_path() {
            ctx.path = goal::nearest_safe_path(ctx, obs, None);
        }
        return Some("outside home territory, returning".to_owned());
    }

    if let Some((cell, _)) = goal::first_safe_side_enemy(ctx, obs) {
        if obs.is_scared {
            let forbidden: HashSet<Cell> = [cell].into_iter().collect();
            ctx.path = goal::nearest_safe_path(ctx, obs, Some(&forbidden));
            return Some(format!("scared, avoiding raider at {cell}"));
        }
        // Continuous interception: replan toward the raider every tick.
        ctx.path = Some(Path::plan(obs.position, cell, &obs.walls, None));
        return Some(format!("intercepting raider at {cell}"));
    }

    if !ctx.has_unfinished_path() {
        let range = ctx.territory.defend_range();
        if let Some(post) = goal::random_cell_in(ctx, obs, range, None, Some((oracle, PATROL_RADIUS)))
        {
            ctx.path = Some(Path::plan(obs.position, post, &obs.walls, None));
            return Some(format!("patrolling toward {post}"));
        }
    }

    None
}

/// Retreat from a menacing enemy on the safe side.
pub(crate) fn flee_defensive(
    ctx: &mut AgentContext,
    obs: &Observation,
    oracle: &dyn DistanceOracle,
) -> Option<String> {
    let threat = obs.enemies.iter().find_map(|enemy| {
        let cell = enemy.position?;
        if enemy.is_pacman || !ctx.territory.is_safe_side(cell) {
            return None;
        }
        (distance_or_sentinel(oracle, obs.position, cell) <= FLEE_TRIGGER_RADIUS).then_some(cell)
    });

    if ctx.state == BehavioralState::DefensiveFleeing {
        if threat.is_none() && !ctx.has_unfinished_path() {
            ctx.revert_state();
            ctx.path = None;
            return Some("threat gone, resuming defense".to_owned());
        }
        if let Some(cell) = threat
            && !ctx.has_unfinished_path()
        {
            let forbidden: HashSet<Cell> = [cell].into_iter().collect();
            ctx.path = goal::nearest_safe_path(ctx, obs, Some(&forbidden));
            return Some(format!("still menaced by {cell}, extending retreat"));
        }
        return None;
    }

    let cell = threat?;
    ctx.set_state(BehavioralState::DefensiveFleeing);
    let forbidden: HashSet<Cell> = [cell].into_iter().collect();
    ctx.path = goal::nearest_safe_path(ctx, obs, Some(&forbidden));
    Some(format!("menaced by enemy at {cell}, retreating"))
}
