//! The per-tick decision loop tying policies, paths and capsules together.

use serde::Serialize;

use crate::agent::context::AgentContext;
use crate::agent::state::{BehavioralState, Role};
use crate::capsule::{CapsuleRecord, CapsuleTick, CAPSULE_EAT_RADIUS};
use crate::diagnostics::AgentId;
use crate::grid::Move;
use crate::oracle::DistanceOracle;
use crate::snapshot::Observation;
use crate::territory::Territory;

/// Why a policy acted this tick, for diagnostics output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rationale {
    /// Stable policy name.
    pub goal: &'static str,
    /// Human-readable explanation of what the policy did.
    pub detail: String,
}

/// The outcome of one decision tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Move handed to the simulation.
    pub action: Move,
    /// Behavioral state after policy evaluation.
    pub state: BehavioralState,
    /// One entry per policy that acted, in roster order.
    pub rationales: Vec<Rationale>,
}

/// Goal-driven decision engine for one agent.
///
/// Owns all cross-tick memory; callers feed it one [`Observation`] per tick
/// and receive a [`Decision`]. Never panics and never errors: every failure
/// inside a tick degrades to a Stop move.
#[derive(Debug)]
pub struct Interpreter<O> {
    id: AgentId,
    oracle: O,
    ctx: AgentContext,
    tick: u64,
}

impl<O: DistanceOracle> Interpreter<O> {
    /// Create an agent with a fixed role on the given territory.
    #[must_use]
    pub fn new(id: AgentId, role: Role, territory: Territory, oracle: O, seed: u64) -> Self {
        Self {
            id,
            oracle,
            ctx: AgentContext::new(role, territory, seed),
            tick: 0,
        }
    }

    /// Identifier used in diagnostics output.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The role this agent was constructed with.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.ctx.role
    }

    /// Current behavioral state.
    #[must_use]
    pub const fn state(&self) -> BehavioralState {
        self.ctx.state
    }

    /// Pellets eaten but not yet banked.
    #[must_use]
    pub const fn carried_food(&self) -> u32 {
        self.ctx.carried_food
    }

    /// Decision ticks processed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Run one decision tick.
    pub fn decide(&mut self, obs: &Observation) -> Decision {
        self.tick += 1;

        if self.ctx.starting_position.is_none() {
            self.ctx.starting_position = Some(obs.position);
        }

        // A jump of more than one cell means the simulation teleported us
        // back to spawn after a capture.
        if self
            .ctx
            .previous_position
            .is_some_and(|prev| obs.position.manhattan(prev) > 1)
        {
            self.ctx.reset_trip_state();
        }

        if self.ctx.territory.is_safe_side(obs.position) {
            self.ctx.last_safe = Some(obs.position);
        }

        self.track_capsules(obs);

        let mut rationales = Vec::new();
        for goal in self.ctx.role.roster() {
            if let Some(detail) = goal.evaluate(&mut self.ctx, obs, &self.oracle) {
                rationales.push(Rationale {
                    goal: goal.name(),
                    detail,
                });
            }
        }

        let action = self.resolve_step(obs);

        self.ctx.previous_position = Some(obs.position);
        self.ctx.previous_food = obs.food.iter().copied().collect();

        Decision {
            action,
            state: self.ctx.state,
            rationales,
        }
    }

    /// Register, attribute and count down capsules.
    fn track_capsules(&mut self, obs: &Observation) {
        for &cell in &obs.capsules {
            if !self.ctx.capsules.iter().any(|r| r.position() == cell) {
                self.ctx.capsules.push(CapsuleRecord::new(cell));
            }
        }

        let mut consumed_now = false;
        for record in &mut self.ctx.capsules {
            if record.is_consumed() || obs.capsules.contains(&record.position()) {
                continue;
            }
            // The capsule vanished from the snapshot this tick. Attribute it
            // to this agent only when close enough to have eaten it.
            if obs.position.manhattan(record.position()) > CAPSULE_EAT_RADIUS {
                record.vanish();
            } else if self.ctx.state == BehavioralState::Attacking {
                record.refresh();
            } else {
                record.consume();
                consumed_now = true;
            }
        }
        if consumed_now {
            // Attacking must resume into a stable state when the advantage
            // expires. Eating mid-detour (or mid-flee) finishes that
            // excursion: the state it preempted is the one to come back to.
            let resume = if !self.ctx.state.is_transient() {
                self.ctx.state
            } else if !self.ctx.previous_state.is_transient() {
                self.ctx.previous_state
            } else {
                self.ctx.role.base_state()
            };
            self.ctx.previous_state = resume;
            self.ctx.state = BehavioralState::Attacking;
        }

        let mut expired = false;
        for record in &mut self.ctx.capsules {
            if record.tick() == CapsuleTick::Expired {
                expired = true;
            }
        }
        if expired && self.ctx.state == BehavioralState::Attacking {
            self.ctx.revert_state();
        }
    }

    /// Convert the active path's next cell into a legal move, or Stop.
    fn resolve_step(&mut self, obs: &Observation) -> Move {
        let Some(path) = self.ctx.path.as_mut() else {
            return Move::Stop;
        };
        let Some(next) = path.step() else {
            return Move::Stop;
        };
        let Some(mv) = Move::from_step(obs.position, next) else {
            // Plan no longer lines up with where we stand.
            self.ctx.path = None;
            return Move::Stop;
        };
        if obs.is_legal(mv) {
            mv
        } else {
            self.ctx.path = None;
            Move::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::grid::Cell;
    use crate::oracle::BfsOracle;
    use crate::snapshot::EnemyObservation;
    use crate::territory::{TeamSide, Territory};

    const WIDTH: i32 = 12;
    const HEIGHT: i32 = 6;

    fn bordered_walls() -> HashSet<Cell> {
        let mut walls = HashSet::new();
        for x in -1..=WIDTH {
            walls.insert(Cell::new(x, -1));
            walls.insert(Cell::new(x, HEIGHT));
        }
        for y in -1..=HEIGHT {
            walls.insert(Cell::new(-1, y));
            walls.insert(Cell::new(WIDTH, y));
        }
        walls
    }

    fn observation(position: Cell) -> Observation {
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
            walls: bordered_walls(),
            score: 0,
        }
    }

    fn offense_agent() -> Interpreter<BfsOracle> {
        let territory = Territory::new(TeamSide::Red, WIDTH, HEIGHT);
        let oracle = BfsOracle::new(WIDTH, HEIGHT, bordered_walls());
        Interpreter::new(0, Role::Offense, territory, oracle, 7)
    }

    #[test]
    fn test_seek_food_plans_toward_nearest() {
        let mut agent = offense_agent();
        let mut obs = observation(Cell::new(2, 2));
        obs.food = vec![Cell::new(9, 2), Cell::new(5, 2)];

        let decision = agent.decide(&obs);
        assert_eq!(decision.action, Move::East);
        assert_eq!(decision.state, BehavioralState::SeekingFood);
        assert!(decision
            .rationales
            .iter()
            .any(|r| r.goal == "seek_food"));
    }

    #[test]
    fn test_deposit_transition_at_threshold() {
        let mut agent = offense_agent();
        agent.ctx.carried_food = 5;
        agent.ctx.last_safe = Some(Cell::new(5, 2));

        // Nearest food is far enough away that banking wins.
        let mut obs = observation(Cell::new(8, 2));
        obs.food = vec![Cell::new(11, 2)];

        let decision = agent.decide(&obs);
        assert_eq!(decision.state, BehavioralState::DepositingFood);
        // Deposit policy plans the retreat in the same tick.
        assert!(agent.ctx.path.is_some());
    }

    #[test]
    fn test_banking_resets_carried_food() {
        let mut agent = offense_agent();
        agent.ctx.carried_food = 5;
        agent.ctx.set_state(BehavioralState::DepositingFood);

        // Red side: x < 6 is safe on a width-12 board.
        let mut obs = observation(Cell::new(5, 2));
        obs.food = vec![Cell::new(11, 2)];

        let decision = agent.decide(&obs);
        assert_eq!(agent.carried_food(), 0);
        assert_eq!(decision.state, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_one_tick_food_consumption_lag() {
        let mut agent = offense_agent();
        let pellet = Cell::new(8, 2);

        let mut obs = observation(Cell::new(7, 2));
        obs.food = vec![pellet];
        agent.decide(&obs);
        assert_eq!(agent.carried_food(), 0);

        // We stepped onto the pellet and the snapshot no longer lists it.
        let obs = observation(pellet);
        agent.decide(&obs);
        assert_eq!(agent.carried_food(), 1);
    }

    #[test]
    fn test_teleport_resets_trip_state() {
        let mut agent = offense_agent();
        agent.ctx.carried_food = 3;
        agent.ctx.set_state(BehavioralState::DepositingFood);

        let mut obs = observation(Cell::new(9, 3));
        obs.food = vec![Cell::new(10, 3)];
        agent.decide(&obs);

        // Captured: the simulation snapped us back across the board.
        let mut obs = observation(Cell::new(1, 1));
        obs.food = vec![Cell::new(10, 3)];
        let decision = agent.decide(&obs);

        assert_eq!(agent.carried_food(), 0);
        assert_eq!(decision.state, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_capsule_consumption_triggers_attacking() {
        let mut agent = offense_agent();
        let capsule = Cell::new(8, 2);

        let mut obs = observation(Cell::new(7, 2));
        obs.capsules = vec![capsule];
        agent.decide(&obs);

        // Capsule gone, agent adjacent: attribute it to us.
        let obs = observation(Cell::new(8, 2));
        let decision = agent.decide(&obs);
        assert_eq!(decision.state, BehavioralState::Attacking);
        // The detour is finished: expiry resumes food seeking, not the detour.
        assert_eq!(agent.ctx.previous_state, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_attacking_outlasts_target_visibility() {
        let mut agent = offense_agent();
        let capsule = Cell::new(8, 2);

        let mut obs = observation(Cell::new(7, 2));
        obs.capsules = vec![capsule];
        agent.decide(&obs);
        agent.decide(&observation(Cell::new(8, 2)));
        assert_eq!(agent.state(), BehavioralState::Attacking);

        // No enemy ever comes into view; the countdown, not target loss,
        // ends the advantage.
        for _ in 0..10 {
            let decision = agent.decide(&observation(Cell::new(8, 2)));
            assert_eq!(decision.state, BehavioralState::Attacking);
        }
    }

    #[test]
    fn test_capsule_detour_aborts_when_capsule_lost() {
        let mut agent = offense_agent();
        let capsule = Cell::new(6, 2);

        let mut obs = observation(Cell::new(2, 2));
        obs.capsules = vec![capsule];
        let decision = agent.decide(&obs);
        assert_eq!(decision.state, BehavioralState::FindingCapsule);

        // A teammate ate it while we were four cells away: too far to claim
        // the advantage, so the detour unwinds to food seeking.
        let decision = agent.decide(&observation(Cell::new(2, 2)));
        assert_eq!(decision.state, BehavioralState::SeekingFood);
        assert!(agent.ctx.path.is_none());
    }

    #[test]
    fn test_capsule_detour_ends_when_route_walked() {
        let mut agent = offense_agent();
        let capsule = Cell::new(8, 2);

        let mut obs = observation(Cell::new(7, 2));
        obs.capsules = vec![capsule];
        agent.decide(&obs);

        // Standing on the capsule with the snapshot still listing it: the
        // walked-out route ends the detour without claiming the advantage.
        let mut obs = observation(Cell::new(8, 2));
        obs.capsules = vec![capsule];
        let decision = agent.decide(&obs);
        assert_eq!(decision.state, BehavioralState::SeekingFood);

        // The snapshot catches up one tick later and the advantage lands.
        let decision = agent.decide(&observation(Cell::new(8, 2)));
        assert_eq!(decision.state, BehavioralState::Attacking);
        assert_eq!(agent.ctx.previous_state, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_capsule_expiry_reverts_state() {
        let mut agent = offense_agent();
        let capsule = Cell::new(8, 2);

        let mut obs = observation(Cell::new(7, 2));
        obs.capsules = vec![capsule];
        agent.decide(&obs);

        let vulnerable = EnemyObservation {
            position: Some(Cell::new(10, 2)),
            is_pacman: false,
            scared_ticks: Some(60),
        };

        let mut obs = observation(Cell::new(8, 2));
        obs.enemies = vec![vulnerable];
        let decision = agent.decide(&obs);
        assert_eq!(decision.state, BehavioralState::Attacking);

        // Keep a pursuit target alive until the countdown runs out.
        let mut last = decision.state;
        for _ in 0..60 {
            let mut obs = observation(Cell::new(8, 2));
            obs.enemies = vec![vulnerable];
            last = agent.decide(&obs).state;
        }
        assert_eq!(last, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_distant_capsule_vanish_grants_nothing() {
        let mut agent = offense_agent();
        let capsule = Cell::new(10, 4);

        let mut obs = observation(Cell::new(2, 1));
        obs.capsules = vec![capsule];
        agent.decide(&obs);

        let decision = agent.decide(&observation(Cell::new(2, 1)));
        assert_ne!(decision.state, BehavioralState::Attacking);
        assert!(agent.ctx.capsules[0].is_consumed());
        assert_eq!(agent.ctx.capsules[0].remaining(), 0);
    }

    #[test]
    fn test_illegal_step_discards_path_and_stops() {
        let mut agent = offense_agent();
        let mut obs = observation(Cell::new(2, 2));
        obs.food = vec![Cell::new(9, 2)];
        obs.legal_moves = vec![Move::North, Move::Stop];

        let decision = agent.decide(&obs);
        assert_eq!(decision.action, Move::Stop);
        assert!(agent.ctx.path.is_none());
    }

    #[test]
    fn test_no_plan_means_stop() {
        // No food anywhere and already on the safe side: nothing to plan.
        let mut agent = offense_agent();
        let decision = agent.decide(&observation(Cell::new(2, 2)));
        assert_eq!(decision.action, Move::Stop);
        assert!(agent.ctx.path.is_none());
        assert_eq!(decision.state, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_no_food_left_heads_home_from_enemy_side() {
        let mut agent = offense_agent();
        agent.ctx.last_safe = Some(Cell::new(5, 2));

        let decision = agent.decide(&observation(Cell::new(8, 2)));
        assert_eq!(decision.action, Move::West);
        assert!(decision
            .rationales
            .iter()
            .any(|r| r.detail.contains("heading home")));
    }

    #[test]
    fn test_deposit_retrigger_keeps_preempted_state() {
        let mut agent = offense_agent();
        agent.ctx.carried_food = 5;
        agent.ctx.last_safe = Some(Cell::new(5, 2));

        let mut obs = observation(Cell::new(8, 2));
        obs.food = vec![Cell::new(11, 2)];
        agent.decide(&obs);
        assert_eq!(agent.state(), BehavioralState::DepositingFood);

        // Still carrying above the threshold on the way home: the transition
        // must not re-fire and erase the state it preempted.
        let mut obs = observation(Cell::new(7, 2));
        obs.food = vec![Cell::new(11, 2)];
        let decision = agent.decide(&obs);
        assert_eq!(decision.state, BehavioralState::DepositingFood);
        assert_eq!(agent.ctx.previous_state, BehavioralState::SeekingFood);
    }
}
