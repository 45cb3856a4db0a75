//! Per-agent memory carried between ticks.

use std::collections::HashSet;

use crate::agent::state::{BehavioralState, Role};
use crate::capsule::CapsuleRecord;
use crate::grid::Cell;
use crate::nav::Path;
use crate::rng::Rng;
use crate::territory::Territory;

/// Everything an agent remembers between ticks.
///
/// Policies mutate this directly; the interpreter owns the per-tick
/// bookkeeping (death detection, capsule countdown, position history).
#[derive(Debug)]
pub(crate) struct AgentContext {
    pub(crate) role: Role,
    pub(crate) territory: Territory,
    pub(crate) state: BehavioralState,
    pub(crate) previous_state: BehavioralState,
    /// Path currently being followed, if any.
    pub(crate) path: Option<Path>,
    /// Last cell observed on the safe side.
    pub(crate) last_safe: Option<Cell>,
    /// Spawn cell, recorded on the first tick.
    pub(crate) starting_position: Option<Cell>,
    /// Position at the previous tick.
    pub(crate) previous_position: Option<Cell>,
    /// Food set from the previous tick, for detecting what was just eaten.
    pub(crate) previous_food: HashSet<Cell>,
    /// Food pellets eaten but not yet banked.
    pub(crate) carried_food: u32,
    /// Capsules this agent knows about.
    pub(crate) capsules: Vec<CapsuleRecord>,
    /// Destination of the current flee path, for repeat detection.
    pub(crate) last_flee_target: Option<Cell>,
    /// Consecutive flee plans toward the same target.
    pub(crate) flee_repeats: u32,
    pub(crate) rng: Rng,
}

impl AgentContext {
    pub(crate) fn new(role: Role, territory: Territory, seed: u64) -> Self {
        Self {
            role,
            territory,
            state: role.base_state(),
            previous_state: role.base_state(),
            path: None,
            last_safe: None,
            starting_position: None,
            previous_position: None,
            previous_food: HashSet::new(),
            carried_food: 0,
            capsules: Vec::new(),
            last_flee_target: None,
            flee_repeats: 0,
            rng: Rng::new(seed),
        }
    }

    /// Enter a new state, remembering the one being left.
    pub(crate) const fn set_state(&mut self, next: BehavioralState) {
        self.previous_state = self.state;
        self.state = next;
    }

    /// Return to the state that was active before the last transition.
    pub(crate) const fn revert_state(&mut self) {
        self.state = self.previous_state;
    }

    /// Whether a planned path still has unconsumed steps.
    pub(crate) fn has_unfinished_path(&self) -> bool {
        self.path.as_ref().is_some_and(|p| !p.is_completed())
    }

    /// Reset trip-local memory after a death teleport.
    ///
    /// Capsule records survive: their countdowns track world time, not the
    /// agent's trip.
    pub(crate) fn reset_trip_state(&mut self) {
        self.state = self.role.base_state();
        self.previous_state = self.role.base_state();
        self.path = None;
        self.last_safe = None;
        self.previous_position = None;
        self.previous_food.clear();
        self.carried_food = 0;
        self.last_flee_target = None;
        self.flee_repeats = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::TeamSide;

    fn context(role: Role) -> AgentContext {
        AgentContext::new(role, Territory::new(TeamSide::Red, 32, 32), 1)
    }

    #[test]
    fn test_state_transitions_record_previous() {
        let mut ctx = context(Role::Offense);
        assert_eq!(ctx.state, BehavioralState::SeekingFood);

        ctx.set_state(BehavioralState::Attacking);
        assert_eq!(ctx.state, BehavioralState::Attacking);
        assert_eq!(ctx.previous_state, BehavioralState::SeekingFood);

        ctx.revert_state();
        assert_eq!(ctx.state, BehavioralState::SeekingFood);
    }

    #[test]
    fn test_trip_reset_keeps_capsules() {
        let mut ctx = context(Role::Offense);
        let mut record = CapsuleRecord::new(Cell::new(20, 5));
        record.consume();
        ctx.capsules.push(record);
        ctx.carried_food = 4;
        ctx.last_safe = Some(Cell::new(15, 3));
        ctx.set_state(BehavioralState::DepositingFood);

        ctx.reset_trip_state();

        assert_eq!(ctx.state, BehavioralState::SeekingFood);
        assert_eq!(ctx.carried_food, 0);
        assert!(ctx.last_safe.is_none());
        assert!(ctx.path.is_none());
        assert_eq!(ctx.capsules.len(), 1);
        assert!(ctx.capsules[0].is_consumed());
    }

    #[test]
    fn test_unfinished_path_detection() {
        let mut ctx = context(Role::Defense);
        assert!(!ctx.has_unfinished_path());

        let mut path = Path::from_cells(Cell::new(0, 0), vec![Cell::new(1, 0)]);
        ctx.path = Some(path.clone());
        assert!(ctx.has_unfinished_path());

        path.step();
        ctx.path = Some(path);
        assert!(!ctx.has_unfinished_path());
    }
}
