//! Goal-driven agent: behavioral states, policies and the interpreter loop.

mod context;
mod defense;
mod goal;
mod interpreter;
mod offense;
mod state;

pub use goal::{
    Goal, CAPSULE_SEEK_RADIUS, DEFENSE_ROSTER, FLEE_REPEAT_LIMIT, FLEE_TRIGGER_RADIUS,
    FOOD_DEPOSIT_THRESHOLD, OFFENSE_ROSTER, PATROL_RADIUS, PURSUIT_RADIUS,
    RANDOM_CANDIDATE_ATTEMPTS,
};
pub use interpreter::{Decision, Interpreter, Rationale};
pub use state::{BehavioralState, Role};
