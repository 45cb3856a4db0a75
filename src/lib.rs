// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Pellet: a goal-driven decision engine for a two-team grid capture game.
//!
//! This crate provides:
//! - A finite-state agent that raids for food, banks it, grabs capsules,
//!   hunts vulnerable enemies and flees threats
//! - An embedded best-first grid pathfinder with forbidden-cell support
//! - A deterministic match harness with scripted enemy pawns
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Match Harness (sim)          │
//! ├─────────────────────────────────────┤
//! │   Interpreter + Goal Policies       │
//! ├─────────────────────────────────────┤
//! │  Territory │ Capsules │ Pathfinder  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Data flows one way per tick: world snapshot in, one move out. All
//! randomness comes from explicit seeds, so matches replay bit-identically.

pub mod agent;
pub mod capsule;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod nav;
pub mod oracle;
pub mod sim;
pub mod snapshot;
pub mod territory;

mod rng;

pub use error::{DistanceError, DistanceResult};

// Re-export key engine types at crate root for convenience
pub use agent::{BehavioralState, Decision, Interpreter, Rationale, Role};
pub use grid::{Cell, Move};
pub use snapshot::{EnemyObservation, Observation};
pub use territory::{TeamSide, Territory};
