//! Deterministic match runner pitting both agents against scripted pawns.

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use crate::agent::{Interpreter, Role};
use crate::diagnostics::{AgentId, DiagnosticsStore};
use crate::grid::{Cell, Move};
use crate::nav::find_path;
use crate::oracle::BfsOracle;
use crate::rng::Rng;
use crate::sim::Layout;
use crate::snapshot::{EnemyObservation, Observation};
use crate::territory::{TeamSide, Territory};

/// Manhattan range within which enemy pawns are visible to agents.
const SENSOR_RANGE: u32 = 5;
/// Maze distance within which a pawn abandons patrol to chase an agent.
const PAWN_CHASE_RADIUS: u32 = 8;
/// Ticks a pawn stays scared after a capsule is eaten.
const PAWN_SCARED_TICKS: u32 = 40;

/// Agent slot identifiers within a match.
const OFFENSE_ID: AgentId = 0;
const DEFENSE_ID: AgentId = 1;

#[derive(Debug)]
struct AgentSlot {
    interpreter: Interpreter<BfsOracle>,
    position: Cell,
    spawn: Cell,
    carried: u32,
}

#[derive(Debug, Clone, Copy)]
struct Pawn {
    position: Cell,
    spawn: Cell,
    scared: u32,
}

/// End-of-run statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Pellets still on the board.
    pub food_remaining: usize,
    /// Pellets carried home and banked.
    pub food_banked: u32,
    /// Times one of our agents was captured and sent back to spawn.
    pub captures: u32,
    /// Offense agent's final behavioral state.
    pub offense_state: String,
    /// Defense agent's final behavioral state.
    pub defense_state: String,
}

/// A deterministic match: our offense and defense agents against scripted
/// enemy pawns on a parsed layout.
///
/// Pawns chase the nearest agent when close, otherwise wander randomly; a
/// consumed capsule scares every pawn for a fixed number of ticks. All
/// randomness flows from the seed, so equal seeds replay equal matches.
#[derive(Debug)]
pub struct Match {
    walls: HashSet<Cell>,
    food: Vec<Cell>,
    capsules: Vec<Cell>,
    offense: AgentSlot,
    defense: AgentSlot,
    pawns: Vec<Pawn>,
    territory: Territory,
    rng: Rng,
    tick: u64,
    banked: u32,
    captures: u32,
}

impl Match {
    /// Set up a match on `layout` with all randomness derived from `seed`.
    #[must_use]
    pub fn new(layout: &Layout, seed: u64) -> Self {
        let territory = Territory::new(TeamSide::Red, layout.width(), layout.height());
        let oracle = BfsOracle::new(layout.width(), layout.height(), layout.walls().clone());

        let offense = AgentSlot {
            interpreter: Interpreter::new(
                OFFENSE_ID,
                Role::Offense,
                territory,
                oracle.clone(),
                seed ^ 0x9e37_79b9,
            ),
            position: layout.offense_start(),
            spawn: layout.offense_start(),
            carried: 0,
        };
        let defense = AgentSlot {
            interpreter: Interpreter::new(
                DEFENSE_ID,
                Role::Defense,
                territory,
                oracle,
                seed ^ 0x85eb_ca6b,
            ),
            position: layout.defense_start(),
            spawn: layout.defense_start(),
            carried: 0,
        };

        Self {
            walls: layout.walls().clone(),
            food: layout.food().to_vec(),
            capsules: layout.capsules().to_vec(),
            offense,
            defense,
            pawns: layout
                .pawn_starts()
                .iter()
                .map(|&cell| Pawn {
                    position: cell,
                    spawn: cell,
                    scared: 0,
                })
                .collect(),
            territory,
            rng: Rng::new(seed),
            tick: 0,
            banked: 0,
            captures: 0,
        }
    }

    /// Pellets still on the board.
    #[must_use]
    pub fn food_remaining(&self) -> usize {
        self.food.len()
    }

    /// Run `ticks` simulation steps, logging into `diag` when given.
    pub fn run(&mut self, ticks: u64, mut diag: Option<&mut DiagnosticsStore>) -> MatchSummary {
        for _ in 0..ticks {
            self.step(diag.as_deref_mut());
        }
        self.summary()
    }

    /// Snapshot of the current match statistics.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            ticks: self.tick,
            food_remaining: self.food.len(),
            food_banked: self.banked,
            captures: self.captures,
            offense_state: self.offense.interpreter.state().to_string(),
            defense_state: self.defense.interpreter.state().to_string(),
        }
    }

    /// Advance the match by one tick: both agents decide and move, then the
    /// pawns respond.
    pub fn step(&mut self, mut diag: Option<&mut DiagnosticsStore>) {
        self.tick += 1;
        self.agent_turn(OFFENSE_ID, diag.as_deref_mut());
        self.agent_turn(DEFENSE_ID, diag.as_deref_mut());
        self.pawn_turn();
    }

    fn agent_turn(&mut self, id: AgentId, diag: Option<&mut DiagnosticsStore>) {
        let obs = self.observe(id);

        let slot = if id == OFFENSE_ID {
            &mut self.offense
        } else {
            &mut self.defense
        };
        let started = Instant::now();
        let decision = slot.interpreter.decide(&obs);
        let elapsed =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        if let Some(store) = diag {
            store.record(id, self.tick, &decision, elapsed);
        }

        // Decision layer degraded to Stop: fail open with a random legal
        // move so the match keeps developing.
        let action = if decision.action == Move::Stop {
            self.random_legal_move(obs.position)
        } else {
            decision.action
        };

        let slot = if id == OFFENSE_ID {
            &mut self.offense
        } else {
            &mut self.defense
        };
        let next = action.apply(slot.position);
        if !self.walls.contains(&next) {
            slot.position = next;
        }
        let position = slot.position;

        if let Some(index) = self.food.iter().position(|&cell| cell == position) {
            self.food.remove(index);
            slot.carried += 1;
        }
        if self.territory.is_safe_side(position) && slot.carried > 0 {
            self.banked += slot.carried;
            slot.carried = 0;
        }
        if let Some(index) = self.capsules.iter().position(|&cell| cell == position) {
            self.capsules.remove(index);
            for pawn in &mut self.pawns {
                pawn.scared = PAWN_SCARED_TICKS;
            }
        }

        self.resolve_collisions(id);
    }

    /// Capture rules: a healthy pawn meeting one of our agents on the unsafe
    /// side sends the agent back to spawn with its cargo lost; on the safe
    /// side the pawn is the intruder and goes home instead, as does any
    /// scared pawn an agent touches.
    fn resolve_collisions(&mut self, id: AgentId) {
        let (position, spawn) = {
            let slot = if id == OFFENSE_ID {
                &self.offense
            } else {
                &self.defense
            };
            (slot.position, slot.spawn)
        };

        let mut captured = false;
        for pawn in &mut self.pawns {
            if pawn.position != position {
                continue;
            }
            if pawn.scared > 0 {
                pawn.position = pawn.spawn;
                pawn.scared = 0;
            } else if self.territory.is_safe_side(position) {
                // Intruding pawn caught by a home-side agent.
                pawn.position = pawn.spawn;
            } else {
                captured = true;
            }
        }

        if captured {
            self.captures += 1;
            let slot = if id == OFFENSE_ID {
                &mut self.offense
            } else {
                &mut self.defense
            };
            slot.position = spawn;
            slot.carried = 0;
        }
    }

    fn pawn_turn(&mut self) {
        let targets = [self.offense.position, self.defense.position];

        for index in 0..self.pawns.len() {
            let pawn = self.pawns[index];
            if pawn.scared > 0 {
                self.pawns[index].scared -= 1;
                continue;
            }

            let chase = targets
                .iter()
                .map(|&target| {
                    let route = find_path(pawn.position, target, &self.walls, None);
                    (route, target)
                })
                .filter(|(route, _)| !route.is_empty())
                .min_by_key(|(route, _)| route.len());

            let next = match chase {
                Some((route, _))
                    if u64::try_from(route.len()).unwrap_or(u64::MAX)
                        <= u64::from(PAWN_CHASE_RADIUS) =>
                {
                    route[0]
                }
                _ => self.random_open_neighbor(pawn.position),
            };
            self.pawns[index].position = next;
        }

        self.resolve_collisions(OFFENSE_ID);
        self.resolve_collisions(DEFENSE_ID);
    }

    fn observe(&self, id: AgentId) -> Observation {
        let slot = if id == OFFENSE_ID {
            &self.offense
        } else {
            &self.defense
        };
        let position = slot.position;

        let legal_moves = self.legal_moves(position);
        let enemies = self
            .pawns
            .iter()
            .map(|pawn| {
                let visible = position.manhattan(pawn.position) <= SENSOR_RANGE;
                EnemyObservation {
                    position: visible.then_some(pawn.position),
                    is_pacman: self.territory.is_safe_side(pawn.position),
                    scared_ticks: visible.then_some(pawn.scared),
                }
            })
            .collect();

        Observation {
            legal_moves,
            position,
            is_pacman: !self.territory.is_safe_side(position),
            is_scared: false,
            food: self.food.clone(),
            enemies,
            capsules: self.capsules.clone(),
            walls: self.walls.clone(),
            score: i32::try_from(self.banked).unwrap_or(i32::MAX),
        }
    }

    fn legal_moves(&self, position: Cell) -> Vec<Move> {
        let mut moves: Vec<Move> = Move::DIRECTIONAL
            .iter()
            .copied()
            .filter(|mv| !self.walls.contains(&mv.apply(position)))
            .collect();
        moves.push(Move::Stop);
        moves
    }

    fn random_legal_move(&mut self, position: Cell) -> Move {
        let open: Vec<Move> = Move::DIRECTIONAL
            .iter()
            .copied()
            .filter(|mv| !self.walls.contains(&mv.apply(position)))
            .collect();
        if open.is_empty() {
            return Move::Stop;
        }
        let index = self.rng.next_u32(u32::try_from(open.len()).unwrap_or(u32::MAX)) as usize;
        open[index]
    }

    fn random_open_neighbor(&mut self, position: Cell) -> Cell {
        let open: Vec<Cell> = position
            .neighbors()
            .into_iter()
            .filter(|cell| !self.walls.contains(cell))
            .collect();
        if open.is_empty() {
            return position;
        }
        let index = self.rng.next_u32(u32::try_from(open.len()).unwrap_or(u32::MAX)) as usize;
        open[index]
    }
}
