//! Append-only per-agent move logs for post-match analysis.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::agent::{Decision, Rationale};

/// Identifier for one agent within a match.
pub type AgentId = u32;

/// One logged decision.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    /// Tick the decision was made on.
    pub tick: u64,
    /// Behavioral state after the decision.
    pub state: String,
    /// Move handed to the simulation.
    pub action: String,
    /// Policies that acted, in roster order.
    pub rationales: Vec<Rationale>,
    /// Wall-clock time the decision took.
    pub elapsed_micros: u64,
}

/// All decisions logged for one agent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentLog {
    /// Records in tick order.
    pub moves: Vec<MoveRecord>,
}

/// Match-wide diagnostics store, keyed by agent.
///
/// Each agent appends only to its own log; there is no cross-agent
/// interleaving to reconcile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticsStore {
    agents: BTreeMap<AgentId, AgentLog>,
}

impl DiagnosticsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decision for `agent`.
    pub fn record(&mut self, agent: AgentId, tick: u64, decision: &Decision, elapsed_micros: u64) {
        self.agents.entry(agent).or_default().moves.push(MoveRecord {
            tick,
            state: decision.state.to_string(),
            action: decision.action.to_string(),
            rationales: decision.rationales.clone(),
            elapsed_micros,
        });
    }

    /// Log for one agent, if any decisions were recorded.
    #[must_use]
    pub fn log(&self, agent: AgentId) -> Option<&AgentLog> {
        self.agents.get(&agent)
    }

    /// Total records across all agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.values().map(|log| log.moves.len()).sum()
    }

    /// Whether no decisions have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the whole store as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON form of the store to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::BehavioralState;
    use crate::grid::Move;

    fn decision() -> Decision {
        Decision {
            action: Move::East,
            state: BehavioralState::SeekingFood,
            rationales: vec![Rationale {
                goal: "seek_food",
                detail: "planning toward food at (9, 2)".to_owned(),
            }],
        }
    }

    #[test]
    fn test_records_append_per_agent() {
        let mut store = DiagnosticsStore::new();
        store.record(0, 1, &decision(), 12);
        store.record(0, 2, &decision(), 9);
        store.record(1, 1, &decision(), 30);

        assert_eq!(store.len(), 3);
        assert_eq!(store.log(0).unwrap().moves.len(), 2);
        assert_eq!(store.log(1).unwrap().moves.len(), 1);
        assert!(store.log(7).is_none());

        let log = store.log(0).unwrap();
        assert_eq!(log.moves[0].tick, 1);
        assert_eq!(log.moves[1].tick, 2);
        assert_eq!(log.moves[0].action, "East");
        assert_eq!(log.moves[0].state, "SeekingFood");
    }

    #[test]
    fn test_json_round_trip_shape() {
        let mut store = DiagnosticsStore::new();
        store.record(3, 1, &decision(), 5);

        let json = store.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["agents"]["3"]["moves"][0]["action"], "East");
        assert_eq!(
            value["agents"]["3"]["moves"][0]["rationales"][0]["goal"],
            "seek_food"
        );
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moves.json");

        let mut store = DiagnosticsStore::new();
        store.record(0, 1, &decision(), 5);
        store.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("seek_food"));
    }
}
