//! Self-contained match harness: board layouts and a deterministic runner.

mod layout;
mod runner;

pub use layout::{Layout, LayoutError, DEFAULT_LAYOUT};
pub use runner::{Match, MatchSummary};
