//! Capsule lifecycle tracking.

use crate::grid::Cell;

/// Ticks a consumed capsule keeps its offensive advantage active.
pub const CAPSULE_ACTIVE_TICKS: u32 = 40;

/// Manhattan radius within which a capsule vanishing from the snapshot is
/// attributed to this agent.
///
/// The agent cannot distinguish "I ate it" from "a teammate ate it nearby";
/// the proximity cutoff is an accepted approximation, not a defect.
pub const CAPSULE_EAT_RADIUS: u32 = 2;

/// Result of advancing a capsule's countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleTick {
    /// Not consumed, or the countdown already reached zero earlier.
    Idle,
    /// Countdown decreased and the advantage is still active.
    Active {
        /// Ticks of advantage left.
        remaining: u32,
    },
    /// Countdown just hit zero; the owning agent reverts exactly once.
    Expired,
}

/// Lifecycle record for one capsule known to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapsuleRecord {
    position: Cell,
    consumed: bool,
    remaining: u32,
}

impl CapsuleRecord {
    /// Track a capsule observed at `position`, initially unconsumed.
    #[must_use]
    pub const fn new(position: Cell) -> Self {
        Self {
            position,
            consumed: false,
            remaining: 0,
        }
    }

    /// Board cell the capsule sits on.
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Whether the capsule has been consumed.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Ticks of advantage left, zero when inactive.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Mark the capsule consumed by this agent and start the countdown.
    pub const fn consume(&mut self) {
        self.consumed = true;
        self.remaining = CAPSULE_ACTIVE_TICKS;
    }

    /// Restart the countdown without a state re-trigger.
    ///
    /// Used when a capsule is eaten while the advantage is already active:
    /// consumption is modeled as continued activity.
    pub const fn refresh(&mut self) {
        self.consumed = true;
        self.remaining = CAPSULE_ACTIVE_TICKS;
    }

    /// Mark the capsule gone without granting the advantage (it vanished out
    /// of reach, so someone else ate it).
    pub const fn vanish(&mut self) {
        self.consumed = true;
        self.remaining = 0;
    }

    /// Advance the countdown by one tick.
    pub const fn tick(&mut self) -> CapsuleTick {
        if !self.consumed || self.remaining == 0 {
            return CapsuleTick::Idle;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            CapsuleTick::Expired
        } else {
            CapsuleTick::Active {
                remaining: self.remaining,
            }
        }
    }
}
