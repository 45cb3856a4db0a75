//! Behavioral states and agent roles.

use std::fmt;

/// The mutually exclusive behavioral states an agent can occupy.
///
/// Exactly one state is active per agent per tick; policies read it to decide
/// whether they apply and write it to hand control over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehavioralState {
    /// Collecting food on the enemy side.
    SeekingFood,
    /// Heading for a nearby power capsule.
    FindingCapsule,
    /// Carrying food home to bank it.
    DepositingFood,
    /// Retreating from a defender while raiding.
    OffensiveFleeing,
    /// Retreating from a raider while scared.
    DefensiveFleeing,
    /// Patrolling home territory.
    Defending,
    /// Hunting vulnerable enemies under a capsule advantage.
    Attacking,
    /// Reserved idle-roaming state; no policy currently enters it.
    Wander,
}

impl BehavioralState {
    /// Whether this state is a temporary excursion that reverts to a base
    /// state rather than persisting on its own.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            BehavioralState::FindingCapsule
                | BehavioralState::OffensiveFleeing
                | BehavioralState::DefensiveFleeing
                | BehavioralState::Attacking
        )
    }
}

impl fmt::Display for BehavioralState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehavioralState::SeekingFood => "SeekingFood",
            BehavioralState::FindingCapsule => "FindingCapsule",
            BehavioralState::DepositingFood => "DepositingFood",
            BehavioralState::OffensiveFleeing => "OffensiveFleeing",
            BehavioralState::DefensiveFleeing => "DefensiveFleeing",
            BehavioralState::Defending => "Defending",
            BehavioralState::Attacking => "Attacking",
            BehavioralState::Wander => "Wander",
        };
        f.write_str(name)
    }
}

/// Fixed role an agent is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Raids the enemy side for food.
    Offense,
    /// Holds home territory.
    Defense,
}

impl Role {
    /// The state an agent of this role starts in and falls back to.
    #[must_use]
    pub const fn base_state(self) -> BehavioralState {
        match self {
            Role::Offense => BehavioralState::SeekingFood,
            Role::Defense => BehavioralState::Defending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_states() {
        assert_eq!(Role::Offense.base_state(), BehavioralState::SeekingFood);
        assert_eq!(Role::Defense.base_state(), BehavioralState::Defending);
    }

    #[test]
    fn test_transient_states() {
        assert!(BehavioralState::FindingCapsule.is_transient());
        assert!(BehavioralState::OffensiveFleeing.is_transient());
        assert!(BehavioralState::DefensiveFleeing.is_transient());
        assert!(BehavioralState::Attacking.is_transient());
        assert!(!BehavioralState::SeekingFood.is_transient());
        assert!(!BehavioralState::Defending.is_transient());
        assert!(!BehavioralState::Wander.is_transient());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(BehavioralState::SeekingFood.to_string(), "SeekingFood");
        assert_eq!(BehavioralState::Wander.to_string(), "Wander");
    }
}
