//! Health-state enumeration for the stroke transition model.
//!
//! States are a closed, ordered set; each state's integer index addresses
//! the corresponding row/column of the transition rate matrix. Membership
//! checks (absorbing, death, stroke event) live here as predicates rather
//! than being scattered through the simulation code.

use serde::{Deserialize, Serialize};

/// Health states of the stroke model, in rate-matrix index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum HealthState {
    /// Alive with no history of stroke.
    Well = 0,
    /// Experiencing a non-fatal stroke.
    Stroke = 1,
    /// Dead from a stroke.
    StrokeDead = 2,
    /// Dead from other causes.
    NaturalDeath = 3,
}

impl HealthState {
    /// All states, in index order.
    pub const ALL: [HealthState; 4] = [
        HealthState::Well,
        HealthState::Stroke,
        HealthState::StrokeDead,
        HealthState::NaturalDeath,
    ];

    /// Number of states (rate matrix dimension).
    pub const COUNT: usize = Self::ALL.len();

    /// Rate-matrix row/column index of this state.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a state by its rate-matrix index.
    pub fn from_index(index: usize) -> Option<HealthState> {
        Self::ALL.get(index).copied()
    }

    /// Whether the chain can never leave this state.
    #[inline]
    pub fn is_absorbing(&self) -> bool {
        matches!(self, HealthState::StrokeDead | HealthState::NaturalDeath)
    }

    /// Whether entering this state ends the patient's life.
    #[inline]
    pub fn is_death(&self) -> bool {
        matches!(self, HealthState::StrokeDead | HealthState::NaturalDeath)
    }

    /// Whether entering this state counts as a stroke event.
    ///
    /// A fatal stroke is both a stroke event and a death; the two
    /// predicates are independent.
    #[inline]
    pub fn is_stroke_event(&self) -> bool {
        matches!(self, HealthState::Stroke | HealthState::StrokeDead)
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HealthState::Well => "WELL",
            HealthState::Stroke => "STROKE",
            HealthState::StrokeDead => "STROKE_DEAD",
            HealthState::NaturalDeath => "NATURAL_DEATH",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for state in HealthState::ALL {
            assert_eq!(HealthState::from_index(state.index()), Some(state));
        }
        assert_eq!(HealthState::from_index(HealthState::COUNT), None);
    }

    #[test]
    fn test_death_states_are_absorbing() {
        for state in HealthState::ALL {
            if state.is_death() {
                assert!(state.is_absorbing());
            }
        }
    }

    #[test]
    fn test_stroke_dead_is_both_stroke_and_death() {
        assert!(HealthState::StrokeDead.is_stroke_event());
        assert!(HealthState::StrokeDead.is_death());
    }

    #[test]
    fn test_well_is_transient() {
        assert!(!HealthState::Well.is_absorbing());
        assert!(!HealthState::Well.is_death());
        assert!(!HealthState::Well.is_stroke_event());
    }
}
