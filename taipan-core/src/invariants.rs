//! Cargo and hull invariants.
//!
//! Every successful command must leave these intact. They are bug detectors,
//! checked by tests and by the session in debug builds.

use crate::state::{GameState, WAREHOUSE_CAPACITY};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("hold is {hold} but cargo aboard sums to {sum}")]
    HoldMismatch { hold: u32, sum: u32 },
    #[error("hold {hold} exceeds capacity {capacity}")]
    HoldOverCapacity { hold: u32, capacity: u32 },
    #[error("warehouse holds {total} units, limit is {}", WAREHOUSE_CAPACITY)]
    WarehouseOverfull { total: u32 },
    #[error("damage {damage} exceeds capacity {capacity}")]
    DamageOverCapacity { damage: u32, capacity: u32 },
}

/// Check all invariants. Returns an empty list when the state is sound.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let sum: u32 = state.hold_by_item.iter().sum();
    if state.hold != sum {
        violations.push(InvariantViolation::HoldMismatch {
            hold: state.hold,
            sum,
        });
    }

    if state.hold > state.capacity {
        violations.push(InvariantViolation::HoldOverCapacity {
            hold: state.hold,
            capacity: state.capacity,
        });
    }

    let total = state.total_warehouse();
    if total > WAREHOUSE_CAPACITY {
        violations.push(InvariantViolation::WarehouseOverfull { total });
    }

    if state.damage > state.capacity {
        violations.push(InvariantViolation::DamageOverCapacity {
            damage: state.damage,
            capacity: state.capacity,
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_sound() {
        assert!(check_invariants(&GameState::default()).is_empty());
    }

    #[test]
    fn test_detects_each_violation() {
        let mut state = GameState {
            capacity: 10,
            hold: 12,
            damage: 11,
            ..Default::default()
        };
        state.hold_by_item[0] = 5;
        state.warehouse[2] = WAREHOUSE_CAPACITY + 1;

        let violations = check_invariants(&state);

        assert_eq!(violations.len(), 4);
        assert_eq!(
            violations[0],
            InvariantViolation::HoldMismatch { hold: 12, sum: 5 }
        );
        assert_eq!(
            violations[3].to_string(),
            "damage 11 exceeds capacity 10"
        );
    }
}
