use crate::state::{Commodity, OfferKind, Port};
use thiserror::Error;

/// Why a command was rejected.
///
/// Every variant is recoverable: the command had no effect on the game state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Insufficient {item}: requested {requested}, available {available}")]
    InsufficientCargo {
        item: Commodity,
        requested: u32,
        available: u32,
    },

    #[error("Hold over capacity: {required} units needed, {free} free")]
    OverCapacity { required: u32, free: u32 },

    #[error("Warehouse full: {required} units needed, {free} free")]
    WarehouseFull { required: u32, free: u32 },

    #[error("Invalid port: {0}")]
    InvalidPort(Port),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("Ship overloaded: {hold} units aboard, capacity {capacity}")]
    ShipOverloaded { hold: u32, capacity: u32 },

    #[error("No pending {0:?} offer")]
    NoSuchOffer(OfferKind),

    #[error("The game is over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ActionError::InsufficientFunds {
            required: 500,
            available: 100,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: required 500, available 100"
        );

        let err = ActionError::InsufficientCargo {
            item: Commodity::GeneralCargo,
            requested: 3,
            available: 1,
        };
        assert!(err.to_string().contains("General Cargo"));
        assert_eq!(
            ActionError::InvalidPort(Port::AtSea).to_string(),
            "Invalid port: At sea"
        );
    }
}
