use crate::state::{Commodity, OfferKind, Port};
use crate::systems::battle::BattleOrder;
use serde::{Deserialize, Serialize};

/// Everything a player (or captain AI) can ask of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // Trading
    Buy { item: Commodity, quantity: u32 },
    Sell { item: Commodity, quantity: u32 },
    MoveToWarehouse { item: Commodity, quantity: u32 },
    MoveToShip { item: Commodity, quantity: u32 },

    // Banking
    Deposit { amount: u64 },
    Withdraw { amount: u64 },
    PayDebt { amount: u64 },
    Borrow { amount: u64 },

    // Voyage
    TravelTo { port: Port },
    Battle { order: BattleOrder },

    // Offers
    AcceptOffer { kind: OfferKind, amount: Option<u64> },
    DeclineOffer { kind: OfferKind },

    // Meta
    Retire,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Buy { .. } => "buy",
            Command::Sell { .. } => "sell",
            Command::MoveToWarehouse { .. } => "move_to_warehouse",
            Command::MoveToShip { .. } => "move_to_ship",
            Command::Deposit { .. } => "deposit",
            Command::Withdraw { .. } => "withdraw",
            Command::PayDebt { .. } => "pay_debt",
            Command::Borrow { .. } => "borrow",
            Command::TravelTo { .. } => "travel_to",
            Command::Battle { .. } => "battle",
            Command::AcceptOffer { .. } => "accept_offer",
            Command::DeclineOffer { .. } => "decline_offer",
            Command::Retire => "retire",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let cmd = Command::Buy {
            item: Commodity::GeneralCargo,
            quantity: 5,
        };
        let json = serde_json::to_value(cmd).unwrap();
        assert_eq!(json["command"], "buy");
        assert_eq!(json["item"], "general_cargo");

        let parsed: Command =
            serde_json::from_str(r#"{"command":"battle","order":{"order":"flee"}}"#).unwrap();
        assert_eq!(
            parsed,
            Command::Battle {
                order: BattleOrder::Flee
            }
        );
    }
}
