//! Automated captains.
//!
//! A [`Captain`] looks at the game state (and the battle, if one is under
//! way) and picks the next [`Command`]. The session validates it like any
//! other command, so a captain never needs to be right, only deterministic.
//!
//! Built-in implementations:
//! - [`GreedyCaptain`]: buys cheap, sells dear, pays off Wu, retires rich
//! - [`RandomCaptain`]: seeded random commands, for exercising the rules

pub mod greedy;

pub use greedy::GreedyCaptain;

use crate::input::Command;
use crate::state::{Commodity, GameState, OfferKind, Port};
use crate::systems::battle::{Battle, BattleOrder};
use crate::systems::ledger::Jettison;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait Captain: Send {
    /// Choose the next command.
    ///
    /// `battle` is `Some` while the session is in battle; only battle orders
    /// are accepted then.
    fn decide(&mut self, state: &GameState, battle: Option<&Battle>) -> Command;
}

/// Captain that issues random, often invalid, commands.
pub struct RandomCaptain {
    rng: StdRng,
}

impl RandomCaptain {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn item(&mut self) -> Commodity {
        Commodity::ALL[self.rng.gen_range(0..Commodity::ALL.len())]
    }
}

impl Captain for RandomCaptain {
    fn decide(&mut self, state: &GameState, battle: Option<&Battle>) -> Command {
        if battle.is_some() {
            let order = match self.rng.gen_range(0..3) {
                0 => BattleOrder::Fight,
                1 => BattleOrder::Flee,
                _ => BattleOrder::ThrowCargo {
                    jettison: Jettison::Item {
                        item: self.item(),
                        quantity: self.rng.gen_range(1..20),
                    },
                },
            };
            return Command::Battle { order };
        }

        let amount = self.rng.gen_range(0..=state.cash.max(1).saturating_mul(2));
        let quantity = self.rng.gen_range(0..40);
        match self.rng.gen_range(0..12) {
            0 | 1 => Command::Buy {
                item: self.item(),
                quantity,
            },
            2 | 3 => Command::Sell {
                item: self.item(),
                quantity,
            },
            4 => Command::MoveToWarehouse {
                item: self.item(),
                quantity,
            },
            5 => Command::MoveToShip {
                item: self.item(),
                quantity,
            },
            6 => Command::Deposit { amount },
            7 => Command::Withdraw { amount },
            8 => Command::PayDebt { amount },
            9 => Command::Borrow { amount },
            10 => {
                let kinds = [
                    OfferKind::LiYuenDemand,
                    OfferKind::Repair,
                    OfferKind::NewShip,
                    OfferKind::NewGun,
                    OfferKind::Bailout,
                ];
                let kind = *kinds.choose(&mut self.rng).unwrap_or(&OfferKind::Repair);
                if self.rng.gen_bool(0.5) {
                    Command::AcceptOffer { kind, amount: None }
                } else {
                    Command::DeclineOffer { kind }
                }
            }
            _ => {
                let port = *Port::ALL.choose(&mut self.rng).unwrap_or(&Port::HongKong);
                Command::TravelTo { port }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionConfig, StartingPosition};
    use crate::invariants::check_invariants;
    use crate::session::Session;

    #[test]
    fn test_random_captain_never_breaks_invariants() {
        for seed in 0..10 {
            let config = SessionConfig {
                seed,
                start: if seed % 2 == 0 {
                    StartingPosition::CashAndDebt
                } else {
                    StartingPosition::Guns
                },
                battle_probability: Some(40),
                ..Default::default()
            };
            let mut session = Session::new(&config).unwrap();
            let mut captain = RandomCaptain::new(seed);

            for _ in 0..2000 {
                if session.is_over() {
                    break;
                }
                let before = session.state().clone();
                let command = captain.decide(session.state(), session.battle());
                if session.execute(command).is_err() {
                    assert_eq!(session.state(), &before, "seed {seed}: {command:?}");
                }
                let violations = check_invariants(session.state());
                assert!(violations.is_empty(), "seed {seed}: {violations:?}");
            }
        }
    }
}
