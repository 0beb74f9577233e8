use crate::ai::Captain;
use crate::input::Command;
use crate::session::RETIREMENT_NET_WORTH;
use crate::state::{Commodity, GameState, Offer, OfferKind, Port};
use crate::systems::battle::{Battle, BattleOrder};
use crate::systems::economy::reference_price;
use crate::systems::port_events::ROBBERY_THRESHOLD;

/// A deterministic, priority-based captain.
///
/// At each port it answers offers, settles debt it can afford, sells
/// whatever fetches at least the reference price, fills the hold with the
/// cheapest goods, banks spare cash in Hong Kong and sails on along a fixed
/// route. In battle it fights while the hull holds and it has guns.
#[derive(Default)]
pub struct GreedyCaptain {
    leg: usize,
}

impl GreedyCaptain {
    pub fn new() -> Self {
        Self::default()
    }

    fn battle_order(&self, state: &GameState) -> BattleOrder {
        if state.guns > 0 && state.damage * 2 < state.capacity {
            BattleOrder::Fight
        } else {
            BattleOrder::Flee
        }
    }

    fn answer_offer(&self, state: &GameState, offer: Offer) -> Command {
        let kind = offer.kind();
        let accept = match offer {
            Offer::LiYuenDemand { amount } => state.cash >= amount,
            Offer::Repair { rate } => state.cash >= rate,
            Offer::NewShip { price } => state.cash >= price.saturating_mul(2),
            Offer::NewGun { price } => state.cash >= price.saturating_mul(3) && state.guns < 20,
            Offer::Bailout { .. } => true,
        };
        if accept {
            Command::AcceptOffer { kind, amount: None }
        } else {
            Command::DeclineOffer { kind }
        }
    }

    /// Highest-priced holding worth selling here.
    fn sale(&self, state: &GameState) -> Option<Command> {
        Commodity::ALL
            .iter()
            .copied()
            .filter(|&item| state.held(item) > 0 && state.price_of(item) >= reference_price(item))
            .max_by_key(|&item| state.price_of(item) * u64::from(state.held(item)))
            .map(|item| Command::Sell {
                item,
                quantity: state.held(item),
            })
    }

    /// Cheapest goods relative to their reference price, as many as fit.
    fn purchase(&self, state: &GameState) -> Option<Command> {
        let mut candidates: Vec<Commodity> = Commodity::ALL
            .iter()
            .copied()
            .filter(|&item| {
                let price = state.price_of(item);
                price > 0 && price < reference_price(item)
            })
            .collect();
        // Ratio ordering without floats: a/ra < b/rb  <=>  a*rb < b*ra.
        candidates.sort_by_key(|&item| {
            let others: u64 = Commodity::ALL
                .iter()
                .filter(|&&other| other != item)
                .map(|&other| reference_price(other))
                .product();
            state.price_of(item).saturating_mul(others)
        });

        candidates.into_iter().find_map(|item| {
            let affordable = state.cash / state.price_of(item);
            let quantity = affordable.min(u64::from(state.free_hold())) as u32;
            (quantity > 0).then_some(Command::Buy { item, quantity })
        })
    }

    fn next_port(&mut self, state: &GameState) -> Port {
        loop {
            let port = Port::DESTINATIONS[self.leg % Port::DESTINATIONS.len()];
            self.leg += 1;
            if port != state.port {
                return port;
            }
        }
    }
}

impl Captain for GreedyCaptain {
    fn decide(&mut self, state: &GameState, battle: Option<&Battle>) -> Command {
        if battle.is_some() {
            return Command::Battle {
                order: self.battle_order(state),
            };
        }

        if let Some(&offer) = state.offers.first() {
            return self.answer_offer(state, offer);
        }

        let in_hong_kong = state.port == Port::HongKong;
        if in_hong_kong && state.net_worth() >= RETIREMENT_NET_WORTH {
            return Command::Retire;
        }
        if in_hong_kong && state.debt > 0 && state.cash >= state.debt.saturating_add(1000) {
            return Command::PayDebt { amount: state.debt };
        }

        if let Some(command) = self.sale(state) {
            return command;
        }
        if let Some(command) = self.purchase(state) {
            return command;
        }

        if in_hong_kong && state.cash > ROBBERY_THRESHOLD {
            return Command::Deposit {
                amount: state.cash - ROBBERY_THRESHOLD,
            };
        }

        Command::TravelTo {
            port: self.next_port(state),
        }
    }
}
