//! Commodity pricing.
//!
//! Each port has a fixed base column per commodity; the arrival draw picks a
//! multiplier of 1, 2 or 3 for each commodity independently:
//!
//! `price = floor(base[item][port] / 2) * multiplier * base[item][0]`
//!
//! Column 0 doubles as the commodity's scale (Opium 1000, Silk 100, ...), and
//! because the "At sea" entry is never used as a market every price there is 0.

use crate::dice;
use crate::events::GameEvent;
use crate::state::{Commodity, GameState, Port, COMMODITY_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Base price table, indexed `[commodity][port]`.
pub const BASE_PRICES: [[u64; 8]; COMMODITY_COUNT] = [
    [1000, 11, 16, 15, 14, 12, 10, 13], // Opium
    [100, 11, 14, 15, 16, 10, 13, 12],  // Silk
    [10, 12, 16, 10, 11, 13, 14, 15],   // Arms
    [1, 10, 11, 12, 13, 14, 15, 16],    // General Cargo
];

/// Price of `item` at `port` for a given multiplier (no randomness).
pub fn price_for(item: Commodity, port: Port, multiplier: u64) -> u64 {
    if !port.is_port() {
        return 0;
    }
    let row = &BASE_PRICES[item.index()];
    (row[port.index()] / 2) * multiplier * row[0]
}

/// Draw a fresh price for every commodity at `port`.
pub fn compute_prices<R: Rng + ?Sized>(port: Port, rng: &mut R) -> [u64; COMMODITY_COUNT] {
    let mut prices = [0; COMMODITY_COUNT];
    for item in Commodity::ALL {
        let multiplier = u64::from(dice::between(rng, 1, 3));
        prices[item.index()] = price_for(item, port, multiplier);
    }
    prices
}

/// Mean price of `item` across all ports at the middle multiplier.
///
/// Used as a reference for "cheap" vs "dear" by the captain AI.
pub fn reference_price(item: Commodity) -> u64 {
    let total: u64 = Port::DESTINATIONS
        .iter()
        .map(|&port| price_for(item, port, 2))
        .sum();
    total / Port::DESTINATIONS.len() as u64
}

/// A one-off market swing drawn during port events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceShock {
    pub item: Commodity,
    /// `None` means prices crash to a fifth; `Some(m)` multiplies by `m`.
    pub surge: Option<u64>,
}

impl PriceShock {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let item = Commodity::ALL[dice::between(rng, 0, 3) as usize];
        let surge = if dice::one_in(rng, 2) {
            None
        } else {
            Some(u64::from(dice::between(rng, 5, 9)))
        };
        Self { item, surge }
    }

    pub fn apply(&self, price: u64) -> u64 {
        match self.surge {
            None => price / 5,
            Some(multiplier) => price.saturating_mul(multiplier),
        }
    }
}

/// Recompute prices for the current port and apply a pending shock.
///
/// Last step of every arrival.
#[instrument(skip_all, name = "price_refresh")]
pub fn refresh_prices<R: Rng + ?Sized>(
    state: &mut GameState,
    shock: Option<PriceShock>,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    state.price = compute_prices(state.port, rng);
    if let Some(shock) = shock {
        let idx = shock.item.index();
        state.price[idx] = shock.apply(state.price[idx]);
        log::info!(
            "Price shock at {}: {} now {}",
            state.port,
            shock.item,
            state.price[idx]
        );
        events.push(GameEvent::PriceShock {
            item: shock.item,
            price: state.price[idx],
            surge: shock.surge.is_some(),
        });
    }
    events.push(GameEvent::PricesUpdated {
        port: state.port,
        prices: state.price,
    });
}
