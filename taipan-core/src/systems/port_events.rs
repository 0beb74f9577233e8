//! Arrival events: extortion, offers, seizures, thefts and market swings.
//!
//! The order of checks is fixed and each one draws from the shared RNG only
//! when its preconditions hold, so a seed replays the same sequence of
//! events for the same state.

use crate::dice;
use crate::events::GameEvent;
use crate::state::{Commodity, GameState, LiYuenRelation, Offer, Port};
use crate::systems::economy::PriceShock;
use rand::Rng;
use tracing::instrument;

/// Debt at which Elder Brother Wu sends his first warning.
pub const WU_WARNING_DEBT: u64 = 10_000;

/// Cash above which the firm becomes a target for robbers.
pub const ROBBERY_THRESHOLD: u64 = 25_000;

/// Guns a ship can carry before gun offers stop.
pub const MAX_GUNS: u32 = 1000;

/// Capacity added by a new ship.
pub const SHIP_UPGRADE: u32 = 50;

/// Run every port event for the port just reached.
///
/// Returns the price shock to apply once prices are refreshed.
#[instrument(skip_all, name = "port_events")]
pub fn run_port_events<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<PriceShock> {
    let in_hong_kong = state.port == Port::HongKong;
    let t = state.elapsed_months();

    if in_hong_kong && state.li_yuen_relation == LiYuenRelation::Unpaid && state.cash > 0 {
        let amount = li_yuen_demand(state, rng);
        log::info!("Li Yuen asks {} in donation", amount);
        state.push_offer(Offer::LiYuenDemand { amount });
        events.push(GameEvent::LiYuenDemand { amount });
    }

    if in_hong_kong && state.damage > 0 {
        let rate = repair_rate(state, rng);
        state.push_offer(Offer::Repair { rate });
        events.push(GameEvent::RepairOffered {
            rate,
            full_cost: rate.saturating_mul(u64::from(state.damage)),
        });
    }

    if in_hong_kong && state.debt >= WU_WARNING_DEBT && state.wu_warnings == 0 {
        state.wu_warnings += 1;
        log::info!("Elder Brother Wu warns about a debt of {}", state.debt);
        events.push(GameEvent::WuWarning { debt: state.debt });
    }

    if in_hong_kong && is_destitute(state) {
        let loan = u64::from(dice::between(rng, 500, 1999));
        let repay = 1500 + dice::below_u64(rng, 2000) * u64::from(state.wu_bailouts);
        state.push_offer(Offer::Bailout { loan, repay });
        events.push(GameEvent::BailoutOffered { loan, repay });
    }

    if dice::one_in(rng, 4) {
        if dice::one_in(rng, 2) {
            let price = (1000 + dice::below_u64(rng, 1000 * (t + 5) / 6))
                * (u64::from(state.capacity) / 50)
                + 1000;
            state.push_offer(Offer::NewShip { price });
            events.push(GameEvent::ShipOffered {
                price,
                capacity: state.capacity + SHIP_UPGRADE,
            });
        } else if state.guns < MAX_GUNS {
            let price = dice::below_u64(rng, 1000 * (t + 5) / 6) + 500;
            state.push_offer(Offer::NewGun { price });
            events.push(GameEvent::GunOffered { price });
        }
    }

    if !in_hong_kong && dice::one_in(rng, 18) && state.held(Commodity::Opium) > 0 {
        let quantity = state.held(Commodity::Opium);
        let fine = ((state.cash as f64 / 1.8 * dice::unit(rng)) as u64).min(state.cash);
        state.hold_by_item[Commodity::Opium.index()] = 0;
        state.hold -= quantity;
        state.cash -= fine;
        log::info!("Opium seized: {} units, fined {}", quantity, fine);
        events.push(GameEvent::OpiumSeized { quantity, fine });
    }

    if dice::one_in(rng, 50) && state.total_warehouse() > 0 {
        let before = state.total_warehouse();
        for stock in state.warehouse.iter_mut() {
            *stock = (f64::from(*stock) / 1.8 * dice::unit(rng)) as u32;
        }
        let stolen = before - state.total_warehouse();
        log::info!("Warehouse robbed: {} units stolen", stolen);
        events.push(GameEvent::WarehouseRobbed { stolen });
    }

    if dice::one_in(rng, 20) && state.li_yuen_relation == LiYuenRelation::Paid {
        state.li_yuen_relation = LiYuenRelation::Unpaid;
        events.push(GameEvent::LiYuenRelationLapsed);
    }

    if !in_hong_kong && state.li_yuen_relation == LiYuenRelation::Unpaid && !dice::one_in(rng, 4)
    {
        events.push(GameEvent::LiYuenSummons);
    }

    let shock = if dice::one_in(rng, 9) {
        Some(PriceShock::draw(rng))
    } else {
        None
    };

    if state.cash > ROBBERY_THRESHOLD && dice::one_in(rng, 20) {
        let amount = ((state.cash as f64 / 1.4 * dice::unit(rng)) as u64).min(state.cash);
        state.cash -= amount;
        log::info!("Robbed of {}", amount);
        events.push(GameEvent::Robbed { amount });
    }

    shock
}

/// Li Yuen's asking price.
///
/// In the first year it is a share of the cash on hand; afterwards it is a
/// draw of `1000t..=2000t` and ignores cash.
pub fn li_yuen_demand<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> u64 {
    let t = state.elapsed_months();
    if t > 12 {
        dice::between_u64(rng, 1000 * t, 2000 * t)
    } else {
        (state.cash as f64 / 1.8 * dice::unit(rng)) as u64
    }
}

/// McHenry's price per unit of damage, never less than 1.
pub fn repair_rate<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> u64 {
    let t = state.elapsed_months() as f64;
    let per_unit = (60.0 * (t + 3.0) / 4.0) * dice::unit(rng) + 25.0 * (t + 3.0) / 4.0;
    let rate = per_unit as u64 * u64::from(state.capacity) / 50;
    rate.max(1)
}

/// Nothing left to lose: Wu takes pity.
fn is_destitute(state: &GameState) -> bool {
    state.cash == 0
        && state.bank == 0
        && state.guns == 0
        && state.hold == 0
        && state.total_warehouse() == 0
}
