//! Answering the offers raised on arrival.

use crate::error::ActionError;
use crate::events::GameEvent;
use crate::state::{GameState, LiYuenRelation, Offer, OfferKind};
use crate::systems::port_events::SHIP_UPGRADE;

/// Accept the pending offer of `kind`.
///
/// `amount` is only used by [`OfferKind::Repair`] (cash to spend; `None`
/// repairs everything affordable). On error the offer stays pending.
pub fn accept_offer(
    state: &mut GameState,
    kind: OfferKind,
    amount: Option<u64>,
) -> Result<Vec<GameEvent>, ActionError> {
    let offer = state.offer(kind).ok_or(ActionError::NoSuchOffer(kind))?;

    let event = match offer {
        Offer::LiYuenDemand { amount } => pay_li_yuen(state, amount),
        Offer::Repair { rate } => repair(state, rate, amount)?,
        Offer::NewShip { price } => {
            charge(state, price)?;
            state.capacity += SHIP_UPGRADE;
            state.damage = 0;
            GameEvent::ShipUpgraded {
                capacity: state.capacity,
                price,
            }
        }
        Offer::NewGun { price } => {
            charge(state, price)?;
            state.guns += 1;
            GameEvent::GunBought {
                guns: state.guns,
                price,
            }
        }
        Offer::Bailout { loan, repay } => {
            state.cash = state.cash.saturating_add(loan);
            state.debt = state.debt.saturating_add(repay);
            state.wu_bailouts += 1;
            log::info!("Elder Brother Wu lends {} against {}", loan, repay);
            GameEvent::BailoutAccepted { loan, repay }
        }
    };

    state.take_offer(kind);
    Ok(vec![event])
}

/// Turn down the pending offer of `kind`.
pub fn decline_offer(state: &mut GameState, kind: OfferKind) -> Result<Vec<GameEvent>, ActionError> {
    state.take_offer(kind).ok_or(ActionError::NoSuchOffer(kind))?;
    Ok(vec![GameEvent::OfferDeclined { kind }])
}

fn charge(state: &mut GameState, price: u64) -> Result<(), ActionError> {
    if price > state.cash {
        return Err(ActionError::InsufficientFunds {
            required: price,
            available: state.cash,
        });
    }
    state.cash -= price;
    Ok(())
}

/// Agreeing without the cash to cover it costs everything on hand.
fn pay_li_yuen(state: &mut GameState, amount: u64) -> GameEvent {
    if state.cash >= amount {
        state.cash -= amount;
        state.li_yuen_relation = LiYuenRelation::Paid;
        log::info!("Paid Li Yuen {}", amount);
        GameEvent::LiYuenPaid { amount }
    } else {
        let lost = state.cash;
        state.cash = 0;
        log::info!("Could not cover Li Yuen's {}, lost {}", amount, lost);
        GameEvent::LiYuenShortchanged { lost }
    }
}

fn repair(state: &mut GameState, rate: u64, amount: Option<u64>) -> Result<GameEvent, ActionError> {
    let budget = amount.unwrap_or(state.cash);
    if budget == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    if budget > state.cash {
        return Err(ActionError::InsufficientFunds {
            required: budget,
            available: state.cash,
        });
    }

    let units = (budget / rate).min(u64::from(state.damage)) as u32;
    if units == 0 {
        return Err(ActionError::InsufficientFunds {
            required: rate,
            available: budget,
        });
    }

    let cost = u64::from(units) * rate;
    state.cash -= cost;
    state.damage -= units;
    Ok(GameEvent::ShipRepaired {
        units,
        cost,
        damage: state.damage,
    })
}
