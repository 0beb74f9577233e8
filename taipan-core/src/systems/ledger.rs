//! Cargo ledger: trading and hold/warehouse transfers.
//!
//! Every operation validates first and mutates second, so a rejected command
//! leaves the state untouched. Invariants maintained here:
//!
//! - `hold == sum(hold_by_item)` and `hold <= capacity`
//! - `sum(warehouse) <= WAREHOUSE_CAPACITY`

use crate::error::ActionError;
use crate::events::GameEvent;
use crate::state::{Commodity, GameState, WAREHOUSE_CAPACITY};
use serde::{Deserialize, Serialize};

fn require_quantity(qty: u32) -> Result<(), ActionError> {
    if qty == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    Ok(())
}

fn require_market(state: &GameState) -> Result<(), ActionError> {
    if !state.port.is_port() {
        return Err(ActionError::InvalidPort(state.port));
    }
    Ok(())
}

fn require_hold_space(state: &GameState, qty: u32) -> Result<(), ActionError> {
    if state.hold.saturating_add(qty) > state.capacity {
        return Err(ActionError::OverCapacity {
            required: qty,
            free: state.free_hold(),
        });
    }
    Ok(())
}

fn require_aboard(state: &GameState, item: Commodity, qty: u32) -> Result<(), ActionError> {
    let available = state.held(item);
    if qty > available {
        return Err(ActionError::InsufficientCargo {
            item,
            requested: qty,
            available,
        });
    }
    Ok(())
}

fn unload(state: &mut GameState, item: Commodity, qty: u32) {
    state.hold_by_item[item.index()] -= qty;
    state.hold -= qty;
}

fn load(state: &mut GameState, item: Commodity, qty: u32) {
    state.hold_by_item[item.index()] += qty;
    state.hold += qty;
}

pub fn buy(state: &mut GameState, item: Commodity, qty: u32) -> Result<GameEvent, ActionError> {
    require_quantity(qty)?;
    require_market(state)?;

    let cost = u64::from(qty)
        .checked_mul(state.price_of(item))
        .ok_or(ActionError::InsufficientFunds {
            required: u64::MAX,
            available: state.cash,
        })?;
    if cost > state.cash {
        return Err(ActionError::InsufficientFunds {
            required: cost,
            available: state.cash,
        });
    }
    require_hold_space(state, qty)?;

    state.cash -= cost;
    load(state, item, qty);
    log::debug!("Bought {} {} for {}", qty, item, cost);
    Ok(GameEvent::Bought {
        item,
        quantity: qty,
        cost,
    })
}

pub fn sell(state: &mut GameState, item: Commodity, qty: u32) -> Result<GameEvent, ActionError> {
    require_quantity(qty)?;
    require_market(state)?;
    require_aboard(state, item, qty)?;

    let revenue = u64::from(qty).saturating_mul(state.price_of(item));
    state.cash = state.cash.saturating_add(revenue);
    unload(state, item, qty);
    log::debug!("Sold {} {} for {}", qty, item, revenue);
    Ok(GameEvent::Sold {
        item,
        quantity: qty,
        revenue,
    })
}

pub fn move_to_warehouse(
    state: &mut GameState,
    item: Commodity,
    qty: u32,
) -> Result<GameEvent, ActionError> {
    require_quantity(qty)?;
    require_market(state)?;
    require_aboard(state, item, qty)?;

    let stored = state.total_warehouse();
    if stored.saturating_add(qty) > WAREHOUSE_CAPACITY {
        return Err(ActionError::WarehouseFull {
            required: qty,
            free: WAREHOUSE_CAPACITY.saturating_sub(stored),
        });
    }

    unload(state, item, qty);
    state.warehouse[item.index()] += qty;
    Ok(GameEvent::MovedToWarehouse {
        item,
        quantity: qty,
    })
}

pub fn move_to_ship(
    state: &mut GameState,
    item: Commodity,
    qty: u32,
) -> Result<GameEvent, ActionError> {
    require_quantity(qty)?;
    require_market(state)?;

    let available = state.stored(item);
    if qty > available {
        return Err(ActionError::InsufficientCargo {
            item,
            requested: qty,
            available,
        });
    }
    require_hold_space(state, qty)?;

    state.warehouse[item.index()] -= qty;
    load(state, item, qty);
    Ok(GameEvent::MovedToShip {
        item,
        quantity: qty,
    })
}

/// What to throw overboard during a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "what", rename_all = "snake_case")]
pub enum Jettison {
    Item { item: Commodity, quantity: u32 },
    Everything,
}

/// Check a jettison without applying it.
pub fn validate_jettison(state: &GameState, jettison: Jettison) -> Result<(), ActionError> {
    match jettison {
        Jettison::Item { item, quantity } => {
            require_quantity(quantity)?;
            require_aboard(state, item, quantity)
        }
        Jettison::Everything if state.hold == 0 => Err(ActionError::InvalidOrder(
            "there is no cargo to throw overboard".to_string(),
        )),
        Jettison::Everything => Ok(()),
    }
}

/// Discard cargo with no payment. Works anywhere, including at sea.
pub fn jettison(state: &mut GameState, jettison: Jettison) -> Result<Vec<GameEvent>, ActionError> {
    validate_jettison(state, jettison)?;

    let mut events = Vec::new();
    match jettison {
        Jettison::Item { item, quantity } => {
            unload(state, item, quantity);
            events.push(GameEvent::CargoThrown { item, quantity });
        }
        Jettison::Everything => {
            for item in Commodity::ALL {
                let quantity = state.held(item);
                if quantity > 0 {
                    unload(state, item, quantity);
                    events.push(GameEvent::CargoThrown { item, quantity });
                }
            }
        }
    }
    Ok(events)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::invariants::check_invariants;
    use crate::testing::GameStateBuilder;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Buy(usize, u32),
        Sell(usize, u32),
        Store(usize, u32),
        Load(usize, u32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        (0..4usize, 0..4usize, 0..120u32).prop_map(|(kind, item, qty)| match kind {
            0 => Op::Buy(item, qty),
            1 => Op::Sell(item, qty),
            2 => Op::Store(item, qty),
            _ => Op::Load(item, qty),
        })
    }

    proptest! {
        #[test]
        fn prop_ledger_preserves_invariants(
            ops in proptest::collection::vec(op_strategy(), 1..60),
            cash in 0..200_000u64,
        ) {
            let mut state = GameStateBuilder::new()
                .cash(cash)
                .capacity(100)
                .price(Commodity::Opium, 5000)
                .price(Commodity::Silk, 700)
                .price(Commodity::Arms, 60)
                .price(Commodity::GeneralCargo, 7)
                .warehouse_item(Commodity::Silk, 9_950)
                .build();

            for op in ops {
                let before = state.clone();
                let result = match op {
                    Op::Buy(i, q) => buy(&mut state, Commodity::ALL[i], q),
                    Op::Sell(i, q) => sell(&mut state, Commodity::ALL[i], q),
                    Op::Store(i, q) => move_to_warehouse(&mut state, Commodity::ALL[i], q),
                    Op::Load(i, q) => move_to_ship(&mut state, Commodity::ALL[i], q),
                };
                if result.is_err() {
                    prop_assert_eq!(&state, &before);
                }
                prop_assert!(check_invariants(&state).is_empty());
            }
        }

        #[test]
        fn prop_transfers_conserve_item_totals(
            item in 0..4usize,
            aboard in 0..100u32,
            stored in 0..1000u32,
            moves in proptest::collection::vec((any::<bool>(), 1..150u32), 1..30),
        ) {
            let item = Commodity::ALL[item];
            let mut state = GameStateBuilder::new()
                .capacity(100)
                .hold_item(item, aboard)
                .warehouse_item(item, stored)
                .build();
            let total = aboard + stored;

            for (to_warehouse, qty) in moves {
                let _ = if to_warehouse {
                    move_to_warehouse(&mut state, item, qty)
                } else {
                    move_to_ship(&mut state, item, qty)
                };
                prop_assert_eq!(state.held(item) + state.stored(item), total);
            }
        }

        #[test]
        fn prop_buy_then_sell_restores_cash(
            item in 0..4usize,
            qty in 1..60u32,
            price in 1..10_000u64,
        ) {
            let item = Commodity::ALL[item];
            let mut state = GameStateBuilder::new()
                .cash(1_000_000)
                .capacity(60)
                .price(item, price)
                .build();
            let before = state.clone();

            buy(&mut state, item, qty).unwrap();
            sell(&mut state, item, qty).unwrap();

            prop_assert_eq!(state.cash, before.cash);
            prop_assert_eq!(state.hold, before.hold);
            prop_assert_eq!(state.hold_by_item, before.hold_by_item);
        }
    }
}
