//! Bank deposits and Elder Brother Wu's loans.

use crate::error::ActionError;
use crate::events::GameEvent;
use crate::state::{GameState, Port};

fn require_amount(amount: u64) -> Result<(), ActionError> {
    if amount == 0 {
        return Err(ActionError::InvalidQuantity);
    }
    Ok(())
}

fn require_funds(required: u64, available: u64) -> Result<(), ActionError> {
    if required > available {
        return Err(ActionError::InsufficientFunds {
            required,
            available,
        });
    }
    Ok(())
}

/// Wu only does business in Hong Kong.
fn require_hong_kong(state: &GameState) -> Result<(), ActionError> {
    if state.port != Port::HongKong {
        return Err(ActionError::InvalidPort(state.port));
    }
    Ok(())
}

pub fn deposit(state: &mut GameState, amount: u64) -> Result<GameEvent, ActionError> {
    require_amount(amount)?;
    require_funds(amount, state.cash)?;

    state.cash -= amount;
    state.bank = state.bank.saturating_add(amount);
    Ok(GameEvent::Deposited { amount })
}

pub fn withdraw(state: &mut GameState, amount: u64) -> Result<GameEvent, ActionError> {
    require_amount(amount)?;
    require_funds(amount, state.bank)?;

    state.bank -= amount;
    state.cash = state.cash.saturating_add(amount);
    Ok(GameEvent::Withdrew { amount })
}

/// Repay up to `amount`; paying more than is owed only pays the debt.
pub fn pay_debt(state: &mut GameState, amount: u64) -> Result<GameEvent, ActionError> {
    require_amount(amount)?;
    require_hong_kong(state)?;

    let amount = amount.min(state.debt);
    if amount == 0 {
        return Err(ActionError::InvalidOrder("there is no debt to repay".to_string()));
    }
    require_funds(amount, state.cash)?;

    state.cash -= amount;
    state.debt -= amount;
    Ok(GameEvent::DebtPaid {
        amount,
        remaining: state.debt,
    })
}

/// Wu lends at most twice the cash on hand.
pub fn borrow(state: &mut GameState, amount: u64) -> Result<GameEvent, ActionError> {
    require_amount(amount)?;
    require_hong_kong(state)?;

    let limit = state.cash.saturating_mul(2);
    if amount > limit {
        return Err(ActionError::InsufficientFunds {
            required: amount,
            available: limit,
        });
    }

    state.cash = state.cash.saturating_add(amount);
    state.debt = state.debt.saturating_add(amount);
    log::info!("Borrowed {} from Elder Brother Wu (debt {})", amount, state.debt);
    Ok(GameEvent::Borrowed {
        amount,
        debt: state.debt,
    })
}
