//! The session: the only command entry point of the core.
//!
//! A [`Session`] owns the [`GameState`], the RNG and the current [`Phase`].
//! Every command checks the phase first, then delegates to a system. A
//! rejected command returns an [`ActionError`] and leaves the state exactly
//! as it was.

use crate::config::{ConfigError, SessionConfig};
use crate::error::ActionError;
use crate::events::GameEvent;
use crate::input::Command;
use crate::invariants::check_invariants;
use crate::state::{CargoReport, Commodity, GameState, Offer, OfferKind, Port, StatusReport};
use crate::systems::battle::{Battle, BattleOrder, BattleOutcome};
use crate::systems::{bank, economy, ledger, offers, travel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Net worth needed to retire.
pub const RETIREMENT_NET_WORTH: i128 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// Went down in a storm.
    Sunk,
    /// Sunk by the enemy in battle.
    ShipLost,
    Retired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AtPort,
    InBattle(Battle),
    GameOver(GameOverReason),
}

/// End-of-voyage summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub firm_name: String,
    pub net_worth: i128,
    pub months: u64,
    /// `net_worth / 100 / months^1.1`.
    pub score: f64,
    pub reason: Option<GameOverReason>,
}

pub struct Session<R: Rng = StdRng> {
    state: GameState,
    rng: R,
    phase: Phase,
}

impl Session<StdRng> {
    /// Start a voyage from `config`, seeding the RNG from it.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "New voyage for {} ({:?}, seed {})",
            config.firm_name,
            config.start,
            config.seed
        );
        Ok(Self::with_rng(
            config.initial_state(),
            StdRng::seed_from_u64(config.seed),
        ))
    }
}

impl<R: Rng> Session<R> {
    /// Resume from an existing state. Prices are recomputed if the ship is in port.
    pub fn with_rng(mut state: GameState, mut rng: R) -> Self {
        if state.port.is_port() {
            state.price = economy::compute_prices(state.port, &mut rng);
        }
        Self {
            state,
            rng,
            phase: Phase::AtPort,
        }
    }

    // ----- Queries -----

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn battle(&self) -> Option<&Battle> {
        match &self.phase {
            Phase::InBattle(battle) => Some(battle),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusReport {
        StatusReport::from(&self.state)
    }

    pub fn prices(&self) -> Vec<(Commodity, u64)> {
        Commodity::ALL
            .iter()
            .map(|&item| (item, self.state.price_of(item)))
            .collect()
    }

    pub fn cargo(&self) -> CargoReport {
        CargoReport::from(&self.state)
    }

    pub fn offers(&self) -> &[Offer] {
        &self.state.offers
    }

    pub fn final_stats(&self) -> FinalStats {
        let months = self.state.elapsed_months();
        let net_worth = self.state.net_worth();
        let score = net_worth as f64 / 100.0 / (months.max(1) as f64).powf(1.1);
        FinalStats {
            firm_name: self.state.firm_name.clone(),
            net_worth,
            months,
            score,
            reason: match self.phase {
                Phase::GameOver(reason) => Some(reason),
                _ => None,
            },
        }
    }

    // ----- Commands -----

    /// Dispatch a [`Command`]. Rejections are logged at `warn`.
    #[instrument(skip_all, name = "command", fields(cmd = command.name()))]
    pub fn execute(&mut self, command: Command) -> Result<Vec<GameEvent>, ActionError> {
        let result = match command {
            Command::Buy { item, quantity } => self.buy(item, quantity),
            Command::Sell { item, quantity } => self.sell(item, quantity),
            Command::MoveToWarehouse { item, quantity } => self.move_to_warehouse(item, quantity),
            Command::MoveToShip { item, quantity } => self.move_to_ship(item, quantity),
            Command::Deposit { amount } => self.deposit(amount),
            Command::Withdraw { amount } => self.withdraw(amount),
            Command::PayDebt { amount } => self.pay_debt(amount),
            Command::Borrow { amount } => self.borrow(amount),
            Command::TravelTo { port } => self.travel_to(port),
            Command::Battle { order } => self.issue_battle_order(order),
            Command::AcceptOffer { kind, amount } => self.accept_offer(kind, amount),
            Command::DeclineOffer { kind } => self.decline_offer(kind),
            Command::Retire => self.retire(),
        };
        if let Err(e) = &result {
            log::warn!("Rejected {}: {}", command.name(), e);
        }
        result
    }

    pub fn buy(&mut self, item: Commodity, quantity: u32) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| ledger::buy(state, item, quantity))
    }

    pub fn sell(&mut self, item: Commodity, quantity: u32) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| ledger::sell(state, item, quantity))
    }

    pub fn move_to_warehouse(
        &mut self,
        item: Commodity,
        quantity: u32,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| ledger::move_to_warehouse(state, item, quantity))
    }

    pub fn move_to_ship(
        &mut self,
        item: Commodity,
        quantity: u32,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| ledger::move_to_ship(state, item, quantity))
    }

    pub fn deposit(&mut self, amount: u64) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| bank::deposit(state, amount))
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| bank::withdraw(state, amount))
    }

    pub fn pay_debt(&mut self, amount: u64) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| bank::pay_debt(state, amount))
    }

    pub fn borrow(&mut self, amount: u64) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        self.single(|state| bank::borrow(state, amount))
    }

    pub fn accept_offer(
        &mut self,
        kind: OfferKind,
        amount: Option<u64>,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        let events = offers::accept_offer(&mut self.state, kind, amount)?;
        self.debug_check();
        Ok(events)
    }

    pub fn decline_offer(&mut self, kind: OfferKind) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        offers::decline_offer(&mut self.state, kind)
    }

    /// Sail to `port`. The voyage either ends at port, in a battle, or at the bottom.
    pub fn travel_to(&mut self, port: Port) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        let outcome = travel::travel_to(&mut self.state, port, &mut self.rng)?;

        if outcome.sunk {
            self.phase = Phase::GameOver(GameOverReason::Sunk);
        } else if let Some(battle) = outcome.battle {
            if !battle.is_resolved() {
                self.phase = Phase::InBattle(battle);
            }
        }
        self.debug_check();
        Ok(outcome.events)
    }

    pub fn issue_battle_order(&mut self, order: BattleOrder) -> Result<Vec<GameEvent>, ActionError> {
        let battle = match &mut self.phase {
            Phase::GameOver(_) => return Err(ActionError::GameOver),
            Phase::AtPort => {
                return Err(ActionError::InvalidOrder(
                    "there is no battle to fight".to_string(),
                ))
            }
            Phase::InBattle(battle) => battle,
        };

        let events = battle.issue_order(order, &mut self.state, &mut self.rng)?;
        match battle.outcome() {
            Some(BattleOutcome::Lost) => {
                self.phase = Phase::GameOver(GameOverReason::ShipLost);
            }
            Some(outcome) => {
                log::info!("Battle over: {:?}", outcome);
                self.phase = Phase::AtPort;
            }
            None => {}
        }
        self.debug_check();
        Ok(events)
    }

    /// Retire in Hong Kong once net worth reaches a million.
    pub fn retire(&mut self) -> Result<Vec<GameEvent>, ActionError> {
        self.require_port()?;
        if self.state.port != Port::HongKong {
            return Err(ActionError::InvalidPort(self.state.port));
        }
        let net_worth = self.state.net_worth();
        if net_worth < RETIREMENT_NET_WORTH {
            return Err(ActionError::InvalidOrder(format!(
                "net worth {net_worth} is short of {RETIREMENT_NET_WORTH}"
            )));
        }

        log::info!("{} retires with {}", self.state.firm_name, net_worth);
        self.phase = Phase::GameOver(GameOverReason::Retired);
        Ok(vec![GameEvent::Retired { net_worth }])
    }

    // ----- Helpers -----

    fn require_port(&self) -> Result<(), ActionError> {
        match self.phase {
            Phase::AtPort => Ok(()),
            Phase::InBattle(_) => Err(ActionError::InvalidOrder(
                "a battle is under way".to_string(),
            )),
            Phase::GameOver(_) => Err(ActionError::GameOver),
        }
    }

    fn single(
        &mut self,
        op: impl FnOnce(&mut GameState) -> Result<GameEvent, ActionError>,
    ) -> Result<Vec<GameEvent>, ActionError> {
        let event = op(&mut self.state)?;
        self.debug_check();
        Ok(vec![event])
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            for violation in check_invariants(&self.state) {
                log::error!("Invariant violated: {}", violation);
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
