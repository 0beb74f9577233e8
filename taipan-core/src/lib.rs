//! # Taipan Simulation Core
//!
//! Deterministic simulation of a 19th-century South China Sea trading voyage.
//!
//! The crate is the whole game minus presentation: commands go in, a new
//! state and a list of events come out. All randomness is drawn from one
//! seedable RNG, so a seed and a command sequence replay a voyage exactly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Captain AI │────▶│   Command    │────▶│   Session    │
//! │  or player  │     │ (validated)  │     │ (phase FSM)  │
//! └─────────────┘     └──────────────┘     └──────┬───────┘
//!                                                 │
//!                ┌──────────────┬─────────────────┼──────────────┐
//!                ▼              ▼                 ▼              ▼
//!          ┌──────────┐   ┌──────────┐     ┌────────────┐  ┌──────────┐
//!          │  ledger  │   │   bank   │     │   travel   │  │  battle  │
//!          │  offers  │   │          │     │ port evts  │  │          │
//!          └────┬─────┘   └────┬─────┘     └─────┬──────┘  └────┬─────┘
//!               └──────────────┴────────┬────────┴──────────────┘
//!                                       ▼
//!                           ┌──────────────────────┐
//!                           │ GameState + events   │
//!                           └──────────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`GameState`] | The single mutable aggregate (cash, cargo, ship, date) |
//! | [`Session`] | Owns state, RNG and phase; the only command entry point |
//! | [`Command`] | Everything a player can ask (Buy, TravelTo, Battle, ...) |
//! | [`GameEvent`] | What happened, in order, for the presentation to render |
//! | [`Battle`] | Multi-round naval encounter state machine |
//! | [`Captain`] | Trait for automated decision making |
//!
//! ## Captains
//!
//! - [`GreedyCaptain`]: Deterministic trade-and-sail heuristics
//! - [`RandomCaptain`]: Random commands for exercising the rules

pub mod ai;
pub mod config;
pub mod dice;
pub mod error;
pub mod events;
pub mod input;
pub mod invariants;
pub mod session;
pub mod state;
pub mod systems;
pub mod testing;

pub use ai::{Captain, GreedyCaptain, RandomCaptain};
pub use config::{ConfigError, SessionConfig, StartingPosition};
pub use error::ActionError;
pub use events::GameEvent;
pub use input::Command;
pub use invariants::{check_invariants, InvariantViolation};
pub use session::{FinalStats, GameOverReason, Phase, Session};
pub use state::{
    CargoReport, Commodity, GameState, LiYuenRelation, Offer, OfferKind, Port, StatusReport,
};
pub use systems::{
    compute_prices, Battle, BattleOrder, BattleOutcome, BattlePhase, EnemyType, Jettison,
};
