//! Game systems. Each one reads and mutates [`GameState`](crate::state::GameState)
//! and reports what happened as [`GameEvent`](crate::events::GameEvent)s.

pub mod bank;
pub mod battle;
pub mod economy;
pub mod ledger;
pub mod offers;
pub mod port_events;
pub mod travel;

pub use battle::{Battle, BattleOrder, BattleOutcome, BattlePhase, EnemyType};
pub use economy::{compute_prices, reference_price, PriceShock};
pub use ledger::Jettison;
pub use travel::TravelOutcome;
