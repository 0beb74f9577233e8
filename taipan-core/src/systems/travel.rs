//! The arrival pipeline.
//!
//! Steps run in a fixed order and each can stop or reshape the ones after it:
//!
//! 1. Storm (may sink the ship or blow it off course)
//! 2. Month rollover (yearly enemy tuning)
//! 3. Interest on debt and bank
//! 4. Port events
//! 5. Battle trigger
//! 6. Price refresh (always last)

use crate::dice;
use crate::error::ActionError;
use crate::events::GameEvent;
use crate::state::{GameState, LiYuenRelation, Port};
use crate::systems::battle::{Battle, EnemyType, MAX_FLEET};
use crate::systems::economy;
use crate::systems::port_events;
use rand::Rng;
use tracing::instrument;

/// Result of one voyage leg.
#[derive(Debug, Clone)]
pub struct TravelOutcome {
    pub arrived_at: Port,
    pub events: Vec<GameEvent>,
    /// A battle opened by the trigger step, to be fought before trading.
    pub battle: Option<Battle>,
    /// The storm sank the ship; nothing after step 1 ran.
    pub sunk: bool,
}

/// Where a storm leaves the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormResult {
    Sunk,
    Arrive(Port),
}

/// Reject departures that can never succeed.
pub fn validate_departure(state: &GameState, destination: Port) -> Result<(), ActionError> {
    if !destination.is_port() || destination == state.port {
        return Err(ActionError::InvalidPort(destination));
    }
    if state.hold > state.capacity {
        return Err(ActionError::ShipOverloaded {
            hold: state.hold,
            capacity: state.capacity,
        });
    }
    Ok(())
}

/// Sail to `destination` and run the whole arrival pipeline.
#[instrument(skip_all, name = "travel", fields(to = %destination))]
pub fn travel_to<R: Rng + ?Sized>(
    state: &mut GameState,
    destination: Port,
    rng: &mut R,
) -> Result<TravelOutcome, ActionError> {
    validate_departure(state, destination)?;

    let mut events = vec![GameEvent::Departed {
        from: state.port,
        to: destination,
    }];
    state.offers.clear();
    state.port = Port::AtSea;

    let arrived_at = match storm_check(state, destination, rng, &mut events) {
        StormResult::Sunk => {
            return Ok(TravelOutcome {
                arrived_at: Port::AtSea,
                events,
                battle: None,
                sunk: true,
            });
        }
        StormResult::Arrive(port) => port,
    };

    advance_month(state, &mut events);
    accrue_interest(state, &mut events);

    state.port = arrived_at;
    log::info!("Arriving at {} ({}/{})", arrived_at, state.month, state.year);
    events.push(GameEvent::Arrived {
        port: arrived_at,
        month: state.month,
        year: state.year,
    });

    let shock = port_events::run_port_events(state, rng, &mut events);
    let battle = battle_trigger(state, rng, &mut events);
    economy::refresh_prices(state, shock, rng, &mut events);

    Ok(TravelOutcome {
        arrived_at,
        events,
        battle,
        sunk: false,
    })
}

/// Step 1: 1-in-10 storm, 1-in-30 of those threaten the ship, 1-in-3 blow it off course.
pub fn storm_check<R: Rng + ?Sized>(
    state: &GameState,
    destination: Port,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> StormResult {
    if !dice::one_in(rng, 10) {
        return StormResult::Arrive(destination);
    }
    events.push(GameEvent::Storm);

    if dice::one_in(rng, 30) {
        events.push(GameEvent::GoingDown);
        let damage_ratio = f64::from(state.damage) / f64::from(state.capacity.max(1));
        if damage_ratio * 3.0 * dice::unit(rng) >= 1.0 {
            log::warn!("Sunk in a storm with damage {}/{}", state.damage, state.capacity);
            events.push(GameEvent::Sunk);
            return StormResult::Sunk;
        }
    }
    events.push(GameEvent::MadeIt);

    if dice::one_in(rng, 3) {
        let port = blown_off_course(destination, rng);
        log::info!("Blown off course to {}", port);
        events.push(GameEvent::BlownOffCourse { to: port });
        return StormResult::Arrive(port);
    }
    StormResult::Arrive(destination)
}

/// Pick a random port other than `destination`. Never the open sea.
pub fn blown_off_course<R: Rng + ?Sized>(destination: Port, rng: &mut R) -> Port {
    loop {
        let index = dice::between(rng, 0, Port::DESTINATIONS.len() as u32 - 1) as usize;
        let port = Port::DESTINATIONS[index];
        if port != destination {
            return port;
        }
    }
}

/// Step 2.
pub fn advance_month(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.month += 1;
    if state.month > 12 {
        state.month = 1;
        state.year += 1;
        state.enemy_health_base += 10.0;
        state.enemy_damage_factor += 0.5;
        log::info!("New year {}", state.year);
        events.push(GameEvent::NewYear {
            year: state.year,
            enemy_health_base: state.enemy_health_base,
            enemy_damage_factor: state.enemy_damage_factor,
        });
    }
}

/// Step 3: debt grows 10%, deposits 0.5%, both truncated.
pub fn accrue_interest(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.debt = state.debt.saturating_mul(11) / 10;
    state.bank = state.bank.saturating_mul(201) / 200;
    if state.debt > 0 || state.bank > 0 {
        events.push(GameEvent::InterestAccrued {
            debt: state.debt,
            bank: state.bank,
        });
    }
}

/// Step 5: roll against the session's battle probability.
///
/// With Li Yuen's tribute unpaid, one encounter in four is his own fleet.
pub fn battle_trigger<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<Battle> {
    if dice::between(rng, 1, 100) > state.battle_probability {
        return None;
    }

    let (enemy_type, ships) =
        if state.li_yuen_relation == LiYuenRelation::Unpaid && dice::one_in(rng, 4) {
            let ships = dice::between(rng, 1, state.capacity / 5 + state.guns) + 5;
            (EnemyType::Pursuer, ships)
        } else {
            let ships = dice::between(rng, 1, state.capacity / 10 + state.guns);
            (EnemyType::Generic, ships)
        };
    let ships = ships.min(MAX_FLEET);

    let battle = Battle::new(enemy_type, ships, state, rng);
    state.booty = battle.booty;
    log::info!("{} ships attacking ({:?})", ships, enemy_type);
    events.push(GameEvent::BattleStarted {
        enemy: enemy_type,
        ships,
        booty: battle.booty,
    });
    Some(battle)
}
