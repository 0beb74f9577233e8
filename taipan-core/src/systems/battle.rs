//! Naval battle state machine.
//!
//! A [`Battle`] is created by the travel pipeline and driven one order at a
//! time. Each order walks the phases synchronously:
//!
//! ```text
//! AwaitingOrders ─┬─ Fight ─────────┐
//!                 ├─ Flee ──────────┼─▶ EnemyCounterattack ─┬─▶ AwaitingOrders
//!                 └─ ThrowCargo ────┘                       └─▶ Resolved(..)
//! ```
//!
//! Fighting can resolve `Won` before the counterattack, fleeing can resolve
//! `Fled`. Pacing of the resulting events is left to the presentation.

use crate::dice;
use crate::error::ActionError;
use crate::events::GameEvent;
use crate::state::GameState;
use crate::systems::ledger::{self, Jettison};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Enemy ships visible at once.
pub const MAX_ON_SCREEN: usize = 10;

/// Ships deployed per wave when a battle opens.
const WAVE_SIZE: usize = 5;

/// Upper bound on fleet size.
pub const MAX_FLEET: u32 = 9999;

/// Ships counted by the counterattack, however large the fleet.
const MAX_ATTACKERS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyType {
    /// Ordinary pirates.
    Generic,
    /// Li Yuen's own fleet.
    Pursuer,
}

impl EnemyType {
    /// Scales both the enemy's damage and its reluctance to flee.
    pub fn factor(self) -> f64 {
        match self {
            EnemyType::Generic => 1.0,
            EnemyType::Pursuer => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "order", rename_all = "snake_case")]
pub enum BattleOrder {
    Fight,
    Flee,
    ThrowCargo { jettison: Jettison },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Won,
    Lost,
    Fled,
    /// Escaped into open sea by chance; no booty.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    AwaitingOrders,
    Fighting,
    Fleeing,
    ThrowingCargo(Jettison),
    EnemyCounterattack,
    Resolved(BattleOutcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub enemy_type: EnemyType,
    pub ships_original: u32,
    pub ships_remaining: u32,
    /// Health of the ships on screen; `None` is an empty slot.
    pub on_screen: [Option<i32>; MAX_ON_SCREEN],
    pub escape_accumulator: u32,
    pub attempt_index: u32,
    pub sunk: u32,
    /// Fixed at creation, paid only when the last ship is sunk by gunfire.
    pub booty: u64,
    /// Completed order/counterattack rounds.
    pub rounds: u32,
    pub phase: BattlePhase,
}

impl Battle {
    /// Open a battle against `ships` enemy ships.
    ///
    /// Booty is `(t / 4) * 1000 * ships + uniform(0..1000) + 250` where `t` is
    /// the elapsed months. A fleet of zero is an immediate win.
    pub fn new<R: Rng + ?Sized>(
        enemy_type: EnemyType,
        ships: u32,
        state: &GameState,
        rng: &mut R,
    ) -> Self {
        let ships = ships.min(MAX_FLEET);
        let booty = (state.elapsed_months() / 4)
            .saturating_mul(1000)
            .saturating_mul(u64::from(ships))
            .saturating_add(dice::below_u64(rng, 1000) + 250);

        let mut battle = Self {
            enemy_type,
            ships_original: ships,
            ships_remaining: ships,
            on_screen: [None; MAX_ON_SCREEN],
            escape_accumulator: 0,
            attempt_index: 1,
            sunk: 0,
            booty,
            rounds: 0,
            phase: BattlePhase::AwaitingOrders,
        };

        if ships == 0 {
            battle.phase = BattlePhase::Resolved(BattleOutcome::Won);
            return battle;
        }

        // First wave, then a second wave when the fleet is large enough.
        battle.deploy(0..WAVE_SIZE, state, rng);
        if ships as usize > WAVE_SIZE {
            battle.deploy(WAVE_SIZE..MAX_ON_SCREEN, state, rng);
        }
        battle
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, BattlePhase::Resolved(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn ships_on_screen(&self) -> u32 {
        self.on_screen.iter().flatten().count() as u32
    }

    fn enemy_health<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> i32 {
        (state.enemy_health_base * dice::unit(rng) + 20.0) as i32
    }

    fn deploy<R: Rng + ?Sized>(
        &mut self,
        slots: std::ops::Range<usize>,
        state: &GameState,
        rng: &mut R,
    ) {
        for slot in slots {
            if self.ships_on_screen() >= self.ships_remaining {
                break;
            }
            if self.on_screen[slot].is_none() {
                self.on_screen[slot] = Some(Self::enemy_health(state, rng));
            }
        }
    }

    /// Fill empty slots while ships remain off screen.
    fn backfill<R: Rng + ?Sized>(&mut self, state: &GameState, rng: &mut R) {
        self.deploy(0..MAX_ON_SCREEN, state, rng);
    }

    /// Clear slots from the back until no more ships are shown than remain.
    fn trim_on_screen(&mut self) {
        for slot in (0..MAX_ON_SCREEN).rev() {
            if self.ships_on_screen() <= self.ships_remaining {
                break;
            }
            self.on_screen[slot] = None;
        }
    }

    /// Issue one order and run the battle until it awaits the next order or resolves.
    ///
    /// Rejected orders consume no round and leave both battle and state untouched.
    #[instrument(skip_all, name = "battle_order")]
    pub fn issue_order<R: Rng + ?Sized>(
        &mut self,
        order: BattleOrder,
        state: &mut GameState,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, ActionError> {
        if self.phase != BattlePhase::AwaitingOrders {
            return Err(ActionError::InvalidOrder(
                "the battle is already over".to_string(),
            ));
        }

        self.phase = match order {
            BattleOrder::Fight if state.guns == 0 => {
                return Err(ActionError::InvalidOrder(
                    "we have no guns, Taipan".to_string(),
                ));
            }
            BattleOrder::Fight => BattlePhase::Fighting,
            BattleOrder::Flee => BattlePhase::Fleeing,
            BattleOrder::ThrowCargo { jettison } => {
                ledger::validate_jettison(state, jettison)?;
                BattlePhase::ThrowingCargo(jettison)
            }
        };

        let mut events = Vec::new();
        loop {
            self.phase = match self.phase {
                BattlePhase::Fighting => self.fight(state, rng, &mut events),
                BattlePhase::Fleeing => self.flee(rng, &mut events),
                BattlePhase::ThrowingCargo(jettison) => {
                    events.extend(ledger::jettison(state, jettison)?);
                    BattlePhase::EnemyCounterattack
                }
                BattlePhase::EnemyCounterattack => self.counterattack(state, rng, &mut events),
                BattlePhase::AwaitingOrders | BattlePhase::Resolved(_) => break,
            };
        }
        Ok(events)
    }

    fn fight<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> BattlePhase {
        for _ in 0..state.guns {
            let occupied: Vec<usize> = (0..MAX_ON_SCREEN)
                .filter(|&slot| self.on_screen[slot].is_some())
                .collect();
            if self.ships_remaining == 0 || occupied.is_empty() {
                break;
            }

            let slot = occupied[dice::between(rng, 0, occupied.len() as u32 - 1) as usize];
            let hit = dice::between(rng, 10, 40);
            events.push(GameEvent::ShotHit { slot, damage: hit });

            let health = self.on_screen[slot].unwrap_or(0) - hit as i32;
            if health > 0 {
                self.on_screen[slot] = Some(health);
                continue;
            }

            self.on_screen[slot] = None;
            self.ships_remaining -= 1;
            self.sunk += 1;
            log::debug!("Sunk enemy in slot {} ({} remaining)", slot, self.ships_remaining);
            events.push(GameEvent::EnemySunk {
                slot,
                remaining: self.ships_remaining,
            });
            self.backfill(state, rng);
        }

        if self.ships_remaining == 0 {
            state.cash = state.cash.saturating_add(self.booty);
            log::info!("Battle won after sinking {} ships, booty {}", self.sunk, self.booty);
            events.push(GameEvent::BattleWon { booty: self.booty });
            return BattlePhase::Resolved(BattleOutcome::Won);
        }

        let factor = self.enemy_type.factor();
        let nerve = f64::from(self.ships_remaining) * 0.6 / factor;
        if self.ships_remaining > 2 && f64::from(dice::between(rng, 1, self.ships_original)) > nerve {
            let most = ((f64::from(self.ships_remaining) / 3.0 / factor) as u32).max(1);
            let fled = dice::between(rng, 1, most);
            self.ships_remaining -= fled;
            self.trim_on_screen();
            events.push(GameEvent::EnemyFled {
                count: fled,
                remaining: self.ships_remaining,
            });
        }

        BattlePhase::EnemyCounterattack
    }

    fn flee<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) -> BattlePhase {
        self.escape_accumulator += self.attempt_index;
        self.attempt_index += 1;

        let ours = dice::between(rng, 1, self.escape_accumulator.max(1));
        let theirs = dice::between(rng, 1, self.ships_remaining.max(1));
        if ours > theirs {
            log::info!("Escaped after {} attempts", self.attempt_index - 1);
            events.push(GameEvent::Escaped);
            return BattlePhase::Resolved(BattleOutcome::Fled);
        }

        events.push(GameEvent::FleeFailed);
        if self.ships_remaining > 2 && dice::one_in(rng, 5) {
            let lost = dice::between(rng, 1, self.ships_remaining / 2);
            self.ships_remaining -= lost;
            self.trim_on_screen();
            events.push(GameEvent::EnemyBrokeOff {
                count: lost,
                remaining: self.ships_remaining,
            });
        }
        BattlePhase::EnemyCounterattack
    }

    fn counterattack<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> BattlePhase {
        if self.ships_remaining == 0 {
            events.push(GameEvent::BattleWon { booty: 0 });
            return BattlePhase::Resolved(BattleOutcome::Won);
        }

        let mut attackers = self.ships_remaining.min(MAX_ATTACKERS);
        let damage_pct = f64::from(state.damage) / f64::from(state.capacity.max(1)) * 100.0;
        if state.guns > 0 && (f64::from(dice::between(rng, 1, 100)) < damage_pct || damage_pct > 80.0)
        {
            // The shot takes a gun and up to 10 units of hold space with it.
            // Capacity stays above both cargo and damage.
            state.guns -= 1;
            attackers = 1;
            let floor = state.hold.max(state.damage + 1);
            state.capacity -= state.capacity.saturating_sub(floor).min(10);
            events.push(GameEvent::GunLost {
                guns: state.guns,
                capacity: state.capacity,
            });
        }

        let hit = (state.enemy_damage_factor
            * f64::from(attackers)
            * self.enemy_type.factor()
            * dice::unit(rng)
            + f64::from(attackers / 2)) as u32;
        state.damage = state.damage.saturating_add(hit).min(state.capacity);
        events.push(GameEvent::HullDamaged {
            amount: hit,
            damage: state.damage,
        });
        self.rounds += 1;

        if state.damage >= state.capacity {
            log::warn!("Ship lost in battle after {} rounds", self.rounds);
            events.push(GameEvent::BattleLost);
            return BattlePhase::Resolved(BattleOutcome::Lost);
        }

        if self.enemy_type == EnemyType::Generic && dice::one_in(rng, 20) {
            log::info!("Battle interrupted, escaped into open sea");
            events.push(GameEvent::BattleInterrupted);
            return BattlePhase::Resolved(BattleOutcome::Interrupted);
        }

        BattlePhase::AwaitingOrders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Commodity;
    use crate::testing::GameStateBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shots(events: &[GameEvent]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ShotHit { damage, .. } => Some(*damage),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_zero_ship_battle_is_won_immediately() {
        let state = GameStateBuilder::new().guns(2).build();
        let battle = Battle::new(EnemyType::Generic, 0, &state, &mut StdRng::seed_from_u64(1));

        assert_eq!(battle.outcome(), Some(BattleOutcome::Won));
        assert_eq!(battle.rounds, 0);
        assert_eq!(battle.ships_on_screen(), 0);
    }

    #[test]
    fn test_creation_fills_waves() {
        let state = GameStateBuilder::new().build();
        let mut rng = StdRng::seed_from_u64(2);

        let small = Battle::new(EnemyType::Generic, 3, &state, &mut rng);
        assert_eq!(small.ships_on_screen(), 3);
        assert!(small.on_screen[5..].iter().all(Option::is_none));

        let large = Battle::new(EnemyType::Generic, 40, &state, &mut rng);
        assert_eq!(large.ships_on_screen(), 10);
        for health in large.on_screen.iter().flatten() {
            assert!((20..40).contains(health));
        }
    }

    #[test]
    fn test_fleet_size_is_capped() {
        let state = GameStateBuilder::new().build();
        let battle = Battle::new(EnemyType::Generic, 50_000, &state, &mut StdRng::seed_from_u64(3));
        assert_eq!(battle.ships_original, MAX_FLEET);
    }

    #[test]
    fn test_fight_without_guns_is_rejected_without_consuming_round() {
        let mut state = GameStateBuilder::new().guns(0).build();
        let mut rng = StdRng::seed_from_u64(4);
        let mut battle = Battle::new(EnemyType::Generic, 5, &state, &mut rng);
        let before_battle = battle.clone();
        let before_state = state.clone();

        let err = battle
            .issue_order(BattleOrder::Fight, &mut state, &mut rng)
            .unwrap_err();

        assert!(matches!(err, ActionError::InvalidOrder(_)));
        assert_eq!(battle, before_battle);
        assert_eq!(state, before_state);
    }

    #[test]
    fn test_fight_fires_once_per_gun() {
        for seed in 0..50 {
            let mut state = GameStateBuilder::new()
                .guns(3)
                .capacity(1000)
                .enemy_health_base(10_000.0)
                .build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 100, &state, &mut rng);

            let events = battle
                .issue_order(BattleOrder::Fight, &mut state, &mut rng)
                .unwrap();

            let fired = shots(&events);
            assert_eq!(fired.len(), 3, "seed {seed}");
            assert!(fired.iter().all(|d| (10..=40).contains(d)));
        }
    }

    #[test]
    fn test_sinking_last_ship_pays_booty() {
        // One weak ship and plenty of guns: the first volley sinks it.
        let mut state = GameStateBuilder::new()
            .guns(5)
            .cash(100)
            .enemy_health_base(0.0)
            .build();
        let mut rng = StdRng::seed_from_u64(5);
        let mut battle = Battle::new(EnemyType::Generic, 1, &state, &mut rng);
        let booty = battle.booty;

        let events = battle
            .issue_order(BattleOrder::Fight, &mut state, &mut rng)
            .unwrap();

        assert_eq!(battle.outcome(), Some(BattleOutcome::Won));
        assert_eq!(state.cash, 100 + booty);
        // 20 health and at least 10 per shot: two shots at most.
        assert!(shots(&events).len() <= 2);
        assert!(matches!(events.last(), Some(GameEvent::BattleWon { .. })));
    }

    #[test]
    fn test_counterattack_on_nearly_sunk_ship_is_fatal() {
        let mut state = GameStateBuilder::new()
            .capacity(60)
            .damage(59)
            .guns(0)
            .build();
        let mut rng = StdRng::seed_from_u64(6);
        let mut battle = Battle::new(EnemyType::Generic, 4, &state, &mut rng);

        // Four attackers always deal at least 4 / 2 = 2 damage.
        battle.phase = BattlePhase::EnemyCounterattack;
        let mut events = Vec::new();
        let next = battle.counterattack(&mut state, &mut rng, &mut events);

        assert_eq!(next, BattlePhase::Resolved(BattleOutcome::Lost));
        assert_eq!(state.damage, state.capacity);
        assert!(events.contains(&GameEvent::BattleLost));
    }

    #[test]
    fn test_heavy_damage_costs_a_gun_and_hold_space() {
        let mut state = GameStateBuilder::new()
            .capacity(100)
            .damage(85)
            .guns(2)
            .build();
        let mut rng = StdRng::seed_from_u64(7);
        let mut battle = Battle::new(EnemyType::Pursuer, 20, &state, &mut rng);

        let mut events = Vec::new();
        battle.counterattack(&mut state, &mut rng, &mut events);

        assert_eq!(state.guns, 1);
        assert_eq!(state.capacity, 90);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GunLost { guns: 1, capacity: 90 })));
    }

    #[test]
    fn test_losing_a_gun_alone_never_sinks_the_ship() {
        for seed in 0..200 {
            let mut state = GameStateBuilder::new()
                .capacity(60)
                .damage(50)
                .guns(1)
                .build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 1, &state, &mut rng);

            // One attacker at the opening damage factor deals no damage.
            let mut events = Vec::new();
            let next = battle.counterattack(&mut state, &mut rng, &mut events);

            assert_ne!(next, BattlePhase::Resolved(BattleOutcome::Lost), "seed {seed}");
            assert_eq!(state.guns, 0);
            assert_eq!(state.capacity, 51);
            assert_eq!(state.damage, 50);
            assert!(!events.contains(&GameEvent::BattleLost));
        }
    }

    #[test]
    fn test_lost_hold_space_never_drops_below_cargo() {
        let mut state = GameStateBuilder::new()
            .capacity(60)
            .hold_item(Commodity::Silk, 55)
            .damage(50)
            .guns(1)
            .build();
        let mut rng = StdRng::seed_from_u64(8);
        let mut battle = Battle::new(EnemyType::Generic, 3, &state, &mut rng);

        let mut events = Vec::new();
        battle.counterattack(&mut state, &mut rng, &mut events);

        assert_eq!(state.guns, 0);
        assert_eq!(state.capacity, 55);
        assert!(state.hold <= state.capacity);
        assert!(state.damage <= state.capacity);
    }

    #[test]
    fn test_flee_counters_increase_monotonically() {
        let mut state = GameStateBuilder::new().capacity(10_000).build();
        let mut rng = StdRng::seed_from_u64(9);
        let mut battle = Battle::new(EnemyType::Pursuer, 500, &state, &mut rng);

        let mut last = (battle.escape_accumulator, battle.attempt_index);
        for _ in 0..5 {
            if battle.is_resolved() {
                break;
            }
            battle
                .issue_order(BattleOrder::Flee, &mut state, &mut rng)
                .unwrap();
            assert!(battle.escape_accumulator > last.0);
            assert_eq!(battle.attempt_index, last.1 + 1);
            last = (battle.escape_accumulator, battle.attempt_index);
        }
    }

    #[test]
    fn test_first_flee_attempt_never_succeeds() {
        // random(1, 1) can never beat random(1, n).
        for seed in 0..50 {
            let mut state = GameStateBuilder::new().capacity(10_000).build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 3, &state, &mut rng);

            let events = battle
                .issue_order(BattleOrder::Flee, &mut state, &mut rng)
                .unwrap();

            assert_eq!(events.first(), Some(&GameEvent::FleeFailed));
            assert_ne!(battle.outcome(), Some(BattleOutcome::Fled));
        }
    }

    #[test]
    fn test_fight_can_scare_enemies_off() {
        let mut scared = 0;
        for seed in 0..100 {
            let mut state = GameStateBuilder::new()
                .guns(1)
                .capacity(10_000)
                .enemy_health_base(10_000.0)
                .build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 50, &state, &mut rng);

            let events = battle
                .issue_order(BattleOrder::Fight, &mut state, &mut rng)
                .unwrap();

            let sunk = events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemySunk { .. }))
                .count() as u32;
            for event in &events {
                if let GameEvent::EnemyFled { count, remaining } = *event {
                    scared += 1;
                    // 50 / 3 = 16 at most.
                    assert!((1..=16).contains(&count));
                    assert_eq!(remaining, 50 - sunk - count);
                    assert_eq!(battle.ships_remaining, remaining);
                }
            }
            assert!(battle.ships_on_screen() <= battle.ships_remaining);
        }
        assert!(scared > 0);
    }

    #[test]
    fn test_failed_flee_can_make_enemies_break_off() {
        let mut broke_off = 0;
        for seed in 0..200 {
            let mut state = GameStateBuilder::new().capacity(10_000).build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 20, &state, &mut rng);

            let events = battle
                .issue_order(BattleOrder::Flee, &mut state, &mut rng)
                .unwrap();

            for event in &events {
                if let GameEvent::EnemyBrokeOff { count, remaining } = *event {
                    broke_off += 1;
                    assert!((1..=10).contains(&count));
                    assert_eq!(remaining, 20 - count);
                }
            }
            assert!(battle.ships_on_screen() <= battle.ships_remaining);
        }
        assert!(broke_off > 0);
    }

    #[test]
    fn test_generic_battles_can_be_interrupted() {
        let mut interrupted = 0;
        for seed in 0..500 {
            let mut state = GameStateBuilder::new().capacity(10_000).build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 3, &state, &mut rng);

            let mut events = Vec::new();
            let next = battle.counterattack(&mut state, &mut rng, &mut events);

            if next == BattlePhase::Resolved(BattleOutcome::Interrupted) {
                interrupted += 1;
                assert_eq!(events.last(), Some(&GameEvent::BattleInterrupted));
                assert_eq!(battle.rounds, 1);
            }
        }
        assert!(interrupted > 0);
    }

    #[test]
    fn test_pursuit_is_never_interrupted() {
        for seed in 0..200 {
            let mut state = GameStateBuilder::new().capacity(10_000).build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Pursuer, 3, &state, &mut rng);

            let mut events = Vec::new();
            let next = battle.counterattack(&mut state, &mut rng, &mut events);

            assert_eq!(next, BattlePhase::AwaitingOrders);
        }
    }

    #[test]
    fn test_throw_cargo_discards_and_counterattacks() {
        let mut state = GameStateBuilder::new()
            .capacity(1000)
            .hold_item(Commodity::Opium, 10)
            .build();
        let mut rng = StdRng::seed_from_u64(10);
        let mut battle = Battle::new(EnemyType::Generic, 2, &state, &mut rng);

        let events = battle
            .issue_order(
                BattleOrder::ThrowCargo {
                    jettison: Jettison::Item {
                        item: Commodity::Opium,
                        quantity: 4,
                    },
                },
                &mut state,
                &mut rng,
            )
            .unwrap();

        assert_eq!(state.held(Commodity::Opium), 6);
        assert_eq!(state.hold, 6);
        assert!(events.iter().any(|e| matches!(e, GameEvent::HullDamaged { .. })));
    }

    #[test]
    fn test_orders_after_resolution_are_rejected() {
        let mut state = GameStateBuilder::new().guns(1).build();
        let mut rng = StdRng::seed_from_u64(11);
        let mut battle = Battle::new(EnemyType::Generic, 0, &state, &mut rng);

        assert!(battle
            .issue_order(BattleOrder::Flee, &mut state, &mut rng)
            .is_err());
    }

    #[test]
    fn test_battles_always_end() {
        for seed in 0..30 {
            let mut state = GameStateBuilder::new().guns(4).capacity(200).build();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut battle = Battle::new(EnemyType::Generic, 12, &state, &mut rng);

            for _ in 0..10_000 {
                if battle.is_resolved() {
                    break;
                }
                let order = if state.guns > 0 {
                    BattleOrder::Fight
                } else {
                    BattleOrder::Flee
                };
                battle.issue_order(order, &mut state, &mut rng).unwrap();
                assert!(state.damage <= state.capacity);
                assert!(battle.ships_on_screen() <= battle.ships_remaining);
            }
            assert!(battle.is_resolved(), "seed {seed}");
        }
    }
}
