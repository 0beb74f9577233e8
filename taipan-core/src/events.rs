//! Events returned by every command.
//!
//! Commands never render anything; they hand back an ordered list of
//! [`GameEvent`]s and the presentation decides what to show and how to pace
//! it. Events are serde-tagged so a driver can stream them as JSON lines:
//!
//! ```json
//! {"type":"storm"}
//! {"type":"blown_off_course","to":"manila"}
//! {"type":"battle_started","enemy":"generic","ships":4,"booty":1630}
//! ```

use crate::state::{Commodity, OfferKind, Port, COMMODITY_COUNT};
use crate::systems::battle::EnemyType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ----- Trading and banking -----
    Bought {
        item: Commodity,
        quantity: u32,
        cost: u64,
    },
    Sold {
        item: Commodity,
        quantity: u32,
        revenue: u64,
    },
    MovedToWarehouse {
        item: Commodity,
        quantity: u32,
    },
    MovedToShip {
        item: Commodity,
        quantity: u32,
    },
    Deposited {
        amount: u64,
    },
    Withdrew {
        amount: u64,
    },
    DebtPaid {
        amount: u64,
        remaining: u64,
    },
    Borrowed {
        amount: u64,
        debt: u64,
    },

    // ----- Travel -----
    Departed {
        from: Port,
        to: Port,
    },
    Storm,
    GoingDown,
    /// The storm sank the ship. Terminal.
    Sunk,
    /// Survived a storm.
    MadeIt,
    BlownOffCourse {
        to: Port,
    },
    NewYear {
        year: u32,
        enemy_health_base: f64,
        enemy_damage_factor: f64,
    },
    InterestAccrued {
        debt: u64,
        bank: u64,
    },
    Arrived {
        port: Port,
        month: u8,
        year: u32,
    },
    PricesUpdated {
        port: Port,
        prices: [u64; COMMODITY_COUNT],
    },

    // ----- Port events and offers -----
    LiYuenDemand {
        amount: u64,
    },
    RepairOffered {
        rate: u64,
        full_cost: u64,
    },
    WuWarning {
        debt: u64,
    },
    BailoutOffered {
        loan: u64,
        repay: u64,
    },
    ShipOffered {
        price: u64,
        capacity: u32,
    },
    GunOffered {
        price: u64,
    },
    OpiumSeized {
        quantity: u32,
        fine: u64,
    },
    WarehouseRobbed {
        stolen: u32,
    },
    LiYuenRelationLapsed,
    LiYuenSummons,
    PriceShock {
        item: Commodity,
        price: u64,
        surge: bool,
    },
    Robbed {
        amount: u64,
    },
    LiYuenPaid {
        amount: u64,
    },
    /// Agreed to pay but could not; all cash was taken instead.
    LiYuenShortchanged {
        lost: u64,
    },
    ShipRepaired {
        units: u32,
        cost: u64,
        damage: u32,
    },
    ShipUpgraded {
        capacity: u32,
        price: u64,
    },
    GunBought {
        guns: u32,
        price: u64,
    },
    BailoutAccepted {
        loan: u64,
        repay: u64,
    },
    OfferDeclined {
        kind: OfferKind,
    },

    // ----- Battle -----
    BattleStarted {
        enemy: EnemyType,
        ships: u32,
        booty: u64,
    },
    ShotHit {
        slot: usize,
        damage: u32,
    },
    EnemySunk {
        slot: usize,
        remaining: u32,
    },
    EnemyFled {
        count: u32,
        remaining: u32,
    },
    FleeFailed,
    Escaped,
    EnemyBrokeOff {
        count: u32,
        remaining: u32,
    },
    CargoThrown {
        item: Commodity,
        quantity: u32,
    },
    GunLost {
        guns: u32,
        capacity: u32,
    },
    HullDamaged {
        amount: u32,
        damage: u32,
    },
    BattleWon {
        booty: u64,
    },
    BattleLost,
    BattleInterrupted,

    // ----- Session -----
    Retired {
        net_worth: i128,
    },
}
