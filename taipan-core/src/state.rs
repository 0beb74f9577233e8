use serde::{Deserialize, Serialize};

/// First year of every voyage. Elapsed time is measured from January of this year.
pub const START_YEAR: u32 = 1860;

/// Total units the Hong Kong warehouse can store across all commodities.
pub const WAREHOUSE_CAPACITY: u32 = 10_000;

/// Number of tradeable commodities.
pub const COMMODITY_COUNT: usize = 4;

/// Starting enemy health base (`ec` in the classic game).
pub const INITIAL_ENEMY_HEALTH: f64 = 20.0;

/// Starting enemy damage factor (`ed` in the classic game).
pub const INITIAL_ENEMY_DAMAGE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Opium,
    Silk,
    Arms,
    GeneralCargo,
}

impl Commodity {
    pub const ALL: [Commodity; COMMODITY_COUNT] = [
        Commodity::Opium,
        Commodity::Silk,
        Commodity::Arms,
        Commodity::GeneralCargo,
    ];

    /// Index into the per-commodity arrays of [`GameState`].
    pub const fn index(self) -> usize {
        match self {
            Commodity::Opium => 0,
            Commodity::Silk => 1,
            Commodity::Arms => 2,
            Commodity::GeneralCargo => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Commodity::Opium => "Opium",
            Commodity::Silk => "Silk",
            Commodity::Arms => "Arms",
            Commodity::GeneralCargo => "General Cargo",
        }
    }
}

impl std::fmt::Display for Commodity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The eight locations a ship can be at. Index 0 is the open sea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Port {
    AtSea,
    HongKong,
    Shanghai,
    Nagasaki,
    Saigon,
    Manila,
    Singapore,
    Batavia,
}

impl Port {
    pub const ALL: [Port; 8] = [
        Port::AtSea,
        Port::HongKong,
        Port::Shanghai,
        Port::Nagasaki,
        Port::Saigon,
        Port::Manila,
        Port::Singapore,
        Port::Batavia,
    ];

    /// Ports a ship can sail to (everything except the open sea).
    pub const DESTINATIONS: [Port; 7] = [
        Port::HongKong,
        Port::Shanghai,
        Port::Nagasaki,
        Port::Saigon,
        Port::Manila,
        Port::Singapore,
        Port::Batavia,
    ];

    pub const fn index(self) -> usize {
        match self {
            Port::AtSea => 0,
            Port::HongKong => 1,
            Port::Shanghai => 2,
            Port::Nagasaki => 3,
            Port::Saigon => 4,
            Port::Manila => 5,
            Port::Singapore => 6,
            Port::Batavia => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<Port> {
        Port::ALL.get(index).copied()
    }

    /// True for every location with a market.
    pub const fn is_port(self) -> bool {
        !matches!(self, Port::AtSea)
    }

    pub fn name(self) -> &'static str {
        match self {
            Port::AtSea => "At sea",
            Port::HongKong => "Hong Kong",
            Port::Shanghai => "Shanghai",
            Port::Nagasaki => "Nagasaki",
            Port::Saigon => "Saigon",
            Port::Manila => "Manila",
            Port::Singapore => "Singapore",
            Port::Batavia => "Batavia",
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether Li Yuen's tribute has been paid this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiYuenRelation {
    #[default]
    Unpaid,
    Paid,
}

/// Kinds of port offers, used to answer a pending [`Offer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    LiYuenDemand,
    Repair,
    NewShip,
    NewGun,
    Bailout,
}

/// An offer raised on arrival that waits for the player's answer.
///
/// At most one offer of each kind is pending. All pending offers are
/// discarded when the ship leaves port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Offer {
    /// Li Yuen asks for a donation to the temple of Tin Hau.
    LiYuenDemand { amount: u64 },
    /// McHenry repairs the hull at `rate` per unit of damage.
    Repair { rate: u64 },
    /// A larger ship (+50 capacity, undamaged) for `price`.
    NewShip { price: u64 },
    /// One more gun for `price`.
    NewGun { price: u64 },
    /// Elder Brother Wu lends `loan` now against `repay` added to debt.
    Bailout { loan: u64, repay: u64 },
}

impl Offer {
    pub fn kind(&self) -> OfferKind {
        match self {
            Offer::LiYuenDemand { .. } => OfferKind::LiYuenDemand,
            Offer::Repair { .. } => OfferKind::Repair,
            Offer::NewShip { .. } => OfferKind::NewShip,
            Offer::NewGun { .. } => OfferKind::NewGun,
            Offer::Bailout { .. } => OfferKind::Bailout,
        }
    }
}

/// The single mutable aggregate of a voyage.
///
/// Cargo arrays are indexed by [`Commodity::index`]; `price` is indexed the
/// same way and is only meaningful while in port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub firm_name: String,
    pub month: u8, // 1-12
    pub year: u32,
    pub port: Port,

    pub cash: u64,
    pub bank: u64,
    pub debt: u64,
    /// Booty promised by the current (or last) battle.
    pub booty: u64,

    pub capacity: u32,
    /// Units aboard; always the sum of `hold_by_item`.
    pub hold: u32,
    pub guns: u32,
    pub damage: u32,

    pub hold_by_item: [u32; COMMODITY_COUNT],
    pub warehouse: [u32; COMMODITY_COUNT],
    pub price: [u64; COMMODITY_COUNT],

    pub li_yuen_relation: LiYuenRelation,
    pub wu_warnings: u32,
    pub wu_bailouts: u32,

    pub enemy_health_base: f64,
    pub enemy_damage_factor: f64,
    /// Chance in percent that an arrival triggers a battle.
    pub battle_probability: u32,

    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            firm_name: "Your Firm".to_string(),
            month: 1,
            year: START_YEAR,
            port: Port::HongKong,
            cash: 0,
            bank: 0,
            debt: 0,
            booty: 0,
            capacity: 60,
            hold: 0,
            guns: 0,
            damage: 0,
            hold_by_item: [0; COMMODITY_COUNT],
            warehouse: [0; COMMODITY_COUNT],
            price: [0; COMMODITY_COUNT],
            li_yuen_relation: LiYuenRelation::Unpaid,
            wu_warnings: 0,
            wu_bailouts: 0,
            enemy_health_base: INITIAL_ENEMY_HEALTH,
            enemy_damage_factor: INITIAL_ENEMY_DAMAGE,
            battle_probability: 10,
            offers: Vec::new(),
        }
    }
}

impl GameState {
    /// Months since the voyage began (`(year - 1860) * 12 + month`).
    pub fn elapsed_months(&self) -> u64 {
        u64::from(self.year.saturating_sub(START_YEAR)) * 12 + u64::from(self.month)
    }

    pub fn total_warehouse(&self) -> u32 {
        self.warehouse.iter().sum()
    }

    pub fn free_hold(&self) -> u32 {
        self.capacity.saturating_sub(self.hold)
    }

    pub fn held(&self, item: Commodity) -> u32 {
        self.hold_by_item[item.index()]
    }

    pub fn stored(&self, item: Commodity) -> u32 {
        self.warehouse[item.index()]
    }

    pub fn price_of(&self, item: Commodity) -> u64 {
        self.price[item.index()]
    }

    /// Cash plus bank balance minus debt. Can be negative.
    pub fn net_worth(&self) -> i128 {
        i128::from(self.cash) + i128::from(self.bank) - i128::from(self.debt)
    }

    /// Seaworthiness in percent (100 = undamaged).
    pub fn ship_status(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        100 - (u64::from(self.damage) * 100 / u64::from(self.capacity)).min(100) as u32
    }

    pub fn ship_status_label(&self) -> &'static str {
        match self.ship_status() {
            100.. => "Perfect",
            80..=99 => "Prime",
            60..=79 => "Good",
            40..=59 => "Fair",
            20..=39 => "Poor",
            _ => "Critical",
        }
    }

    pub fn offer(&self, kind: OfferKind) -> Option<Offer> {
        self.offers.iter().copied().find(|o| o.kind() == kind)
    }

    /// Remove and return the pending offer of `kind`.
    pub fn take_offer(&mut self, kind: OfferKind) -> Option<Offer> {
        let pos = self.offers.iter().position(|o| o.kind() == kind)?;
        Some(self.offers.remove(pos))
    }

    /// Queue an offer, replacing any pending offer of the same kind.
    pub fn push_offer(&mut self, offer: Offer) {
        self.offers.retain(|o| o.kind() != offer.kind());
        self.offers.push(offer);
    }
}

/// Read-only summary of the firm's position, for status panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub firm_name: String,
    pub date: String,
    pub port: Port,
    pub cash: u64,
    pub bank: u64,
    pub debt: u64,
    pub guns: u32,
    pub hold: u32,
    pub capacity: u32,
    pub ship_status: u32,
}

impl From<&GameState> for StatusReport {
    fn from(state: &GameState) -> Self {
        Self {
            firm_name: state.firm_name.clone(),
            date: format!("{}/{}", state.month, state.year),
            port: state.port,
            cash: state.cash,
            bank: state.bank,
            debt: state.debt,
            guns: state.guns,
            hold: state.hold,
            capacity: state.capacity,
            ship_status: state.ship_status(),
        }
    }
}

/// Hold and warehouse contents per commodity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoReport {
    pub hold_by_item: [u32; COMMODITY_COUNT],
    pub warehouse: [u32; COMMODITY_COUNT],
    pub hold: u32,
    pub capacity: u32,
    pub warehouse_total: u32,
}

impl From<&GameState> for CargoReport {
    fn from(state: &GameState) -> Self {
        Self {
            hold_by_item: state.hold_by_item,
            warehouse: state.warehouse,
            hold: state.hold,
            capacity: state.capacity,
            warehouse_total: state.total_warehouse(),
        }
    }
}
