use crate::state::{Commodity, GameState, LiYuenRelation, Offer, Port};

/// Fluent construction of [`GameState`] fixtures.
///
/// Starts from [`GameState::default`]: Hong Kong, January 1860, capacity 60,
/// no cash and zero prices.
pub struct GameStateBuilder {
    state: GameState,
}

impl GameStateBuilder {
    pub fn new() -> Self {
        Self {
            state: GameState::default(),
        }
    }

    pub fn firm_name(mut self, name: &str) -> Self {
        self.state.firm_name = name.to_string();
        self
    }

    pub fn date(mut self, month: u8, year: u32) -> Self {
        self.state.month = month;
        self.state.year = year;
        self
    }

    pub fn port(mut self, port: Port) -> Self {
        self.state.port = port;
        self
    }

    pub fn cash(mut self, cash: u64) -> Self {
        self.state.cash = cash;
        self
    }

    pub fn bank(mut self, bank: u64) -> Self {
        self.state.bank = bank;
        self
    }

    pub fn debt(mut self, debt: u64) -> Self {
        self.state.debt = debt;
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.state.capacity = capacity;
        self
    }

    pub fn guns(mut self, guns: u32) -> Self {
        self.state.guns = guns;
        self
    }

    pub fn damage(mut self, damage: u32) -> Self {
        self.state.damage = damage;
        self
    }

    /// Set the quantity of `item` aboard, keeping `hold` in sync.
    pub fn hold_item(mut self, item: Commodity, quantity: u32) -> Self {
        let slot = &mut self.state.hold_by_item[item.index()];
        self.state.hold = self.state.hold - *slot + quantity;
        *slot = quantity;
        self
    }

    pub fn warehouse_item(mut self, item: Commodity, quantity: u32) -> Self {
        self.state.warehouse[item.index()] = quantity;
        self
    }

    pub fn price(mut self, item: Commodity, price: u64) -> Self {
        self.state.price[item.index()] = price;
        self
    }

    pub fn li_yuen(mut self, relation: LiYuenRelation) -> Self {
        self.state.li_yuen_relation = relation;
        self
    }

    pub fn enemy_health_base(mut self, base: f64) -> Self {
        self.state.enemy_health_base = base;
        self
    }

    pub fn battle_probability(mut self, percent: u32) -> Self {
        self.state.battle_probability = percent;
        self
    }

    pub fn offer(mut self, offer: Offer) -> Self {
        self.state.push_offer(offer);
        self
    }

    pub fn build(self) -> GameState {
        self.state
    }
}

impl Default for GameStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
