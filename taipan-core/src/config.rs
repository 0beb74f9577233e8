use crate::state::{GameState, LiYuenRelation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// How the firm starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingPosition {
    /// 400 cash, 5000 debt, a 60-unit ship without guns.
    #[default]
    CashAndDebt,
    /// No cash and no debt, a 10-unit ship with five guns and Li Yuen paid off.
    Guns,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub firm_name: String,
    pub start: StartingPosition,
    /// Seed for the session RNG. The same seed and commands replay the same voyage.
    pub seed: u64,
    /// Chance of a battle per arrival in percent. `None` uses the starting
    /// position's default (10 for cash, 7 for guns).
    pub battle_probability: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            firm_name: "Taipan Trading Co.".to_string(),
            start: StartingPosition::CashAndDebt,
            seed: 0,
            battle_probability: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.firm_name.trim().is_empty() {
            return Err(ConfigError::Invalid("firm name is empty".to_string()));
        }
        if let Some(p) = self.battle_probability {
            if p > 100 {
                return Err(ConfigError::Invalid(format!(
                    "battle probability {p} is above 100"
                )));
            }
        }
        Ok(())
    }

    /// The state a new voyage starts from. Prices are left at zero for the
    /// session to fill in.
    pub fn initial_state(&self) -> GameState {
        let mut state = GameState {
            firm_name: self.firm_name.clone(),
            ..Default::default()
        };
        match self.start {
            StartingPosition::CashAndDebt => {
                state.cash = 400;
                state.debt = 5000;
                state.capacity = 60;
                state.guns = 0;
                state.li_yuen_relation = LiYuenRelation::Unpaid;
                state.battle_probability = 10;
            }
            StartingPosition::Guns => {
                state.cash = 0;
                state.debt = 0;
                state.capacity = 10;
                state.guns = 5;
                state.li_yuen_relation = LiYuenRelation::Paid;
                state.battle_probability = 7;
            }
        }
        if let Some(p) = self.battle_probability {
            state.battle_probability = p;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Port;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.start, StartingPosition::CashAndDebt);
        assert!(config.validate().is_ok());

        let state = config.initial_state();
        assert_eq!((state.cash, state.debt, state.capacity), (400, 5000, 60));
        assert_eq!(state.port, Port::HongKong);
        assert_eq!((state.month, state.year), (1, 1860));
    }

    #[test]
    fn test_guns_start() {
        let config = SessionConfig {
            start: StartingPosition::Guns,
            ..Default::default()
        };
        let state = config.initial_state();
        assert_eq!((state.cash, state.debt, state.guns), (0, 0, 5));
        assert_eq!(state.li_yuen_relation, LiYuenRelation::Paid);
        assert_eq!(state.battle_probability, 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SessionConfig::from_json_str(r#"{"seed": 42, "battle_probability": 50}"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.firm_name, "Taipan Trading Co.");
        assert_eq!(config.initial_state().battle_probability, 50);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"battle_probability": 101}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"firm_name": "  "}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
