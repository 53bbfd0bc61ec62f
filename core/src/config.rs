use crate::{
    error::{GameError, GameResult},
    types::Money,
};
use serde::{Deserialize, Serialize};

/// Starting capital for every new game.
pub const STARTING_CASH: Money = 10_000.0;

/// Salary deposit that lands as cash at the start of each quarter.
pub const QUARTERLY_CONTRIBUTION: Money = 2_500.0;

/// Fixed design parameters of a game. Defaults are the shipped values;
/// a JSON file may override either field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub starting_cash:          Money,
    pub quarterly_contribution: Money,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_cash:          STARTING_CASH,
            quarterly_contribution: QUARTERLY_CONTRIBUTION,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> GameResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        for (name, value) in [
            ("starting_cash", self.starting_cash),
            ("quarterly_contribution", self.quarterly_contribution),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidConfig {
                    reason: format!("{name} must be a non-negative amount, got {value}"),
                });
            }
        }
        Ok(())
    }
}
