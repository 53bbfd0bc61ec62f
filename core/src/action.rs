use crate::{portfolio::Instrument, types::Money};
use serde::{Deserialize, Serialize};

/// Everything a player can do. Tags accept both the engine names and
/// the table-game names shown on the buttons (hit / withdraw / stand).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Move cash into an instrument.
    #[serde(alias = "hit", alias = "HIT")]
    Allocate { instrument: Instrument, amount: Money },

    /// Move instrument value back into cash.
    #[serde(alias = "withdraw", alias = "WITHDRAW")]
    Deallocate { instrument: Instrument, amount: Money },

    /// Resolve the current quarter and move the clock forward.
    #[serde(alias = "stand", alias = "STAND")]
    AdvanceQuarter,
}

impl PlayerAction {
    pub fn hit(instrument: Instrument, amount: Money) -> Self {
        Self::Allocate { instrument, amount }
    }

    pub fn withdraw(instrument: Instrument, amount: Money) -> Self {
        Self::Deallocate { instrument, amount }
    }

    pub fn stand() -> Self {
        Self::AdvanceQuarter
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Allocate { .. }   => "allocate",
            Self::Deallocate { .. } => "deallocate",
            Self::AdvanceQuarter    => "advance_quarter",
        }
    }
}
