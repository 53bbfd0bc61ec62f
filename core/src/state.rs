use crate::{
    clock::Period,
    config::GameConfig,
    portfolio::{Instrument, Investments},
    snapshot::{BaselineSnapshot, YearSnapshot},
    types::{Money, Quarter, Year},
};
use serde::{Deserialize, Serialize};

/// Everything the engine knows about one player. A value type: the
/// engine reads one and returns a fresh one, never editing in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub year:             Year,
    pub quarter:          Quarter,
    pub cash:             Money,
    pub investments:      Investments,
    pub baseline_savings: Money,
    pub history:          Vec<YearSnapshot>,
    pub baseline_history: Vec<BaselineSnapshot>,
    pub is_over:          bool,
}

impl PlayerState {
    pub fn initial(config: &GameConfig) -> Self {
        let start = config.starting_cash;
        Self {
            year:             Period::START.year,
            quarter:          Period::START.quarter,
            cash:             start,
            investments:      Investments::default(),
            baseline_savings: start,
            history:          vec![YearSnapshot {
                year:        0,
                total_value: start,
                cash:        start,
                volatile:    0.0,
                long_term:   0.0,
            }],
            baseline_history: vec![BaselineSnapshot { year: 0, value: start }],
            is_over:          false,
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.year, self.quarter)
    }

    pub fn holding(&self, instrument: Instrument) -> Money {
        self.investments.get(instrument)
    }

    pub fn total_value(&self) -> Money {
        self.cash + self.investments.total()
    }

    /// Capital the game started with, read off the year-0 snapshot.
    pub fn starting_capital(&self) -> Money {
        self.history.first().map(|s| s.total_value).unwrap_or(0.0)
    }

    pub fn profit(&self) -> Money {
        self.total_value() - self.starting_capital()
    }

    pub fn completed_years(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub fn snapshot(&self) -> YearSnapshot {
        YearSnapshot {
            year:        self.year,
            total_value: self.total_value(),
            cash:        self.cash,
            volatile:    self.investments.volatile,
            long_term:   self.investments.long_term,
        }
    }
}
