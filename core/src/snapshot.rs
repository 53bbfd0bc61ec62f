//! Year-end snapshots and the read-only summaries built from them.
//!
//! A snapshot is appended at the close of every year (plus one for
//! year 0 at game start). Past snapshots are never rewritten.

use crate::{
    state::PlayerState,
    types::{Money, Year},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year:        Year,
    pub total_value: Money,
    pub cash:        Money,
    pub volatile:    Money,
    pub long_term:   Money,
}

/// The never-invested comparison balance at a year end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSnapshot {
    pub year:  Year,
    pub value: Money,
}

/// One row of the yearly recap chart: the player's portfolio next to
/// what plain saving would have produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearRecap {
    pub year:           Year,
    pub total_value:    Money,
    pub cash:           Money,
    pub volatile:       Money,
    pub long_term:      Money,
    pub baseline_value: Money,
    /// Portfolio minus baseline; negative when saving would have won.
    pub lead:           Money,
}

impl YearRecap {
    pub fn rows(state: &PlayerState) -> Vec<YearRecap> {
        state
            .history
            .iter()
            .zip(state.baseline_history.iter())
            .map(|(s, b)| YearRecap {
                year:           s.year,
                total_value:    s.total_value,
                cash:           s.cash,
                volatile:       s.volatile,
                long_term:      s.long_term,
                baseline_value: b.value,
                lead:           s.total_value - b.value,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub completed_years:  usize,
    pub is_over:          bool,
    pub starting_capital: Money,
    pub final_value:      Money,
    pub profit:           Money,
    pub baseline_value:   Money,
    pub lead:             Money,
}

impl GameSummary {
    pub fn from_state(state: &PlayerState) -> Self {
        let final_value = state.total_value();
        Self {
            completed_years:  state.completed_years(),
            is_over:          state.is_over,
            starting_capital: state.starting_capital(),
            final_value,
            profit:           state.profit(),
            baseline_value:   state.baseline_savings,
            lead:             final_value - state.baseline_savings,
        }
    }

    pub fn beat_baseline(&self) -> bool {
        self.lead > 0.0
    }
}
