//! Events describing what a single transition did.
//!
//! The engine emits these alongside the new state so presentation can
//! narrate a move ("last quarter's result", the yearly recap, the game
//! over screen) without diffing states. They carry no authority: the
//! state is the only source of truth.

use crate::{
    clock::Period,
    portfolio::Instrument,
    snapshot::{BaselineSnapshot, YearSnapshot},
    timeline::Returns,
    types::{Money, Rate},
};
use serde::{Deserialize, Serialize};

/// Variants are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Allocation ─────────────────────────────────
    CashAllocated {
        period:     Period,
        instrument: Instrument,
        amount:     Money,
    },
    CashWithdrawn {
        period:     Period,
        instrument: Instrument,
        amount:     Money,
    },
    /// The request exceeded what was available (or was negative) and
    /// was cut down to `applied`.
    ActionClamped {
        period:    Period,
        action:    String,
        requested: Money,
        applied:   Money,
    },

    // ── Quarter resolution ─────────────────────────
    ContributionDeposited {
        period: Period,
        amount: Money,
    },
    QuarterResolved {
        period:           Period,
        condition:        String,
        returns:          Returns,
        inflation:        Rate,
        volatile_change:  Money,
        long_term_change: Money,
        /// Purchasing power the uninvested cash lost this quarter.
        inflation_loss:   Money,
    },
    YearClosed {
        snapshot: YearSnapshot,
        baseline: BaselineSnapshot,
    },
    GameOver {
        final_value:    Money,
        baseline_value: Money,
    },

    // ── Terminal ───────────────────────────────────
    ActionIgnored {
        action: String,
    },
}

impl GameEvent {
    /// Stable name for logs and tooling.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CashAllocated { .. }         => "cash_allocated",
            Self::CashWithdrawn { .. }         => "cash_withdrawn",
            Self::ActionClamped { .. }         => "action_clamped",
            Self::ContributionDeposited { .. } => "contribution_deposited",
            Self::QuarterResolved { .. }       => "quarter_resolved",
            Self::YearClosed { .. }            => "year_closed",
            Self::GameOver { .. }              => "game_over",
            Self::ActionIgnored { .. }         => "action_ignored",
        }
    }
}
