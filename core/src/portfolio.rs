//! The two allocation targets and the balances held in them.

use crate::types::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Instrument {
    Volatile,
    LongTerm,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Volatile, Instrument::LongTerm];

    /// Stable id, matches the serialized form.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Volatile => "volatile",
            Self::LongTerm => "longTerm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Volatile => "Volatile ETF",
            Self::LongTerm => "Long-Term ETF",
        }
    }
}

/// Value currently allocated to each instrument.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investments {
    pub volatile:  Money,
    pub long_term: Money,
}

impl Investments {
    pub fn get(&self, instrument: Instrument) -> Money {
        match instrument {
            Instrument::Volatile => self.volatile,
            Instrument::LongTerm => self.long_term,
        }
    }

    pub fn get_mut(&mut self, instrument: Instrument) -> &mut Money {
        match instrument {
            Instrument::Volatile => &mut self.volatile,
            Instrument::LongTerm => &mut self.long_term,
        }
    }

    pub fn total(&self) -> Money {
        self.volatile + self.long_term
    }
}
