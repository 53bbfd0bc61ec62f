use crate::types::{Quarter, Year};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Timeline has no event for year {year}, quarter {quarter}")]
    EventNotFound { year: Year, quarter: Quarter },

    #[error("Timeline has no entry for year {year}")]
    YearNotFound { year: Year },

    #[error("Invalid timeline: {reason}")]
    InvalidTimeline { reason: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GameError {
    /// True for faults caused by bad timeline or config content rather
    /// than by anything the player did.
    pub fn is_config_fault(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound { .. }
                | Self::YearNotFound { .. }
                | Self::InvalidTimeline { .. }
                | Self::InvalidConfig { .. }
        )
    }
}

pub type GameResult<T> = Result<T, GameError>;
