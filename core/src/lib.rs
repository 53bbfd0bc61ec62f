//! Core of the hit-or-stand investing game: a scripted five-year market
//! timeline and the pure quarter engine that plays a player through it.
//!
//! Presentation holds a `PlayerState`, sends `PlayerAction`s through
//! `QuarterEngine::advance` (or a `GameSession`), and renders the state
//! it gets back.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod portfolio;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod timeline;
pub mod types;

pub use action::PlayerAction;
pub use config::GameConfig;
pub use engine::{advance, initialize, QuarterEngine, Transition};
pub use error::{GameError, GameResult};
pub use portfolio::{Instrument, Investments};
pub use session::GameSession;
pub use state::PlayerState;
pub use timeline::{EconomicYear, MarketEvent, Returns, Timeline};
