//! Shared primitive types used across the entire game.

/// A simulated year. Play runs over years 1..=N; year 0 only appears
/// in history as the opening snapshot.
pub type Year = u32;

/// A quarter within a year, 1..=4.
pub type Quarter = u32;

/// A dollar amount.
pub type Money = f64;

/// A signed fraction, e.g. 0.12 for +12%.
pub type Rate = f64;

pub const QUARTERS_PER_YEAR: Quarter = 4;
