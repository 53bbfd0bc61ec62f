//! The quarter engine — the single authoritative transition rule.
//!
//! RESOLUTION ORDER for AdvanceQuarter (fixed, never reordered):
//!   1. Deposit the quarterly contribution into cash and baseline
//!   2. Apply each instrument's return to its accumulated balance
//!   3. Decay cash and baseline by a quarter of the year's inflation
//!   4. On Q4: append year-end snapshots, roll into the next year
//!   5. Past the timeline's last year: mark the game over
//!
//! RULES:
//!   - The input state is never touched; every call returns a new value.
//!   - Allocate/Deallocate only move money. No clock, no returns.
//!   - Out-of-range amounts are clamped to [0, available], never rejected.
//!   - A timeline miss is a config fault: return Err, produce no state.
//!   - Once the game is over, every action is a no-op.

use crate::{
    action::PlayerAction,
    config::GameConfig,
    error::GameResult,
    event::GameEvent,
    portfolio::Instrument,
    snapshot::BaselineSnapshot,
    state::PlayerState,
    timeline::{MarketEvent, Timeline},
    types::{Money, QUARTERS_PER_YEAR},
};

/// The outcome of one action: the new state plus what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state:  PlayerState,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone)]
pub struct QuarterEngine<'t> {
    timeline: &'t Timeline,
    config:   GameConfig,
}

impl QuarterEngine<'static> {
    /// Engine over the built-in script with shipped parameters.
    pub fn standard() -> Self {
        Self::new(Timeline::standard(), GameConfig::default())
    }
}

impl<'t> QuarterEngine<'t> {
    pub fn new(timeline: &'t Timeline, config: GameConfig) -> Self {
        Self { timeline, config }
    }

    pub fn timeline(&self) -> &'t Timeline {
        self.timeline
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn initialize(&self) -> PlayerState {
        PlayerState::initial(&self.config)
    }

    pub fn advance(&self, state: &PlayerState, action: &PlayerAction) -> GameResult<PlayerState> {
        self.step(state, action).map(|t| t.state)
    }

    /// Apply one action. Pure: same inputs, same output.
    pub fn step(&self, state: &PlayerState, action: &PlayerAction) -> GameResult<Transition> {
        if state.is_over {
            log::warn!("{} received after game over; ignoring", action.kind());
            return Ok(Transition {
                state:  state.clone(),
                events: vec![GameEvent::ActionIgnored { action: action.kind().to_string() }],
            });
        }

        match *action {
            PlayerAction::Allocate { instrument, amount } => {
                Ok(self.allocate(state, instrument, amount))
            }
            PlayerAction::Deallocate { instrument, amount } => {
                Ok(self.deallocate(state, instrument, amount))
            }
            PlayerAction::AdvanceQuarter => self.resolve_quarter(state),
        }
    }

    /// The event for the quarter the player is about to resolve.
    /// `Ok(None)` once the game is over; a miss on an active game is a
    /// config fault, same as in `advance`.
    pub fn current_event(&self, state: &PlayerState) -> GameResult<Option<&'t MarketEvent>> {
        if state.is_over {
            return Ok(None);
        }
        self.timeline
            .event_for(state.year, state.quarter)
            .map(Some)
            .map_err(|e| {
                log::error!("No event for {}: {e}", state.period());
                e
            })
    }

    fn allocate(&self, state: &PlayerState, instrument: Instrument, amount: Money) -> Transition {
        let mut next = state.clone();
        let transfer = clamp_transfer(amount, state.cash);
        let mut events = Vec::new();

        if transfer != amount {
            events.push(GameEvent::ActionClamped {
                period:    state.period(),
                action:    "allocate".into(),
                requested: amount,
                applied:   transfer,
            });
        }
        if transfer > 0.0 {
            next.cash -= transfer;
            *next.investments.get_mut(instrument) += transfer;
            log::debug!(
                "{} allocate {transfer:.2} -> {} (cash {:.2})",
                state.period(),
                instrument.id(),
                next.cash
            );
            events.push(GameEvent::CashAllocated {
                period: state.period(),
                instrument,
                amount: transfer,
            });
        } else {
            log::warn!("{} allocate of {amount} clamped to nothing", state.period());
        }

        Transition { state: next, events }
    }

    fn deallocate(&self, state: &PlayerState, instrument: Instrument, amount: Money) -> Transition {
        let mut next = state.clone();
        let transfer = clamp_transfer(amount, state.holding(instrument));
        let mut events = Vec::new();

        if transfer != amount {
            events.push(GameEvent::ActionClamped {
                period:    state.period(),
                action:    "deallocate".into(),
                requested: amount,
                applied:   transfer,
            });
        }
        if transfer > 0.0 {
            *next.investments.get_mut(instrument) -= transfer;
            next.cash += transfer;
            log::debug!(
                "{} withdraw {transfer:.2} <- {} (cash {:.2})",
                state.period(),
                instrument.id(),
                next.cash
            );
            events.push(GameEvent::CashWithdrawn {
                period: state.period(),
                instrument,
                amount: transfer,
            });
        } else {
            log::warn!("{} withdraw of {amount} clamped to nothing", state.period());
        }

        Transition { state: next, events }
    }

    fn resolve_quarter(&self, state: &PlayerState) -> GameResult<Transition> {
        let period = state.period();

        // Both lookups happen before anything changes.
        let event = self.timeline.event_for(period.year, period.quarter).map_err(|e| {
            log::error!("Cannot resolve {period}: {e}");
            e
        })?;
        let inflation = self.timeline.inflation_for(period.year).map_err(|e| {
            log::error!("Cannot resolve {period}: {e}");
            e
        })?;

        let mut next = state.clone();
        let mut events = Vec::new();

        // 1. Contribution
        let contribution = self.config.quarterly_contribution;
        next.cash += contribution;
        next.baseline_savings += contribution;
        events.push(GameEvent::ContributionDeposited { period, amount: contribution });

        // 2. Returns on what was already invested
        for instrument in Instrument::ALL {
            *next.investments.get_mut(instrument) *= 1.0 + event.returns.get(instrument);
        }

        // 3. Inflation on uninvested balances only
        let decay = 1.0 - inflation / QUARTERS_PER_YEAR as f64;
        let cash_before_inflation = next.cash;
        next.cash *= decay;
        next.baseline_savings *= decay;

        events.push(GameEvent::QuarterResolved {
            period,
            condition:        event.condition.clone(),
            returns:          event.returns,
            inflation,
            volatile_change:  next.investments.volatile - state.investments.volatile,
            long_term_change: next.investments.long_term - state.investments.long_term,
            inflation_loss:   cash_before_inflation - next.cash,
        });

        log::debug!(
            "{period} resolved: {} vol={:+.3} lt={:+.3} infl={:.3} cash={:.2} total={:.2}",
            event.condition,
            event.returns.volatile,
            event.returns.long_term,
            inflation,
            next.cash,
            next.total_value()
        );

        // 4. Year close and clock
        let (upcoming, closed_year) = period.next();
        if closed_year {
            let snapshot = next.snapshot();
            let baseline = BaselineSnapshot { year: period.year, value: next.baseline_savings };
            next.history.push(snapshot);
            next.baseline_history.push(baseline);
            log::info!(
                "Year {} closed: portfolio {:.2}, baseline {:.2}",
                period.year,
                snapshot.total_value,
                baseline.value
            );
            events.push(GameEvent::YearClosed { snapshot, baseline });
        }
        next.year = upcoming.year;
        next.quarter = upcoming.quarter;

        // 5. Game over
        if next.year > self.timeline.last_year() {
            next.is_over = true;
            log::info!(
                "Game over: final value {:.2} vs baseline {:.2}",
                next.total_value(),
                next.baseline_savings
            );
            events.push(GameEvent::GameOver {
                final_value:    next.total_value(),
                baseline_value: next.baseline_savings,
            });
        }

        Ok(Transition { state: next, events })
    }
}

/// Clamp a requested transfer into [0, available]. NaN moves nothing.
fn clamp_transfer(requested: Money, available: Money) -> Money {
    if requested.is_nan() {
        return 0.0;
    }
    requested.clamp(0.0, available.max(0.0))
}

/// Start a game on the built-in script.
pub fn initialize() -> PlayerState {
    QuarterEngine::standard().initialize()
}

/// Apply one action on the built-in script.
pub fn advance(state: &PlayerState, action: &PlayerAction) -> GameResult<PlayerState> {
    QuarterEngine::standard().advance(state, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_transfer_bounds() {
        assert_eq!(clamp_transfer(500.0, 1000.0), 500.0);
        assert_eq!(clamp_transfer(1500.0, 1000.0), 1000.0);
        assert_eq!(clamp_transfer(-20.0, 1000.0), 0.0);
        assert_eq!(clamp_transfer(f64::NAN, 1000.0), 0.0);
        assert_eq!(clamp_transfer(f64::INFINITY, 1000.0), 1000.0);
        assert_eq!(clamp_transfer(10.0, 0.0), 0.0);
    }

    #[test]
    fn standard_engine_uses_shipped_parameters() {
        let engine = QuarterEngine::standard();
        assert_eq!(engine.config(), &GameConfig::default());
        assert_eq!(engine.timeline().last_year(), 5);
    }

    #[test]
    fn current_event_tracks_clock() {
        let engine = QuarterEngine::standard();
        let s0 = engine.initialize();
        assert_eq!(engine.current_event(&s0).unwrap().unwrap().condition, "Strong Growth");

        let s1 = engine.advance(&s0, &PlayerAction::stand()).unwrap();
        assert_eq!(engine.current_event(&s1).unwrap().unwrap().condition, "Tech Correction");
    }

    #[test]
    fn clamped_request_reports_both_amounts() {
        let engine = QuarterEngine::standard();
        let s0 = engine.initialize();
        let t = engine
            .step(&s0, &PlayerAction::hit(Instrument::Volatile, 12_000.0))
            .unwrap();
        assert_eq!(
            t.events[0],
            GameEvent::ActionClamped {
                period:    s0.period(),
                action:    "allocate".into(),
                requested: 12_000.0,
                applied:   10_000.0,
            }
        );
        assert!(matches!(t.events[1], GameEvent::CashAllocated { amount, .. } if amount == 10_000.0));
    }
}
