//! One player's game, held in memory.
//!
//! The session is the presentation layer's handle: it owns the current
//! state, replaces it only when a transition succeeds, and keeps the
//! chronological event log for that game.

use crate::{
    action::PlayerAction,
    engine::QuarterEngine,
    error::GameResult,
    event::GameEvent,
    snapshot::{GameSummary, YearRecap},
    state::PlayerState,
    timeline::MarketEvent,
};

pub struct GameSession<'t> {
    engine: QuarterEngine<'t>,
    state:  PlayerState,
    log:    Vec<GameEvent>,
}

impl GameSession<'static> {
    pub fn standard() -> Self {
        Self::new(QuarterEngine::standard())
    }
}

impl<'t> GameSession<'t> {
    pub fn new(engine: QuarterEngine<'t>) -> Self {
        let state = engine.initialize();
        Self { engine, state, log: Vec::new() }
    }

    pub fn engine(&self) -> &QuarterEngine<'t> {
        &self.engine
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Every event since the last (re)start, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.log
    }

    /// Apply an action. On error the held state is left as it was.
    /// Returns the events this action produced.
    ///
    /// After game over only the first ignored action is logged, so a
    /// client that keeps sending actions cannot grow the log.
    pub fn dispatch(&mut self, action: PlayerAction) -> GameResult<&[GameEvent]> {
        let transition = self.engine.step(&self.state, &action)?;
        let first_new = self.log.len();
        let already_ignoring = matches!(self.log.last(), Some(GameEvent::ActionIgnored { .. }));
        self.state = transition.state;
        if !(self.state.is_over && already_ignoring) {
            self.log.extend(transition.events);
        }
        Ok(&self.log[first_new..])
    }

    /// Throw the current game away and start over.
    pub fn restart(&mut self) {
        log::info!("Session restarted");
        self.state = self.engine.initialize();
        self.log.clear();
    }

    pub fn current_event(&self) -> GameResult<Option<&'t MarketEvent>> {
        self.engine.current_event(&self.state)
    }

    /// The most recent resolved quarter, for the "last result" panel.
    pub fn last_resolution(&self) -> Option<&GameEvent> {
        self.log
            .iter()
            .rev()
            .find(|e| matches!(e, GameEvent::QuarterResolved { .. }))
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_state(&self.state)
    }

    pub fn recap(&self) -> Vec<YearRecap> {
        YearRecap::rows(&self.state)
    }
}
