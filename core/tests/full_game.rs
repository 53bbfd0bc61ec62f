//! Whole-game scenarios: 20 quarters from initialize() to game over.

use hitstand_core::{
    event::GameEvent, snapshot::{GameSummary, YearRecap}, EconomicYear, GameConfig, Instrument,
    MarketEvent, PlayerAction, PlayerState, QuarterEngine, Returns, Timeline,
};

fn flat_timeline(inflation: f64, volatile: f64, long_term: f64) -> Timeline {
    let years = (1..=5)
        .map(|year| EconomicYear {
            year,
            inflation,
            events: (1..=4)
                .map(|quarter| MarketEvent {
                    year,
                    quarter,
                    condition: "Flat".into(),
                    returns: Returns { volatile, long_term },
                    insight: String::new(),
                    misleading_insight: None,
                })
                .collect(),
        })
        .collect();
    Timeline::new(years).expect("valid timeline")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Invest every dollar of cash into `instrument`, then stand.
fn play_all_in(engine: &QuarterEngine, instrument: Instrument) -> PlayerState {
    let mut state = engine.initialize();
    while !state.is_over {
        state = engine
            .advance(&state, &PlayerAction::hit(instrument, state.cash))
            .unwrap();
        state = engine.advance(&state, &PlayerAction::stand()).unwrap();
    }
    state
}

#[test]
fn first_stand_deposits_then_inflates_cash() {
    let timeline = flat_timeline(0.025, 0.04, 0.02);
    let engine = QuarterEngine::new(&timeline, GameConfig::default());
    let s1 = engine
        .advance(&engine.initialize(), &PlayerAction::stand())
        .unwrap();

    assert!(approx(s1.cash, 12_421.875), "cash was {}", s1.cash);
    assert!(approx(s1.baseline_savings, 12_421.875));
    assert_eq!(s1.investments.volatile, 0.0);
    assert_eq!(s1.investments.long_term, 0.0);
    assert_eq!((s1.year, s1.quarter), (1, 2));
}

#[test]
fn twenty_stands_finish_the_game() {
    let timeline = flat_timeline(0.025, 0.04, 0.02);
    let engine = QuarterEngine::new(&timeline, GameConfig::default());
    let mut state = engine.initialize();

    for call in 1..=20 {
        assert!(!state.is_over, "game ended early, before call {call}");
        state = engine.advance(&state, &PlayerAction::stand()).unwrap();
    }

    assert!(state.is_over);
    assert_eq!(state.history.len(), 6);
    assert_eq!(state.baseline_history.len(), 6);
    let years: Vec<u32> = state.history.iter().map(|h| h.year).collect();
    assert_eq!(years, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn stand_only_tracks_baseline_exactly() {
    let engine = QuarterEngine::standard();
    let mut state = engine.initialize();

    while !state.is_over {
        state = engine.advance(&state, &PlayerAction::stand()).unwrap();
        assert_eq!(state.cash, state.baseline_savings);
    }
    for (h, b) in state.history.iter().zip(state.baseline_history.iter()) {
        assert_eq!(h.year, b.year);
        assert_eq!(h.total_value, b.value);
    }
    assert_eq!(GameSummary::from_state(&state).lead, 0.0);
}

#[test]
fn history_grows_once_per_closed_year() {
    let engine = QuarterEngine::standard();
    let mut state = engine.initialize();

    for call in 1..=20u32 {
        let before = state.history.clone();
        state = engine.advance(&state, &PlayerAction::stand()).unwrap();

        let expected_len = (call / 4) as usize + 1;
        assert_eq!(state.history.len(), expected_len, "after call {call}");
        assert_eq!(state.baseline_history.len(), expected_len, "after call {call}");
        assert_eq!(state.completed_years() + 1, state.history.len());
        assert_eq!(&state.history[..before.len()], &before[..], "past entries rewritten");
    }
}

#[test]
fn year_end_snapshot_records_breakdown() {
    let engine = QuarterEngine::standard();
    let mut state = engine.initialize();
    state = engine
        .advance(&state, &PlayerAction::hit(Instrument::LongTerm, 4_000.0))
        .unwrap();
    for _ in 0..4 {
        state = engine.advance(&state, &PlayerAction::stand()).unwrap();
    }

    let y1 = state.history[1];
    assert_eq!(y1.year, 1);
    assert!(approx(y1.total_value, y1.cash + y1.volatile + y1.long_term));
    assert!(approx(y1.long_term, 4_000.0 * 1.05 * 0.99 * 1.04 * 1.06));
    assert_eq!(y1.volatile, 0.0);
    assert_eq!((state.year, state.quarter), (2, 1));
}

#[test]
fn investing_beats_saving_on_the_standard_script() {
    let engine = QuarterEngine::standard();
    let volatile = GameSummary::from_state(&play_all_in(&engine, Instrument::Volatile));
    let long_term = GameSummary::from_state(&play_all_in(&engine, Instrument::LongTerm));

    assert!(volatile.is_over && long_term.is_over);
    assert!(volatile.beat_baseline(), "volatile lead {}", volatile.lead);
    assert!(long_term.beat_baseline(), "long-term lead {}", long_term.lead);
    assert!(volatile.final_value > long_term.final_value);
    assert!(approx(volatile.baseline_value, long_term.baseline_value));
}

#[test]
fn recap_pairs_portfolio_with_baseline() {
    let engine = QuarterEngine::standard();
    let state = play_all_in(&engine, Instrument::LongTerm);
    let rows = YearRecap::rows(&state);

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].lead, 0.0);
    for row in &rows {
        assert!(approx(row.lead, row.total_value - row.baseline_value));
    }
}

#[test]
fn last_stand_emits_year_close_and_game_over() {
    let engine = QuarterEngine::standard();
    let mut state = engine.initialize();
    for _ in 0..19 {
        state = engine.advance(&state, &PlayerAction::stand()).unwrap();
    }

    let t = engine.step(&state, &PlayerAction::stand()).unwrap();
    let names: Vec<&str> = t.events.iter().map(|e| e.type_name()).collect();
    assert_eq!(
        names,
        vec!["contribution_deposited", "quarter_resolved", "year_closed", "game_over"]
    );
    assert!(matches!(
        t.events.last(),
        Some(GameEvent::GameOver { final_value, .. }) if approx(*final_value, t.state.total_value())
    ));
}
