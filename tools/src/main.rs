//! game-runner: headless driver for the hit-or-stand investing game.
//!
//! Usage:
//!   game-runner --strategy volatile
//!   game-runner --timeline my_script.json --config game_config.json --strategy split
//!   game-runner --ipc-mode

use anyhow::Result;
use hitstand_core::{
    event::GameEvent,
    snapshot::{GameSummary, YearRecap},
    GameConfig, GameSession, Instrument, MarketEvent, PlayerAction, PlayerState, QuarterEngine,
    Timeline,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Action { action: PlayerAction },
    Restart,
    Quit,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct UiState<'a> {
    state:         &'a PlayerState,
    current_event: Option<&'a MarketEvent>,
    last_events:   &'a [GameEvent],
    summary:       GameSummary,
}

/// Scripted play for non-interactive runs.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    Stand,
    Volatile,
    LongTerm,
    Split,
}

impl Strategy {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "stand"     => Some(Self::Stand),
            "volatile"  => Some(Self::Volatile),
            "long-term" => Some(Self::LongTerm),
            "split"     => Some(Self::Split),
            _ => None,
        }
    }

    /// Allocations to make before standing, given the cash on hand.
    fn allocations(&self, cash: f64) -> Vec<PlayerAction> {
        match self {
            Self::Stand    => vec![],
            Self::Volatile => vec![PlayerAction::hit(Instrument::Volatile, cash)],
            Self::LongTerm => vec![PlayerAction::hit(Instrument::LongTerm, cash)],
            Self::Split    => vec![
                PlayerAction::hit(Instrument::Volatile, cash / 2.0),
                PlayerAction::hit(Instrument::LongTerm, cash / 2.0),
            ],
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let strategy_name = arg_value(&args, "--strategy").unwrap_or("stand");
    let strategy = Strategy::parse(strategy_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown strategy: {strategy_name}"))?;

    let config = match arg_value(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let custom_timeline = arg_value(&args, "--timeline").map(|path| Timeline::load(path)).transpose()?;
    let timeline = custom_timeline.as_ref().unwrap_or_else(|| Timeline::standard());

    log::info!(
        "Starting game: {} quarters, ${:.2} start, ${:.2}/quarter",
        timeline.quarter_count(),
        config.starting_cash,
        config.quarterly_contribution
    );
    let mut session = GameSession::new(QuarterEngine::new(timeline, config));

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        println!("Hit or Stand: game-runner");
        println!("  strategy:  {strategy_name}");
        println!("  years:     {}", timeline.last_year());
        println!("  start:     ${:.2}", session.engine().config().starting_cash);
        println!();
        play_strategy(&mut session, strategy)?;
        print_summary(&session);
    }

    Ok(())
}

fn play_strategy(session: &mut GameSession, strategy: Strategy) -> Result<()> {
    while !session.state().is_over {
        for action in strategy.allocations(session.state().cash) {
            session.dispatch(action)?;
        }
        session.dispatch(PlayerAction::stand())?;
    }
    Ok(())
}

fn run_ipc_loop(session: &mut GameSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Malformed IPC line: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let produced = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => 0,
            IpcCommand::Restart => {
                session.restart();
                0
            }
            IpcCommand::Action { action } => match session.dispatch(action) {
                Ok(events) => events.len(),
                Err(e) => {
                    // Timeline faults are not recoverable mid-game.
                    let err_json = serde_json::json!({ "error": e.to_string(), "fatal": true });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    return Err(e.into());
                }
            },
        };

        let events = session.events();
        let state = UiState {
            state:         session.state(),
            current_event: session.current_event()?,
            last_events:   &events[events.len() - produced..],
            summary:       session.summary(),
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(session: &GameSession) {
    let summary = session.summary();

    println!("=== GAME SUMMARY ===");
    println!("  years played:   {}", summary.completed_years);
    println!("  final value:    ${:.2}", summary.final_value);
    println!("  profit:         ${:.2}", summary.profit);
    println!("  just saving:    ${:.2}", summary.baseline_value);
    println!(
        "  vs saving:      ${:.2} ({})",
        summary.lead,
        if summary.beat_baseline() { "investing won" } else { "saving won" }
    );

    println!();
    println!("=== YEAR BY YEAR ===");
    for row in session.recap() {
        println!("{}", recap_line(&row));
    }
}

fn recap_line(row: &YearRecap) -> String {
    format!(
        "  Y{} | Total: ${:.0} | Cash: ${:.0} | {}: ${:.0} | {}: ${:.0} | Saving: ${:.0}",
        row.year,
        row.total_value,
        row.cash,
        Instrument::Volatile.label(),
        row.volatile,
        Instrument::LongTerm.label(),
        row.long_term,
        row.baseline_value
    )
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
