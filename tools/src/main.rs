//! sim-runner: headless runner for the Vibenópolis life sim.
//!
//! Usage:
//!   sim-runner --seed 12345 --days 30 --db run.db
//!   sim-runner --db run.db --run-id run-... --interactive

use anyhow::Result;
use chrono::Utc;
use lifesim_core::{
    action::{ActionOutcome, PlayerAction},
    config::GameConfig,
    engine::{new_run_id, GameEngine},
    state::GameState,
    store::GameStore,
    types::Day,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

// Away from the game, time crawls: one in-game day per ten real
// minutes, and never more than a month at once.
const OFFLINE_MINUTES_PER_DAY: i64 = 10;
const OFFLINE_CATCH_UP_CAP: i64 = 30;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RunnerCommand {
    State,
    Advance { days: u64 },
    Action { action: PlayerAction },
    Quit,
}

#[derive(serde::Serialize)]
struct RunnerReply<'a> {
    day_count: Day,
    applied: bool,
    notices: Vec<String>,
    state: &'a GameState,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 30u64);
    let interactive = args.iter().any(|a| a == "--interactive");
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = str_arg(&args, "--data-dir").unwrap_or("./data");
    let run_id = str_arg(&args, "--run-id")
        .map(str::to_string)
        .unwrap_or_else(new_run_id);

    if !interactive {
        println!("Vibenópolis sim-runner");
        println!("  seed:      {seed}");
        println!("  days:      {days}");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!("  run_id:    {run_id}");
        println!();
    }

    let (config, warnings) = GameConfig::load(Path::new(data_dir));

    let store = if db == ":memory:" {
        GameStore::in_memory()?
    } else {
        GameStore::open(db)?
    };
    store.migrate()?;

    // Resuming an existing run reuses its recorded seed; the --seed
    // flag only matters for fresh runs.
    let resuming = store.run_exists(&run_id)?;
    let seed = if resuming { store.run_seed(&run_id)? } else { seed };
    let offline_since = if resuming {
        store.last_played_at(&run_id)?
    } else {
        None
    };

    let mut engine = GameEngine::build(run_id.clone(), seed, config, store)?;

    let day = engine.state.calendar.day_count;
    for warning in &warnings {
        engine.store.append_notice(&run_id, day, warning)?;
    }

    if let Some(since) = offline_since {
        let minutes = (Utc::now() - since).num_minutes();
        let catch_up = (minutes / OFFLINE_MINUTES_PER_DAY).clamp(0, OFFLINE_CATCH_UP_CAP);
        if catch_up > 0 {
            log::info!("catching up {catch_up} offline day(s)");
            engine.advance_days(catch_up as u64)?;
        }
    }

    if interactive {
        run_command_loop(&mut engine)?;
    } else {
        engine.advance_days(days)?;
        print_summary(&engine)?;
    }

    engine.store.touch_run(&run_id)?;
    Ok(())
}

/// The JSON-lines loop the UI shell drives: one command per line on
/// stdin, one reply per line on stdout.
fn run_command_loop(engine: &mut GameEngine) -> Result<()> {
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

        let command: RunnerCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match command {
            RunnerCommand::Quit => break,
            RunnerCommand::State => {
                write_reply(&mut stdout, engine, true, Vec::new())?;
            }
            RunnerCommand::Advance { days } => {
                let mut notices = Vec::new();
                for _ in 0..days {
                    for event in engine.advance_day()? {
                        if let Some(text) = event.notice_text() {
                            notices.push(text);
                        }
                    }
                }
                write_reply(&mut stdout, engine, true, notices)?;
            }
            RunnerCommand::Action { action } => {
                let outcome = engine.dispatch(&action)?;
                let (applied, notices) = match outcome {
                    ActionOutcome::Applied { notices, .. } => (true, notices),
                    ActionOutcome::Rejected { notice } => (false, vec![notice]),
                };
                write_reply(&mut stdout, engine, applied, notices)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_reply(out: &mut impl Write, engine: &GameEngine, applied: bool, notices: Vec<String>) -> Result<()> {
    let reply = RunnerReply {
        day_count: engine.state.calendar.day_count,
        applied,
        notices,
        state: &engine.state,
    };
    writeln!(out, "{}", serde_json::to_string(&reply)?)?;
    Ok(())
}

fn print_summary(engine: &GameEngine) -> Result<()> {
    let state = &engine.state;
    let c = &state.character;
    let events = engine.store.event_count(&engine.run_id)?;
    let notices = engine.store.notice_count(&engine.run_id)?;

    println!("=== RUN SUMMARY ===");
    println!("  run_id:     {}", engine.run_id);
    println!(
        "  date:       day {} (year {}, month {}, {})",
        state.calendar.day_count, state.calendar.year, state.calendar.month, state.calendar.season
    );
    println!("  weather:    {}", state.calendar.weather);
    println!("  location:   {}", state.location);
    println!("  coins:      {}", state.resources.coins);
    println!(
        "  character:  health {} | mood {} | hunger {} | thirst {} | energy {}",
        c.health, c.mood, c.hunger, c.thirst, c.energy
    );
    println!(
        "  skills:     farming {} | trading {} | social {}",
        state.trade.farming_skill, state.trade.trading_skill, state.trade.social_skill
    );
    println!(
        "  farm:       {} crop(s), {} animal(s)",
        state.farm.crops.len(),
        state.farm.animals.len()
    );
    println!(
        "  missions:   {} offered | {} active | {} completed",
        state.missions.offered.len(),
        state.missions.active.len(),
        state.missions.completed.len()
    );
    println!(
        "  events:     {} on offer | {} attended",
        state.events.active.len(),
        state.events.history.len()
    );
    println!("  event log:  {events} entries");
    println!("  notices:    {notices} entries");
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
