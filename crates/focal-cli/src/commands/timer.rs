use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use focal_core::display::format_clock;
use focal_core::{AdjustDirection, Database, Event, FocusStore, SessionOutcome};
use tokio::time;

use super::{load_store, save_store};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown for the current phase
    Start,
    /// Cancel the running session
    Cancel,
    /// End the current phase and advance to the next one
    Skip,
    /// Add one adjustment step to the countdown target
    Up,
    /// Remove one adjustment step from the countdown target
    Down,
    /// Print the current timer state as JSON
    Status,
    /// Render the countdown every second until it finishes or ctrl-c
    Watch,
}

/// Write a finished session to the history. Events that don't end a session
/// record nothing.
fn record_outcome(
    db: &Database,
    store: &FocusStore,
    event: &Event,
) -> Result<(), Box<dyn std::error::Error>> {
    let (session_id, phase, outcome, initial_secs, started_at, at) = match event {
        Event::SessionCancelled { session_id, phase, initial_secs, started_at, at } => {
            (session_id, *phase, SessionOutcome::Cancelled, *initial_secs, *started_at, *at)
        }
        Event::PhaseSkipped { session_id, from, initial_secs, started_at, at, .. } => {
            (session_id, *from, SessionOutcome::Skipped, *initial_secs, *started_at, *at)
        }
        Event::SessionCompleted { session_id, phase, initial_secs, started_at, at, .. } => {
            (session_id, *phase, SessionOutcome::Completed, *initial_secs, *started_at, *at)
        }
        _ => return Ok(()),
    };
    db.record_session(
        session_id,
        phase,
        outcome,
        initial_secs,
        store.session().user_accepted_recommendation,
        started_at,
        at,
    )?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut store = load_store(&db);

    match action {
        TimerAction::Start => match store.start_timer() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&store.snapshot())?),
        },
        TimerAction::Cancel => match store.cancel_timer() {
            Some(event) => {
                record_outcome(&db, &store, &event)?;
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            None => {
                eprintln!("no active session to cancel");
                std::process::exit(1);
            }
        },
        TimerAction::Skip => match store.skip_timer() {
            Some(event) => {
                record_outcome(&db, &store, &event)?;
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            None => {
                eprintln!("no active session to skip");
                std::process::exit(1);
            }
        },
        TimerAction::Up => adjust(&mut store, AdjustDirection::Up)?,
        TimerAction::Down => adjust(&mut store, AdjustDirection::Down)?,
        TimerAction::Status => {
            // Tick once so a countdown that ran out while no process was
            // watching still completes and lands in the history.
            if let Some(event) = store.tick() {
                record_outcome(&db, &store, &event)?;
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        }
        TimerAction::Watch => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(watch_loop(&db, &mut store))?;
        }
    }

    save_store(&db, &store)?;
    Ok(())
}

fn adjust(
    store: &mut FocusStore,
    direction: AdjustDirection,
) -> Result<(), Box<dyn std::error::Error>> {
    match store.adjust_time(direction) {
        Some(event) => {
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(())
        }
        None => {
            eprintln!("cannot adjust the countdown while it is running");
            std::process::exit(1);
        }
    }
}

/// The 1-second polling loop. Recomputes live time from the wall clock and
/// re-renders; the interval is dropped on every exit path, including ctrl-c.
async fn watch_loop(
    db: &Database,
    store: &mut FocusStore,
) -> Result<(), Box<dyn std::error::Error>> {
    if !store.is_active() {
        println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        return Ok(());
    }

    let mut interval = time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(event) = store.tick() {
                    record_outcome(db, store, &event)?;
                    println!();
                    println!("{}", serde_json::to_string_pretty(&event)?);
                    break;
                }
                let live = store.live_secs();
                let progress = store.session().progress();
                print!(
                    "\r{} {}  {:>5.1}%",
                    store.phase().name(),
                    format_clock(live),
                    progress * 100.0
                );
                std::io::stdout().flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }
    Ok(())
}
