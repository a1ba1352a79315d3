use chrono::{TimeZone, Utc};
use clap::Subcommand;
use pomodowork_core::storage::{Database, ProfileBook, StatsLedger};
use pomodowork_core::timer::{format_countdown, now_ms};
use pomodowork_core::{Dispatcher, Effect, Session};

use crate::platform::{ConsoleFeedback, KvReminders};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a session with the active (or given) profile
    Start {
        /// Profile id to use instead of the active one
        #[arg(long)]
        profile: Option<String>,
    },
    /// Pause the running phase
    Pause,
    /// Resume a paused phase
    Resume,
    /// Re-evaluate the clock once (periodic tick / foreground resume)
    Tick,
    /// Abandon the session and return to idle
    Reset,
    /// Re-evaluate, then print the session snapshot as JSON
    Status,
    /// Show pending reminders
    Next,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        TimerAction::Start { profile } => start(&db, profile.as_deref()),
        TimerAction::Pause => pause(&db),
        TimerAction::Resume => resume(&db),
        TimerAction::Tick => tick(&db),
        TimerAction::Reset => reset(&db),
        TimerAction::Status => status(&db),
        TimerAction::Next => next(&db),
    }
}

/// Persist the snapshot, then hand the effects to the dispatcher. Storage
/// first: a failed collaborator must never lose the transition.
fn dispatch_and_save(
    db: &Database,
    session: &Session,
    now: u64,
    effects: &[Effect],
) -> Result<(), Box<dyn std::error::Error>> {
    db.set_session(session)?;
    let settings = db.settings()?;
    let mut reminders = KvReminders::new(db);
    let mut feedback = ConsoleFeedback;
    let mut stats = StatsLedger::new(db);
    Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
        &settings.notifications,
        now,
        effects,
    );
    Ok(())
}

/// Drain the clock: one invocation may have to step through several phase
/// boundaries if the process was gone long enough to sleep through them.
fn drain_ticks(session: &mut Session, now: u64) -> Vec<Effect> {
    let mut effects = Vec::new();
    loop {
        let step = session.tick(now);
        if step.is_empty() {
            break;
        }
        effects.extend(step);
    }
    effects
}

fn start(db: &Database, profile_id: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let book = ProfileBook::load(db)?;
    let profile = match profile_id {
        Some(id) => book
            .get(id)
            .ok_or_else(|| format!("unknown profile '{id}'"))?,
        None => book
            .active()
            .ok_or("no active profile; pick one with `pomodowork profile use <id>`")?,
    };

    let mut session = db.session()?;
    if !session.is_idle() {
        return Err("a session is already in progress; `pomodowork timer reset` first".into());
    }

    let now = now_ms();
    let effects = session.start(profile, now);
    dispatch_and_save(db, &session, now, &effects)?;
    println!(
        "Started '{}': {} cycles, work ends in {}",
        profile.name,
        session.target_cycles(),
        format_countdown(session.remaining_ms())
    );
    Ok(())
}

fn pause(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = db.session()?;
    let now = now_ms();
    let effects = session.pause(now);
    if effects.is_empty() {
        println!("Nothing to pause.");
        return Ok(());
    }
    dispatch_and_save(db, &session, now, &effects)?;
    println!(
        "Paused {} with {} left.",
        session.phase(),
        format_countdown(session.remaining_ms())
    );
    Ok(())
}

fn resume(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = db.session()?;
    let now = now_ms();
    let effects = session.resume(now);
    if effects.is_empty() {
        println!("Nothing to resume.");
        return Ok(());
    }
    dispatch_and_save(db, &session, now, &effects)?;
    println!(
        "Resumed {}: ends in {}.",
        session.phase(),
        format_countdown(session.remaining_ms())
    );
    Ok(())
}

fn tick(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = db.session()?;
    let now = now_ms();
    let effects = drain_ticks(&mut session, now);
    dispatch_and_save(db, &session, now, &effects)?;
    print_state(&session);
    Ok(())
}

fn reset(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = db.session()?;
    let now = now_ms();
    let effects = session.reset();
    dispatch_and_save(db, &session, now, &effects)?;
    println!("Reset.");
    Ok(())
}

fn status(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = db.session()?;
    let now = now_ms();
    let effects = drain_ticks(&mut session, now);
    dispatch_and_save(db, &session, now, &effects)?;
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

fn next(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let pending = KvReminders::pending(db);
    if pending.is_empty() {
        println!("No pending reminders.");
        return Ok(());
    }
    for (id, reminder) in &pending {
        let at = Utc
            .timestamp_millis_opt(reminder.at_ms as i64)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| reminder.at_ms.to_string());
        println!("  {id}: '{}' at {at}", reminder.title);
    }
    Ok(())
}

fn print_state(session: &Session) {
    if session.is_idle() {
        println!("Idle.");
    } else if session.is_running() {
        println!(
            "{}: {} remaining ({} of {} cycles done)",
            session.phase(),
            format_countdown(session.remaining_ms()),
            session.completed_cycles(),
            session.target_cycles()
        );
    } else {
        println!(
            "{} paused: {} remaining",
            session.phase(),
            format_countdown(session.remaining_ms())
        );
    }
}
