//! End-to-end session flow: state machine + dispatcher + storage.
//!
//! Drives a two-cycle session (work 1000ms / break 500ms / session 3000ms)
//! through the dispatcher with a recording scheduler and feedback sink and
//! the real kv-backed statistics ledger.

use pomodowork_core::dispatch::BoxError;
use pomodowork_core::storage::StatsLedger;
use pomodowork_core::{
    Database, Dispatcher, FeedbackSink, NotificationMode, Phase, Profile, ReminderPayload,
    ReminderScheduler, Session, Settings,
};

#[derive(Default)]
struct ReminderLog {
    scheduled: Vec<(String, u64)>,
    pending: Vec<String>,
}

impl ReminderScheduler for ReminderLog {
    fn schedule_at(
        &mut self,
        id: &str,
        at_ms: u64,
        _payload: ReminderPayload,
    ) -> Result<Option<String>, BoxError> {
        self.scheduled.push((id.to_string(), at_ms));
        self.pending.retain(|p| p != id);
        self.pending.push(id.to_string());
        Ok(Some(id.to_string()))
    }

    fn cancel(&mut self, id: &str) -> Result<(), BoxError> {
        self.pending.retain(|p| p != id);
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<(), BoxError> {
        self.pending.clear();
        Ok(())
    }
}

#[derive(Default)]
struct FeedbackLog {
    triggers: usize,
    lights: usize,
    mediums: usize,
}

impl FeedbackSink for FeedbackLog {
    fn trigger(&mut self, _mode: NotificationMode) -> Result<(), BoxError> {
        self.triggers += 1;
        Ok(())
    }

    fn light(&mut self) -> Result<(), BoxError> {
        self.lights += 1;
        Ok(())
    }

    fn medium(&mut self) -> Result<(), BoxError> {
        self.mediums += 1;
        Ok(())
    }
}

fn two_cycle_profile() -> Profile {
    Profile {
        id: "it".into(),
        name: "Integration".into(),
        work_duration_ms: 1_000,
        break_duration_ms: 500,
        session_duration_ms: 3_000,
        created_at: 0,
        updated_at: 0,
    }
}

#[test]
fn two_cycle_session_accrues_stats_and_manages_reminders() {
    let db = Database::open_memory().unwrap();
    let settings = Settings::default();
    let mut reminders = ReminderLog::default();
    let mut feedback = FeedbackLog::default();

    let mut session = Session::new();
    let profile = two_cycle_profile();

    // t=0: start. Work until 1000, work-end reminder armed.
    let effects = session.start(&profile, 0);
    {
        let mut stats = StatsLedger::new(&db);
        Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
            &settings.notifications,
            0,
            &effects,
        );
    }
    assert_eq!(session.phase(), Phase::Work);
    assert_eq!(reminders.pending, vec!["break-start".to_string()]);

    // t=1000: work done, break until 1500, break-end reminder armed.
    let effects = session.tick(1_000);
    {
        let mut stats = StatsLedger::new(&db);
        Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
            &settings.notifications,
            1_000,
            &effects,
        );
    }
    assert_eq!(session.phase(), Phase::Break);
    assert_eq!(session.completed_cycles(), 1);
    assert_eq!(reminders.pending.last().unwrap(), "work-resume");
    assert_eq!(db.stats().unwrap().total_work_ms, 1_000);

    // t=1500: break done, second work phase anchored to now (until 2500).
    let effects = session.tick(1_500);
    {
        let mut stats = StatsLedger::new(&db);
        Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
            &settings.notifications,
            1_500,
            &effects,
        );
    }
    assert_eq!(session.phase(), Phase::Work);
    assert_eq!(session.end_ms(), Some(2_500));
    assert_eq!(session.completed_cycles(), 1);

    // t=2500: final work phase completes the session.
    let effects = session.tick(2_500);
    {
        let mut stats = StatsLedger::new(&db);
        Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
            &settings.notifications,
            2_500,
            &effects,
        );
    }
    assert!(session.is_idle());
    assert!(reminders.pending.is_empty());

    let stats = db.stats().unwrap();
    assert_eq!(stats.total_work_ms, 2_000);
    assert_eq!(stats.completed_sessions, 1);

    // One mode-dependent pulse per phase change plus the session-complete
    // pulse: break start, work resume, session complete.
    assert_eq!(feedback.triggers, 3);
    // One light acknowledgement for the start press, no reset.
    assert_eq!(feedback.lights, 1);
    assert_eq!(feedback.mediums, 0);

    // Three schedule calls total: work end at start, break end, next work end.
    assert_eq!(
        reminders.scheduled,
        vec![
            ("break-start".to_string(), 1_000),
            ("work-resume".to_string(), 1_500),
            ("break-start".to_string(), 2_500),
        ]
    );
}

#[test]
fn pause_resume_mid_session_survives_storage_round_trip() {
    let db = Database::open_memory().unwrap();
    let settings = Settings::default();
    let mut reminders = ReminderLog::default();
    let mut feedback = FeedbackLog::default();

    let mut session = Session::new();
    let profile = two_cycle_profile();
    session.start(&profile, 0);
    session.tick(400);

    // Pause cancels the pending reminder.
    let effects = session.pause(400);
    {
        let mut stats = StatsLedger::new(&db);
        Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
            &settings.notifications,
            400,
            &effects,
        );
    }
    assert!(reminders.pending.is_empty());
    assert_eq!(session.remaining_ms(), 600);

    // A host restart: persist, drop, reload.
    db.set_session(&session).unwrap();
    let mut session = db.session().unwrap();
    assert!(!session.is_running());
    assert_eq!(session.remaining_ms(), 600);

    // Resume 10 minutes later: the phase picks up where it left off.
    let effects = session.resume(600_400);
    {
        let mut stats = StatsLedger::new(&db);
        Dispatcher::new(&mut reminders, &mut feedback, &mut stats).dispatch(
            &settings.notifications,
            600_400,
            &effects,
        );
    }
    assert_eq!(session.end_ms(), Some(601_000));
    assert_eq!(reminders.pending, vec!["break-start".to_string()]);
}
