//! Effect dispatcher.
//!
//! Translates the effect list a transition returns into calls against the
//! host collaborators, applying the user's notification preferences. Every
//! collaborator call is best-effort: a failure is logged and swallowed and
//! never blocks or reverts the state transition that produced it.

use crate::effect::{Boundary, Effect, Pulse};
use crate::settings::{NotificationMode, NotificationPrefs};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a scheduled reminder should present to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    /// Play the platform notification sound.
    pub sound: bool,
}

impl ReminderPayload {
    fn for_boundary(boundary: Boundary, mode: NotificationMode) -> Self {
        let sound = mode == NotificationMode::Sound;
        match boundary {
            Boundary::WorkEnd => Self {
                title: "Break Time!".into(),
                body: "Great focus session. Take a well-deserved break.".into(),
                sound,
            },
            Boundary::BreakEnd => Self {
                title: "Back to Work".into(),
                body: "Break is over. Ready for another focused session?".into(),
                sound,
            },
        }
    }
}

/// Local notification scheduling, keyed by fixed reminder ids.
pub trait ReminderScheduler {
    /// Schedule a reminder at an absolute instant, replacing any pending
    /// reminder with the same id. Returns a platform handle if one exists.
    fn schedule_at(
        &mut self,
        id: &str,
        at_ms: u64,
        payload: ReminderPayload,
    ) -> Result<Option<String>, BoxError>;

    fn cancel(&mut self, id: &str) -> Result<(), BoxError>;

    fn cancel_all(&mut self) -> Result<(), BoxError>;
}

/// Haptic/audio cues. Fire-and-forget.
pub trait FeedbackSink {
    /// Mode-dependent pulse for phase boundaries.
    fn trigger(&mut self, mode: NotificationMode) -> Result<(), BoxError>;

    /// Light tap acknowledging a button press.
    fn light(&mut self) -> Result<(), BoxError>;

    /// Medium tap for significant actions.
    fn medium(&mut self) -> Result<(), BoxError>;
}

/// Statistics accrual.
pub trait StatsSink {
    fn add_work_time(&mut self, duration_ms: u64) -> Result<(), BoxError>;

    fn increment_session_count(&mut self) -> Result<(), BoxError>;
}

/// Applies effects to the collaborators.
///
/// Gating rules: a reminder is armed only when the notification it will
/// deliver is enabled (work-end reminders announce the break, break-end
/// reminders the return to work), the mode is not silent, and its instant
/// is still in the future. Boundary pulses follow the flag of the phase
/// being entered; light/medium acknowledgements and the session-complete
/// pulse always fire.
pub struct Dispatcher<'a> {
    reminders: &'a mut dyn ReminderScheduler,
    feedback: &'a mut dyn FeedbackSink,
    stats: &'a mut dyn StatsSink,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        reminders: &'a mut dyn ReminderScheduler,
        feedback: &'a mut dyn FeedbackSink,
        stats: &'a mut dyn StatsSink,
    ) -> Self {
        Self {
            reminders,
            feedback,
            stats,
        }
    }

    pub fn dispatch(&mut self, prefs: &NotificationPrefs, now_ms: u64, effects: &[Effect]) {
        for effect in effects {
            self.apply(prefs, now_ms, effect);
        }
    }

    fn apply(&mut self, prefs: &NotificationPrefs, now_ms: u64, effect: &Effect) {
        match effect {
            Effect::ArmReminder { boundary, at_ms } => {
                let enabled = match boundary {
                    Boundary::WorkEnd => prefs.notify_break_start,
                    Boundary::BreakEnd => prefs.notify_work_resume,
                };
                if !enabled || prefs.mode.is_silent() || *at_ms <= now_ms {
                    return;
                }
                let payload = ReminderPayload::for_boundary(*boundary, prefs.mode);
                if let Err(e) = self
                    .reminders
                    .schedule_at(boundary.reminder_id(), *at_ms, payload)
                {
                    tracing::warn!(id = boundary.reminder_id(), error = %e, "failed to schedule reminder");
                }
            }
            Effect::CancelReminders => {
                if let Err(e) = self.reminders.cancel_all() {
                    tracing::warn!(error = %e, "failed to cancel reminders");
                }
            }
            Effect::Pulse(pulse) => self.pulse(prefs, *pulse),
            Effect::AddWorkTime { duration_ms } => {
                if let Err(e) = self.stats.add_work_time(*duration_ms) {
                    tracing::warn!(error = %e, "failed to record work time");
                }
            }
            Effect::IncrementSessions => {
                if let Err(e) = self.stats.increment_session_count() {
                    tracing::warn!(error = %e, "failed to record completed session");
                }
            }
        }
    }

    fn pulse(&mut self, prefs: &NotificationPrefs, pulse: Pulse) {
        let result = match pulse {
            Pulse::Light => self.feedback.light(),
            Pulse::Medium => self.feedback.medium(),
            Pulse::BreakStarted if prefs.notify_break_start => self.feedback.trigger(prefs.mode),
            Pulse::WorkResumed if prefs.notify_work_resume => self.feedback.trigger(prefs.mode),
            Pulse::SessionComplete => self.feedback.trigger(prefs.mode),
            _ => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(?pulse, error = %e, "feedback trigger failed");
        }
    }
}
