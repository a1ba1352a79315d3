//! Transition effects.
//!
//! Every state-machine transition returns the list of side effects the
//! caller should dispatch. The machine itself never touches a collaborator,
//! which keeps it synchronous and unit-testable without mocking timers.

use serde::{Deserialize, Serialize};

/// The phase boundary a reminder fires at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// End of a work phase; the reminder announces the break.
    WorkEnd,
    /// End of a break phase; the reminder calls the user back to work.
    BreakEnd,
}

impl Boundary {
    /// Fixed reminder identifier. Scheduling the same id again replaces the
    /// pending reminder instead of accumulating a second one.
    pub fn reminder_id(self) -> &'static str {
        match self {
            Boundary::WorkEnd => "break-start",
            Boundary::BreakEnd => "work-resume",
        }
    }
}

/// Haptic/sound cue kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pulse {
    /// Button-press acknowledgement (start, pause, resume).
    Light,
    /// Reset acknowledgement.
    Medium,
    /// A break just began.
    BreakStarted,
    /// A work phase just began after a break.
    WorkResumed,
    /// The whole session finished.
    SessionComplete,
}

/// One side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Schedule (or replace) the reminder for the given boundary.
    ArmReminder { boundary: Boundary, at_ms: u64 },
    /// Drop every pending reminder.
    CancelReminders,
    /// Haptic/sound cue.
    Pulse(Pulse),
    /// Accrue finished work time into the statistics.
    AddWorkTime { duration_ms: u64 },
    /// Count one fully completed session.
    IncrementSessions,
}
