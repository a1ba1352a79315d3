//! Session state machine.
//!
//! Wall-clock based: the machine stores the absolute instant the current
//! phase ends rather than counting elapsed time, so an arbitrarily long
//! suspension costs nothing -- the next evaluation recomputes remaining
//! time from the deadline. No internal threads; the caller invokes
//! `tick()` once per second and on every foreground resume.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running(work) -> Running(break) -> Running(work) -> ... -> Idle
//!              ^  |             ^  |
//!              |  v             |  v
//!           Paused(work)    Paused(break)
//! ```
//!
//! Every command takes `now_ms` explicitly and returns the side effects the
//! caller should hand to the dispatcher. Commands whose precondition does
//! not hold are ignored: no state change, empty effect list.

use serde::{Deserialize, Serialize};

use super::clock::{self, ClockSignal};
use crate::effect::{Boundary, Effect, Pulse};
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Work,
    Break,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Work => "work",
            Phase::Break => "break",
        })
    }
}

/// The single in-progress timer. At most one session is active at a time;
/// the snapshot serializes so a host can persist it across process restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    phase: Phase,
    running: bool,
    /// Absolute instant (epoch ms) the current phase ends. Set exactly
    /// while running; a paused or idle session has no deadline.
    end_ms: Option<u64>,
    /// Remaining time captured at the last pause; authoritative only while
    /// paused. Refreshed on every tick for display.
    remaining_ms: u64,
    /// Work phases finished so far, incremented on each work->break
    /// transition.
    completed_cycles: u32,
    /// Copied from the active profile's derived cycle count at start.
    target_cycles: u32,
    /// Active profile, embedded so phase transitions know the durations.
    profile: Option<Profile>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            running: false,
            end_ms: None,
            remaining_ms: 0,
            completed_cycles: 0,
            target_cycles: 0,
            profile: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn end_ms(&self) -> Option<u64> {
        self.end_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn target_cycles(&self) -> u32 {
        self.target_cycles
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.id.as_str())
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if !self.running || self.end_ms.is_none() {
            return 0.0;
        }
        let Some(profile) = &self.profile else {
            return 0.0;
        };
        let phase_ms = match self.phase {
            Phase::Work => profile.work_duration_ms,
            Phase::Break => profile.break_duration_ms,
            Phase::Idle => return 0.0,
        };
        if phase_ms == 0 {
            return 0.0;
        }
        let elapsed = phase_ms.saturating_sub(self.remaining_ms);
        (elapsed as f64 / phase_ms as f64).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session with the given profile. Ignored unless idle.
    pub fn start(&mut self, profile: &Profile, now_ms: u64) -> Vec<Effect> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        let end = now_ms.saturating_add(profile.work_duration_ms);
        self.phase = Phase::Work;
        self.running = true;
        self.end_ms = Some(end);
        self.remaining_ms = profile.work_duration_ms;
        self.completed_cycles = 0;
        self.target_cycles = profile.cycle_count();
        self.profile = Some(profile.clone());
        vec![
            Effect::ArmReminder {
                boundary: Boundary::WorkEnd,
                at_ms: end,
            },
            Effect::Pulse(Pulse::Light),
        ]
    }

    /// Freeze the running phase, capturing its remaining time. Ignored
    /// unless running.
    pub fn pause(&mut self, now_ms: u64) -> Vec<Effect> {
        if self.phase == Phase::Idle || !self.running {
            return Vec::new();
        }
        if let Some(end) = self.end_ms {
            self.remaining_ms = end.saturating_sub(now_ms);
        }
        self.end_ms = None;
        self.running = false;
        vec![Effect::CancelReminders, Effect::Pulse(Pulse::Light)]
    }

    /// Continue a paused phase from its captured remaining time. Ignored
    /// unless paused.
    pub fn resume(&mut self, now_ms: u64) -> Vec<Effect> {
        let boundary = match self.phase {
            Phase::Work => Boundary::WorkEnd,
            Phase::Break => Boundary::BreakEnd,
            Phase::Idle => return Vec::new(),
        };
        if self.running {
            return Vec::new();
        }
        let end = now_ms.saturating_add(self.remaining_ms);
        self.end_ms = Some(end);
        self.running = true;
        vec![
            Effect::ArmReminder {
                boundary,
                at_ms: end,
            },
            Effect::Pulse(Pulse::Light),
        ]
    }

    /// One periodic/foreground re-evaluation of the clock. Updates the
    /// display value while time remains; drives the phase transition once
    /// the deadline has passed.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }
        match clock::evaluate(now_ms, self.end_ms) {
            Some(ClockSignal::Remaining(remaining)) => {
                self.remaining_ms = remaining;
                Vec::new()
            }
            Some(ClockSignal::Complete) => self.phase_complete(now_ms),
            None => Vec::new(),
        }
    }

    /// Force the canonical idle state from anywhere.
    pub fn reset(&mut self) -> Vec<Effect> {
        *self = Session::new();
        vec![Effect::CancelReminders, Effect::Pulse(Pulse::Medium)]
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_complete(&mut self, now_ms: u64) -> Vec<Effect> {
        let Some(profile) = self.profile.clone() else {
            return Vec::new();
        };
        // The instant the phase was supposed to end, not the instant this
        // evaluation happens to run.
        let scheduled_end = self.end_ms.unwrap_or(now_ms);

        match self.phase {
            Phase::Work => {
                if self.completed_cycles + 1 >= self.target_cycles {
                    // Session complete.
                    *self = Session::new();
                    return vec![
                        Effect::CancelReminders,
                        Effect::Pulse(Pulse::SessionComplete),
                        Effect::AddWorkTime {
                            duration_ms: profile.work_duration_ms,
                        },
                        Effect::IncrementSessions,
                    ];
                }
                // The break is anchored to the scheduled work end so a late
                // evaluation does not shrink it.
                let end = scheduled_end.saturating_add(profile.break_duration_ms);
                self.phase = Phase::Break;
                self.end_ms = Some(end);
                self.remaining_ms = end.saturating_sub(now_ms);
                self.completed_cycles += 1;
                vec![
                    Effect::AddWorkTime {
                        duration_ms: profile.work_duration_ms,
                    },
                    Effect::Pulse(Pulse::BreakStarted),
                    Effect::ArmReminder {
                        boundary: Boundary::BreakEnd,
                        at_ms: end,
                    },
                ]
            }
            Phase::Break => {
                // Work is anchored to now so an overlong break does not eat
                // into the next work phase.
                let end = now_ms.saturating_add(profile.work_duration_ms);
                self.phase = Phase::Work;
                self.end_ms = Some(end);
                self.remaining_ms = profile.work_duration_ms;
                vec![
                    Effect::Pulse(Pulse::WorkResumed),
                    Effect::ArmReminder {
                        boundary: Boundary::WorkEnd,
                        at_ms: end,
                    },
                ]
            }
            Phase::Idle => Vec::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
