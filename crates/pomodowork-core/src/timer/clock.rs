//! Phase clock.
//!
//! Converts a stored phase-end timestamp plus wall-clock time into a
//! remaining duration or a completion signal. Pure: callers re-evaluate on
//! every periodic tick and on every foreground resume, and act only when
//! `Complete` shows up.

/// Outcome of evaluating the clock against a phase deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Time left until the phase ends, in milliseconds. Only meaningful to
    /// whole-second granularity for display.
    Remaining(u64),
    /// The deadline has passed. Fires no matter how late the evaluation
    /// happens, e.g. hours after a suspension.
    Complete,
}

/// Evaluate the clock. `None` when there is no deadline (idle or paused).
pub fn evaluate(now_ms: u64, end_ms: Option<u64>) -> Option<ClockSignal> {
    let end = end_ms?;
    if end > now_ms {
        Some(ClockSignal::Remaining(end - now_ms))
    } else {
        Some(ClockSignal::Complete)
    }
}
