mod clock;
mod session;

pub use clock::{evaluate, ClockSignal};
pub use session::{Phase, Session};

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Format a remaining duration as `MM:SS`, rounding up to whole seconds.
pub fn format_countdown(remaining_ms: u64) -> String {
    let total_secs = remaining_ms.div_ceil(1000);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_rounds_up_to_whole_seconds() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(1), "00:01");
        assert_eq!(format_countdown(59_001), "01:00");
        assert_eq!(format_countdown(25 * 60 * 1000), "25:00");
    }
}
