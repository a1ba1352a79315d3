//! Accumulated usage statistics.
//!
//! Two monotonically non-decreasing counters. The state machine only ever
//! emits deltas; applying them to the persisted value is the storage
//! layer's job.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkStats {
    /// Total finished work time, in milliseconds.
    #[serde(default)]
    pub total_work_ms: u64,
    /// Number of sessions that ran to completion.
    #[serde(default)]
    pub completed_sessions: u64,
}

impl WorkStats {
    pub fn add_work_time(&mut self, duration_ms: u64) {
        self.total_work_ms = self.total_work_ms.saturating_add(duration_ms);
    }

    pub fn increment_sessions(&mut self) {
        self.completed_sessions = self.completed_sessions.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut stats = WorkStats::default();
        stats.add_work_time(1_500_000);
        stats.add_work_time(1_500_000);
        stats.increment_sessions();
        assert_eq!(stats.total_work_ms, 3_000_000);
        assert_eq!(stats.completed_sessions, 1);
    }

    #[test]
    fn serialized_with_camel_case_keys() {
        let stats = WorkStats {
            total_work_ms: 42,
            completed_sessions: 1,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, "{\"totalWorkMs\":42,\"completedSessions\":1}");
    }
}
