//! Statistics persistence.

use crate::dispatch::{BoxError, StatsSink};
use crate::stats::WorkStats;

use super::database::Database;

/// Kv-backed statistics sink.
///
/// Each call re-reads the stored counters, applies the delta and writes
/// back, so the stored value remains the source of truth.
pub struct StatsLedger<'a> {
    db: &'a Database,
}

impl<'a> StatsLedger<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn apply(&self, f: impl FnOnce(&mut WorkStats)) -> Result<(), BoxError> {
        let mut stats = self.db.stats()?;
        f(&mut stats);
        self.db.set_stats(&stats)?;
        Ok(())
    }
}

impl StatsSink for StatsLedger<'_> {
    fn add_work_time(&mut self, duration_ms: u64) -> Result<(), BoxError> {
        self.apply(|stats| stats.add_work_time(duration_ms))
    }

    fn increment_session_count(&mut self) -> Result<(), BoxError> {
        self.apply(WorkStats::increment_sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_accumulate_in_storage() {
        let db = Database::open_memory().unwrap();
        let mut ledger = StatsLedger::new(&db);

        ledger.add_work_time(1_500_000).unwrap();
        ledger.add_work_time(1_500_000).unwrap();
        ledger.increment_session_count().unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.total_work_ms, 3_000_000);
        assert_eq!(stats.completed_sessions, 1);
    }
}
