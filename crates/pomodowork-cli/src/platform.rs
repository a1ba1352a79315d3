//! Host-platform collaborators for the CLI.
//!
//! The mobile app wires the core's collaborator traits to OS services
//! (local notifications, haptics). The CLI stands them in with a kv-backed
//! reminder ledger, so pending reminders survive between invocations and
//! `timer next` can show what is armed, and console feedback.

use std::collections::BTreeMap;

use pomodowork_core::dispatch::BoxError;
use pomodowork_core::storage::Database;
use pomodowork_core::{FeedbackSink, NotificationMode, ReminderPayload, ReminderScheduler};
use serde::{Deserialize, Serialize};

const REMINDERS_KEY: &str = "reminders";

/// A reminder waiting to fire, as stored in the kv ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReminder {
    pub at_ms: u64,
    pub title: String,
    pub body: String,
    pub sound: bool,
}

/// Reminder scheduler persisted in the kv store, keyed by reminder id so a
/// new schedule call replaces the pending one.
pub struct KvReminders<'a> {
    db: &'a Database,
}

impl<'a> KvReminders<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All pending reminders, keyed by id.
    pub fn pending(db: &Database) -> BTreeMap<String, PendingReminder> {
        db.get_json(REMINDERS_KEY).ok().flatten().unwrap_or_default()
    }

    fn store(&self, pending: &BTreeMap<String, PendingReminder>) -> Result<(), BoxError> {
        self.db.set_json(REMINDERS_KEY, pending)?;
        Ok(())
    }
}

impl ReminderScheduler for KvReminders<'_> {
    fn schedule_at(
        &mut self,
        id: &str,
        at_ms: u64,
        payload: ReminderPayload,
    ) -> Result<Option<String>, BoxError> {
        let mut pending = Self::pending(self.db);
        pending.insert(
            id.to_string(),
            PendingReminder {
                at_ms,
                title: payload.title,
                body: payload.body,
                sound: payload.sound,
            },
        );
        self.store(&pending)?;
        Ok(Some(id.to_string()))
    }

    fn cancel(&mut self, id: &str) -> Result<(), BoxError> {
        let mut pending = Self::pending(self.db);
        if pending.remove(id).is_some() {
            self.store(&pending)?;
        }
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<(), BoxError> {
        self.store(&BTreeMap::new())
    }
}

/// Console feedback: logs each cue, rings the terminal bell in sound mode.
pub struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn trigger(&mut self, mode: NotificationMode) -> Result<(), BoxError> {
        match mode {
            NotificationMode::Sound => {
                print!("\x07");
                tracing::debug!("feedback: bell");
            }
            NotificationMode::Vibration | NotificationMode::RepeatingVibration => {
                tracing::debug!("feedback: vibration pulse");
            }
            NotificationMode::Silent => {}
        }
        Ok(())
    }

    fn light(&mut self) -> Result<(), BoxError> {
        tracing::debug!("feedback: light tap");
        Ok(())
    }

    fn medium(&mut self) -> Result<(), BoxError> {
        tracing::debug!("feedback: medium tap");
        Ok(())
    }
}
