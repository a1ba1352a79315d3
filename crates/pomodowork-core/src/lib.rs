//! # PomodoWork Core Library
//!
//! Core business logic for the PomodoWork pomodoro timer. CLI-first: every
//! operation is available through the standalone CLI binary; a GUI shell
//! would be a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Phase clock**: a pure function from (now, phase deadline) to a
//!   remaining duration or a completion signal
//! - **Session state machine**: wall-clock-based; stores the absolute phase
//!   end instead of counting elapsed time, so it survives arbitrary
//!   suspensions. The caller invokes `tick()` periodically and on every
//!   foreground resume; transitions return effect lists instead of touching
//!   collaborators
//! - **Effect dispatcher**: turns each effect list into best-effort calls
//!   against the host collaborators (reminders, feedback, statistics),
//!   gated by the user's notification preferences
//! - **Storage**: SQLite-backed key-value store holding JSON blobs
//!
//! ## Key components
//!
//! - [`Session`]: the session state machine
//! - [`Dispatcher`]: effect dispatch against the collaborator traits
//! - [`Database`]: key-value persistence
//! - [`Profile`]: timing configuration with derived cycle count

pub mod dispatch;
pub mod effect;
pub mod error;
pub mod profile;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod timer;

pub use dispatch::{Dispatcher, FeedbackSink, ReminderPayload, ReminderScheduler, StatsSink};
pub use effect::{Boundary, Effect, Pulse};
pub use error::{CoreError, Result, StorageError, ValidationError};
pub use profile::{builtin_profiles, Profile, ProfileDraft};
pub use settings::{NotificationMode, NotificationPrefs, Settings};
pub use stats::WorkStats;
pub use storage::{Database, ProfileBook, StatsLedger};
pub use timer::{ClockSignal, Phase, Session};
