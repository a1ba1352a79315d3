//! Pomodoro profiles.
//!
//! A profile is a named timing configuration: work duration, break duration
//! and the total session length. The number of work/break cycles a session
//! holds is derived from those three values, never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const MS_PER_MINUTE: u64 = 60 * 1000;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Ids of the profiles shipped with the app share this prefix. They are
/// never deletable.
const BUILTIN_PREFIX: &str = "default_";

/// A named timing configuration.
///
/// Serialized with camelCase keys (`workDurationMs`, `createdAt`, ...) so
/// blobs written by the mobile app round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub work_duration_ms: u64,
    pub break_duration_ms: u64,
    pub session_duration_ms: u64,
    /// Creation instant, epoch milliseconds. Zero for built-ins.
    pub created_at: u64,
    pub updated_at: u64,
}

impl Profile {
    /// Number of complete work+break cycles that fit in the session.
    ///
    /// This governs how many work phases a session contains before it
    /// auto-terminates.
    pub fn cycle_count(&self) -> u32 {
        let cycle_ms = self.work_duration_ms.saturating_add(self.break_duration_ms);
        if cycle_ms == 0 {
            return 0;
        }
        (self.session_duration_ms / cycle_ms) as u32
    }

    pub fn is_builtin(&self) -> bool {
        self.id.starts_with(BUILTIN_PREFIX)
    }

    /// One-line summary, e.g. `25 / 5 - 4h`.
    pub fn summary(&self) -> String {
        let work_min = self.work_duration_ms / MS_PER_MINUTE;
        let break_min = self.break_duration_ms / MS_PER_MINUTE;
        format!(
            "{} / {} - {}",
            work_min,
            break_min,
            format_hours(self.session_duration_ms)
        )
    }
}

/// The profiles shipped with the app.
pub fn builtin_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "default_classic".into(),
            name: "Classic".into(),
            work_duration_ms: 25 * MS_PER_MINUTE,
            break_duration_ms: 5 * MS_PER_MINUTE,
            session_duration_ms: 4 * MS_PER_HOUR,
            created_at: 0,
            updated_at: 0,
        },
        Profile {
            id: "default_deep_work".into(),
            name: "Deep Work".into(),
            work_duration_ms: 50 * MS_PER_MINUTE,
            break_duration_ms: 10 * MS_PER_MINUTE,
            session_duration_ms: 5 * MS_PER_HOUR,
            created_at: 0,
            updated_at: 0,
        },
    ]
}

/// User input for a new profile, in the units the form exposes.
///
/// Bounds match the form pickers: work 5-120 min in steps of 5, break
/// 1-30 min, session 1-12 h in half-hour steps.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub name: String,
    pub work_minutes: u64,
    pub break_minutes: u64,
    pub session_hours: f64,
}

impl ProfileDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        if !(5..=120).contains(&self.work_minutes) {
            return Err(invalid("work", "must be between 5 and 120 minutes"));
        }
        if !(1..=30).contains(&self.break_minutes) {
            return Err(invalid("break", "must be between 1 and 30 minutes"));
        }
        if !(1.0..=12.0).contains(&self.session_hours) {
            return Err(invalid("session", "must be between 1 and 12 hours"));
        }
        if (self.session_hours * 2.0).fract() != 0.0 {
            return Err(invalid("session", "must be a half-hour step"));
        }
        Ok(())
    }

    /// Validate and convert to a [`Profile`], minting a fresh id and
    /// stamping both timestamps with `now_ms`.
    pub fn into_profile(self, now_ms: u64) -> Result<Profile, ValidationError> {
        self.validate()?;
        Ok(Profile {
            id: format!("profile_{}", Uuid::new_v4()),
            name: self.name.trim().to_string(),
            work_duration_ms: self.work_minutes * MS_PER_MINUTE,
            break_duration_ms: self.break_minutes * MS_PER_MINUTE,
            session_duration_ms: (self.session_hours * MS_PER_HOUR as f64).round() as u64,
            created_at: now_ms,
            updated_at: now_ms,
        })
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

/// Human-readable duration, e.g. `25 min`, `1h 30min`, `2h`.
pub fn format_duration(ms: u64) -> String {
    let total_minutes = (ms + MS_PER_MINUTE / 2) / MS_PER_MINUTE;
    if total_minutes < 60 {
        return format!("{total_minutes} min");
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {minutes}min")
    }
}

fn format_hours(ms: u64) -> String {
    let hours = ms as f64 / MS_PER_HOUR as f64;
    if hours.fract() == 0.0 {
        format!("{}h", hours as u64)
    } else {
        format!("{hours:.1}h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classic_profile_has_eight_cycles() {
        // 25 + 5 minute cycles in a 4 hour session.
        let classic = &builtin_profiles()[0];
        assert_eq!(classic.cycle_count(), 8);
    }

    #[test]
    fn cycle_count_floors() {
        let p = Profile {
            id: "p".into(),
            name: "p".into(),
            work_duration_ms: 1000,
            break_duration_ms: 500,
            session_duration_ms: 3999,
            created_at: 0,
            updated_at: 0,
        };
        assert_eq!(p.cycle_count(), 2);
    }

    #[test]
    fn builtins_are_protected() {
        for p in builtin_profiles() {
            assert!(p.is_builtin());
        }
    }

    #[test]
    fn draft_round_trips_units() {
        let profile = ProfileDraft {
            name: "  Writing  ".into(),
            work_minutes: 25,
            break_minutes: 5,
            session_hours: 4.0,
        }
        .into_profile(1_700_000_000_000)
        .unwrap();

        assert_eq!(profile.name, "Writing");
        assert_eq!(profile.work_duration_ms, 25 * MS_PER_MINUTE);
        assert_eq!(profile.break_duration_ms, 5 * MS_PER_MINUTE);
        assert_eq!(profile.session_duration_ms, 4 * MS_PER_HOUR);
        assert_eq!(profile.created_at, 1_700_000_000_000);
        assert!(!profile.is_builtin());
    }

    #[test]
    fn draft_rejects_out_of_range_values() {
        let base = ProfileDraft {
            name: "x".into(),
            work_minutes: 25,
            break_minutes: 5,
            session_hours: 4.0,
        };

        let mut d = base.clone();
        d.work_minutes = 4;
        assert!(d.validate().is_err());

        let mut d = base.clone();
        d.break_minutes = 31;
        assert!(d.validate().is_err());

        let mut d = base.clone();
        d.session_hours = 0.75;
        assert!(d.validate().is_err());

        let mut d = base.clone();
        d.session_hours = 4.5;
        assert!(d.validate().is_ok());

        let mut d = base;
        d.name = "   ".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn serialized_with_original_field_names() {
        let classic = &builtin_profiles()[0];
        let json = serde_json::to_value(classic).unwrap();
        assert_eq!(json["workDurationMs"], 1_500_000);
        assert_eq!(json["createdAt"], 0);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(25 * MS_PER_MINUTE), "25 min");
        assert_eq!(format_duration(90 * MS_PER_MINUTE), "1h 30min");
        assert_eq!(format_duration(2 * MS_PER_HOUR), "2h");
    }

    #[test]
    fn summary_shows_minutes_and_hours() {
        let classic = &builtin_profiles()[0];
        assert_eq!(classic.summary(), "25 / 5 - 4h");
    }

    proptest! {
        #[test]
        fn cycle_count_is_integer_division(
            work in 1u64..=7_200_000,
            brk in 1u64..=1_800_000,
            session in 0u64..=43_200_000,
        ) {
            let p = Profile {
                id: "p".into(),
                name: "p".into(),
                work_duration_ms: work,
                break_duration_ms: brk,
                session_duration_ms: session,
                created_at: 0,
                updated_at: 0,
            };
            prop_assert_eq!(u64::from(p.cycle_count()), session / (work + brk));
        }
    }
}
