//! User notification preferences.

use serde::{Deserialize, Serialize};

/// How a reminder or pulse presents itself.
///
/// Serialized with the wire names the mobile app stores
/// (`"repeatingVibration"`, `"none"`), so existing blobs round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationMode {
    #[serde(rename = "sound")]
    Sound,
    #[default]
    #[serde(rename = "vibration")]
    Vibration,
    #[serde(rename = "repeatingVibration")]
    RepeatingVibration,
    #[serde(rename = "none")]
    Silent,
}

impl NotificationMode {
    pub fn is_silent(self) -> bool {
        matches!(self, NotificationMode::Silent)
    }
}

impl std::str::FromStr for NotificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sound" => Ok(Self::Sound),
            "vibration" => Ok(Self::Vibration),
            "repeating-vibration" | "repeatingVibration" => Ok(Self::RepeatingVibration),
            "silent" | "none" => Ok(Self::Silent),
            other => Err(format!("unknown notification mode: {other}")),
        }
    }
}

/// Which phase boundaries notify, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    /// Notify when a break starts (i.e. at work-phase end).
    #[serde(default = "default_true")]
    pub notify_break_start: bool,
    /// Notify when work resumes (i.e. at break end).
    #[serde(default = "default_true")]
    pub notify_work_resume: bool,
    #[serde(default)]
    pub mode: NotificationMode,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            notify_break_start: true,
            notify_work_resume: true,
            mode: NotificationMode::Vibration,
        }
    }
}

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub notifications: NotificationPrefs,
}
