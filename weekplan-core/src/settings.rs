//! Per-user notification preferences and their on-disk store.

use std::path::PathBuf;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{WeekplanError, WeekplanResult};

fn default_morning_motivation() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 30, 0).unwrap()
}

fn default_evening_reflection() -> NaiveTime {
    NaiveTime::from_hms_opt(21, 0, 0).unwrap()
}

/// Times-of-day for the recurring daily categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTimes {
    #[serde(default = "default_morning_motivation")]
    pub morning_motivation: NaiveTime,
    #[serde(default = "default_evening_reflection")]
    pub evening_reflection: NaiveTime,
}

impl Default for ReminderTimes {
    fn default() -> Self {
        ReminderTimes {
            morning_motivation: default_morning_motivation(),
            evening_reflection: default_evening_reflection(),
        }
    }
}

/// Notification preferences, persisted at
/// `~/.config/weekplan/notifications.toml`.
///
/// Loaded at startup, saved on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub push_enabled: bool,
    pub sms_enabled: bool,
    /// Local desktop notifications
    pub local_enabled: bool,
    pub phone_number: Option<String>,
    pub activity_reminders: bool,
    pub daily_motivation: bool,
    pub evening_reflection: bool,
    pub times: ReminderTimes,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            push_enabled: false,
            sms_enabled: false,
            local_enabled: false,
            phone_number: None,
            activity_reminders: true,
            daily_motivation: true,
            evening_reflection: true,
            times: ReminderTimes::default(),
        }
    }
}

impl NotificationSettings {
    pub fn settings_path() -> WeekplanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WeekplanError::Config("Could not determine config directory".into()))?
            .join("weekplan");

        Ok(config_dir.join("notifications.toml"))
    }

    /// Load saved settings, or defaults when none have been saved yet.
    pub fn load() -> WeekplanResult<Self> {
        let path = Self::settings_path()?;
        if !path.exists() {
            return Ok(NotificationSettings::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| WeekplanError::Serialization(e.to_string()))
    }

    /// Save to `~/.config/weekplan/notifications.toml`.
    pub fn save(&self) -> WeekplanResult<()> {
        let path = Self::settings_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeekplanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| WeekplanError::Serialization(e.to_string()))?;

        std::fs::write(&path, content)
            .map_err(|e| WeekplanError::Config(format!("Could not write settings file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_categories_but_not_transports() {
        let settings = NotificationSettings::default();

        assert!(!settings.push_enabled);
        assert!(!settings.sms_enabled);
        assert!(!settings.local_enabled);
        assert!(settings.activity_reminders);
        assert!(settings.daily_motivation);
        assert!(settings.evening_reflection);
        assert_eq!(
            settings.times.morning_motivation,
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(
            settings.times.evening_reflection,
            NaiveTime::from_hms_opt(21, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let settings: NotificationSettings =
            toml::from_str("sms_enabled = true\nphone_number = \"+15551234567\"\n")
                .expect("Partial settings should deserialize");

        assert!(settings.sms_enabled);
        assert_eq!(settings.phone_number.as_deref(), Some("+15551234567"));
        assert!(settings.daily_motivation, "Unset flags keep their defaults");
    }
}
