//! User profile captured at onboarding.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{WeekplanError, WeekplanResult};
use crate::schedule::day_name;

/// Answers collected by the onboarding flow.
///
/// Immutable once onboarding completes; regenerating a schedule reuses the
/// same profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// What the user wants to achieve, free text
    pub goal: String,
    /// Weekday names the user works on ("Monday", "tuesday", ...).
    /// Membership checks are case-insensitive.
    pub work_days: Vec<String>,
    /// Daily window start, "HH:MM"
    pub start_time: String,
    /// Daily window end, "HH:MM"
    pub end_time: String,
    /// Free-text preferences passed through to the generator
    #[serde(default)]
    pub preferences: String,
}

impl UserProfile {
    pub fn is_work_day(&self, day: Weekday) -> bool {
        let name = day_name(day);
        self.work_days.iter().any(|d| d.eq_ignore_ascii_case(name))
    }

    /// Hour component of the daily start time.
    pub fn start_hour(&self) -> WeekplanResult<u32> {
        parse_hour(&self.start_time)
    }

    /// Hour component of the daily end time.
    pub fn end_hour(&self) -> WeekplanResult<u32> {
        parse_hour(&self.end_time)
    }

    /// The full day window as a single range string ("08:00-18:00").
    pub fn day_window(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

fn parse_hour(time: &str) -> WeekplanResult<u32> {
    let hours = match time.split_once(':') {
        Some((hours, _)) => hours,
        None => time,
    };

    let hour: u32 = hours
        .trim()
        .parse()
        .map_err(|_| WeekplanError::InvalidTime(time.to_string()))?;

    if hour > 23 {
        return Err(WeekplanError::InvalidTime(time.to_string()));
    }

    Ok(hour)
}
