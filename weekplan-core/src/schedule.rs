//! Weekly schedule types.
//!
//! These types represent the validated seven-day plan that the rest of the
//! system works with. The weekday fields are part of the struct itself, so
//! a `WeeklySchedule` can never be missing a day: validation backfills
//! anything the upstream source omitted before one is constructed.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::timefmt;

/// The seven weekdays in calendar order (Monday first), matching the field
/// order of the schedule document.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase weekday name as used for schedule keys and work-day matching.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// One scheduled block within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Time range ("08:00-09:00"). When upstream sends something the
    /// normalizer can't handle, the original string is kept verbatim.
    pub time: String,
    /// Activity label ("Morning Routine & Goal Review")
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl Activity {
    /// Start of the time range as a clock time, if the range parses.
    pub fn start_time(&self) -> Option<NaiveTime> {
        let start = timefmt::normalize_time(&self.time)?;
        NaiveTime::parse_from_str(&start, "%H:%M").ok()
    }
}

/// Ordered activities for a single weekday. Insertion order is
/// chronological order. Empty means a rest day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// The seven day schedules of a week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl Week {
    pub fn day(&self, day: Weekday) -> &DaySchedule {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Iterate the days in Monday..Sunday order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        WEEK_DAYS.iter().map(move |&d| (d, self.day(d)))
    }
}

/// A validated seven-day activity plan, the central artifact of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub schedule: Week,
    pub summary: String,
    pub motivation_tips: Vec<String>,
}

impl WeeklySchedule {
    pub fn day(&self, day: Weekday) -> &DaySchedule {
        self.schedule.day(day)
    }

    /// Iterate the days in Monday..Sunday order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.schedule.days()
    }

    /// Total number of scheduled activities across the week.
    pub fn activity_count(&self) -> usize {
        self.days().map(|(_, d)| d.activities.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_start_time_from_range() {
        let activity = Activity {
            time: "08:00-09:00".to_string(),
            activity: "Focus".to_string(),
            description: None,
            tips: None,
        };

        assert_eq!(
            activity.start_time(),
            NaiveTime::from_hms_opt(8, 0, 0),
            "Range start should parse as a clock time"
        );
    }

    #[test]
    fn test_activity_start_time_unparseable() {
        let activity = Activity {
            time: "whenever".to_string(),
            activity: "Focus".to_string(),
            description: None,
            tips: None,
        };

        assert_eq!(activity.start_time(), None);
    }

    #[test]
    fn test_week_days_iterates_monday_first() {
        let week = Week::default();
        let days: Vec<Weekday> = week.days().map(|(d, _)| d).collect();
        assert_eq!(days, WEEK_DAYS.to_vec());
    }

    #[test]
    fn test_schedule_json_shape_uses_day_keys() {
        let schedule = WeeklySchedule {
            schedule: Week::default(),
            summary: "A quiet week".to_string(),
            motivation_tips: vec!["Keep going".to_string()],
        };

        let json = serde_json::to_value(&schedule).expect("Should serialize");
        assert!(json["schedule"]["monday"]["activities"].is_array());
        assert!(json["schedule"]["sunday"]["activities"].is_array());
    }
}
