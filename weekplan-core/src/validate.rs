//! Validation and silent repair of upstream schedule documents.
//!
//! The generator's JSON output is never trusted verbatim: every weekday
//! must be present with a non-empty activity list, activity times are
//! normalized, and anything missing is backfilled with a default rest day.
//! Structural gaps are not errors. Each repair is recorded in a
//! [`RepairReport`] so callers can log exactly what was backfilled versus
//! what was trusted.

use chrono::Weekday;
use serde::Deserialize;

use crate::profile::UserProfile;
use crate::schedule::{Activity, DaySchedule, WEEK_DAYS, Week, WeeklySchedule};
use crate::timefmt;

pub const DEFAULT_SUMMARY: &str = "Your personalized weekly schedule";

pub fn default_motivation_tips() -> Vec<String> {
    vec![
        "Stay consistent".to_string(),
        "Track progress".to_string(),
        "Celebrate wins".to_string(),
    ]
}

/// Upstream schedule document before validation. Everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleResponse {
    #[serde(default)]
    pub schedule: Option<RawWeek>,
    pub summary: Option<String>,
    pub motivation_tips: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeek {
    pub monday: Option<RawDay>,
    pub tuesday: Option<RawDay>,
    pub wednesday: Option<RawDay>,
    pub thursday: Option<RawDay>,
    pub friday: Option<RawDay>,
    pub saturday: Option<RawDay>,
    pub sunday: Option<RawDay>,
}

impl RawWeek {
    fn take(&mut self, day: Weekday) -> Option<RawDay> {
        match day {
            Weekday::Mon => self.monday.take(),
            Weekday::Tue => self.tuesday.take(),
            Weekday::Wed => self.wednesday.take(),
            Weekday::Thu => self.thursday.take(),
            Weekday::Fri => self.friday.take(),
            Weekday::Sat => self.saturday.take(),
            Weekday::Sun => self.sunday.take(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDay {
    #[serde(default)]
    pub activities: Vec<RawActivity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawActivity {
    pub time: Option<String>,
    pub activity: Option<String>,
    pub description: Option<String>,
    pub tips: Option<String>,
}

/// One structural repair applied during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// The weekday key was absent from the document
    MissingDay(Weekday),
    /// The weekday was present but its activity list was empty
    EmptyDay(Weekday),
    DefaultedSummary,
    DefaultedTips,
}

/// What validation backfilled versus trusted verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    pub repairs: Vec<Repair>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }

    /// Days that were replaced with the default rest day.
    pub fn backfilled_days(&self) -> Vec<Weekday> {
        self.repairs
            .iter()
            .filter_map(|r| match r {
                Repair::MissingDay(d) | Repair::EmptyDay(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl std::fmt::Display for RepairReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "no repairs");
        }
        let parts: Vec<String> = self
            .repairs
            .iter()
            .map(|r| match r {
                Repair::MissingDay(d) => format!("backfilled missing {}", crate::schedule::day_name(*d)),
                Repair::EmptyDay(d) => format!("backfilled empty {}", crate::schedule::day_name(*d)),
                Repair::DefaultedSummary => "defaulted summary".to_string(),
                Repair::DefaultedTips => "defaulted motivation tips".to_string(),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Validate an upstream document into a complete [`WeeklySchedule`].
///
/// Never fails: days with a non-empty activity list are kept (with times
/// normalized), everything else is backfilled with a single rest-day
/// activity spanning the profile's full day window.
pub fn validate_schedule(
    raw: RawScheduleResponse,
    profile: &UserProfile,
) -> (WeeklySchedule, RepairReport) {
    let mut report = RepairReport::default();
    let mut raw_week = raw.schedule.unwrap_or_default();
    let mut week = Week::default();

    for day in WEEK_DAYS {
        match raw_week.take(day) {
            Some(raw_day) if !raw_day.activities.is_empty() => {
                let activities = raw_day
                    .activities
                    .into_iter()
                    .map(normalize_activity)
                    .collect();
                *week.day_mut(day) = DaySchedule { activities };
            }
            Some(_) => {
                report.repairs.push(Repair::EmptyDay(day));
                *week.day_mut(day) = default_rest_day(profile);
            }
            None => {
                report.repairs.push(Repair::MissingDay(day));
                *week.day_mut(day) = default_rest_day(profile);
            }
        }
    }

    let summary = match raw.summary {
        Some(summary) => summary,
        None => {
            report.repairs.push(Repair::DefaultedSummary);
            DEFAULT_SUMMARY.to_string()
        }
    };

    let motivation_tips = match raw.motivation_tips {
        Some(tips) => tips,
        None => {
            report.repairs.push(Repair::DefaultedTips);
            default_motivation_tips()
        }
    };

    let schedule = WeeklySchedule {
        schedule: week,
        summary,
        motivation_tips,
    };

    (schedule, report)
}

/// Normalize an activity's time range; everything else passes through.
/// An unparseable time keeps the original string (identity fallback).
fn normalize_activity(raw: RawActivity) -> Activity {
    let time = raw.time.unwrap_or_default();
    let time = match timefmt::normalize_time_range(&time) {
        Some(normalized) => normalized,
        None => time,
    };

    Activity {
        time,
        activity: raw.activity.unwrap_or_default(),
        description: raw.description,
        tips: raw.tips,
    }
}

/// The single placeholder activity for a backfilled day.
fn default_rest_day(profile: &UserProfile) -> DaySchedule {
    DaySchedule {
        activities: vec![Activity {
            time: profile.day_window(),
            activity: "Rest Day".to_string(),
            description: Some("Take time to recharge and prepare for the week ahead".to_string()),
            tips: Some("Use this time for reflection and planning".to_string()),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            goal: "Run a marathon".to_string(),
            work_days: vec!["Monday".to_string()],
            start_time: "07:00".to_string(),
            end_time: "19:00".to_string(),
            preferences: String::new(),
        }
    }

    fn raw_from_json(json: &str) -> RawScheduleResponse {
        serde_json::from_str(json).expect("Raw document should deserialize")
    }

    #[test]
    fn test_all_seven_days_present_after_validation() {
        let raw = raw_from_json(
            r#"{
                "schedule": {
                    "monday": { "activities": [
                        { "time": "08:00-09:00", "activity": "Long run" }
                    ]}
                },
                "summary": "One day of training"
            }"#,
        );

        let (schedule, report) = validate_schedule(raw, &profile());

        for day in WEEK_DAYS {
            assert!(
                !schedule.day(day).activities.is_empty(),
                "{:?} should have at least the backfilled rest activity",
                day
            );
        }
        assert_eq!(report.backfilled_days().len(), 6, "Six days were missing");
    }

    #[test]
    fn test_backfilled_day_spans_profile_window() {
        let raw = RawScheduleResponse::default();
        let (schedule, report) = validate_schedule(raw, &profile());

        let monday = &schedule.day(chrono::Weekday::Mon).activities;
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].time, "07:00-19:00");
        assert_eq!(monday[0].activity, "Rest Day");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_day_is_backfilled_and_reported() {
        let raw = raw_from_json(r#"{ "schedule": { "tuesday": { "activities": [] } } }"#);
        let (_, report) = validate_schedule(raw, &profile());

        assert!(report.repairs.contains(&Repair::EmptyDay(chrono::Weekday::Tue)));
        assert!(report.repairs.contains(&Repair::MissingDay(chrono::Weekday::Mon)));
    }

    #[test]
    fn test_activity_times_are_normalized() {
        let raw = raw_from_json(
            r#"{
                "schedule": {
                    "friday": { "activities": [
                        { "time": "8:00 AM-9:00 AM", "activity": "Intervals" },
                        { "time": "sometime", "activity": "Stretch" }
                    ]}
                }
            }"#,
        );

        let (schedule, _) = validate_schedule(raw, &profile());
        let friday = &schedule.day(chrono::Weekday::Fri).activities;

        assert_eq!(friday[0].time, "08:00-09:00");
        assert_eq!(friday[1].time, "sometime", "Unparseable time kept verbatim");
    }

    #[test]
    fn test_summary_and_tips_defaulted_when_absent() {
        let raw = RawScheduleResponse::default();
        let (schedule, report) = validate_schedule(raw, &profile());

        assert_eq!(schedule.summary, DEFAULT_SUMMARY);
        assert_eq!(schedule.motivation_tips, default_motivation_tips());
        assert!(report.repairs.contains(&Repair::DefaultedSummary));
        assert!(report.repairs.contains(&Repair::DefaultedTips));
    }

    #[test]
    fn test_trusted_days_pass_through_unchanged() {
        let raw = raw_from_json(
            r#"{
                "schedule": {
                    "monday": { "activities": [
                        { "time": "07:00-08:00", "activity": "Easy run", "tips": "Keep it slow" }
                    ]},
                    "tuesday": { "activities": [
                        { "time": "07:00-08:00", "activity": "Gym" }
                    ]},
                    "wednesday": { "activities": [{ "time": "07:00-08:00", "activity": "Rest walk" }]},
                    "thursday": { "activities": [{ "time": "07:00-08:00", "activity": "Tempo" }]},
                    "friday": { "activities": [{ "time": "07:00-08:00", "activity": "Easy run" }]},
                    "saturday": { "activities": [{ "time": "07:00-08:00", "activity": "Long run" }]},
                    "sunday": { "activities": [{ "time": "07:00-08:00", "activity": "Rest" }]}
                },
                "summary": "Marathon block",
                "motivation_tips": ["Trust the plan"]
            }"#,
        );

        let (schedule, report) = validate_schedule(raw, &profile());

        assert!(report.is_clean(), "Nothing should be repaired: {}", report);
        assert_eq!(schedule.summary, "Marathon block");
        assert_eq!(
            schedule.day(chrono::Weekday::Mon).activities[0].tips.as_deref(),
            Some("Keep it slow")
        );
    }
}
