//! Reminder derivation and next-fire arithmetic.
//!
//! Reminders are derived entirely from a validated schedule plus the user's
//! notification settings, and are never persisted: on any change both are
//! rederived from scratch. Times are naive local clock times, matching the
//! user's wall clock.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::{Activity, WeeklySchedule};
use crate::settings::NotificationSettings;

/// Minutes before an activity's start that its reminder fires.
pub const ACTIVITY_LEAD_MINUTES: i64 = 5;

/// Reminders recur weekly once armed.
pub const RECURRENCE_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    MorningMotivation,
    EveningReflection,
    ActivityReminder,
}

/// A derived (time, message) pair targeting the notification transports.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReminder {
    pub id: Uuid,
    pub kind: ReminderKind,
    pub day: Weekday,
    pub time: NaiveTime,
    pub message: String,
    /// Set for activity reminders, absent for the daily fixed messages
    pub activity: Option<Activity>,
    /// Next absolute fire time, always in (now, now + 7 days]
    pub next_fire: NaiveDateTime,
}

impl ScheduledReminder {
    /// Advance to the following week after firing.
    pub fn advance(&mut self) {
        self.next_fire += Duration::days(RECURRENCE_DAYS);
    }
}

/// Compute the next occurrence of (weekday, time-of-day) strictly after `now`.
///
/// Day offset uses Sunday=0..Saturday=6 indexing:
/// `(target - current + 7) mod 7` days from today, at the target time; if
/// that instant is not strictly in the future, one more week.
pub fn next_occurrence(now: NaiveDateTime, day: Weekday, time: NaiveTime) -> NaiveDateTime {
    let target = day.num_days_from_sunday() as i64;
    let current = now.weekday().num_days_from_sunday() as i64;
    let offset = (target - current + 7) % 7;

    let candidate = (now.date() + Duration::days(offset)).and_time(time);
    if candidate <= now {
        candidate + Duration::days(RECURRENCE_DAYS)
    } else {
        candidate
    }
}

/// Derive the full reminder set for a schedule.
///
/// Per non-empty day: a morning-motivation and an evening-reflection entry
/// at the configured times, each gated by its settings flag. Per activity
/// with a parseable start time and a label: one entry five minutes before
/// the start, gated by the activity-reminders flag.
pub fn derive_reminders(
    schedule: &WeeklySchedule,
    settings: &NotificationSettings,
    now: NaiveDateTime,
) -> Vec<ScheduledReminder> {
    let mut reminders = Vec::new();

    for (day, day_schedule) in schedule.days() {
        if day_schedule.activities.is_empty() {
            continue;
        }

        if settings.daily_motivation {
            reminders.push(make_reminder(
                ReminderKind::MorningMotivation,
                day,
                settings.times.morning_motivation,
                morning_message(day_schedule.activities.len()),
                None,
                now,
            ));
        }

        if settings.evening_reflection {
            reminders.push(make_reminder(
                ReminderKind::EveningReflection,
                day,
                settings.times.evening_reflection,
                evening_message(),
                None,
                now,
            ));
        }

        if settings.activity_reminders {
            for activity in &day_schedule.activities {
                if activity.activity.is_empty() {
                    continue;
                }
                let Some(start) = activity.start_time() else {
                    continue;
                };

                let (lead_day, lead_time) = lead_slot(day, start);
                reminders.push(make_reminder(
                    ReminderKind::ActivityReminder,
                    lead_day,
                    lead_time,
                    activity_message(activity),
                    Some(activity.clone()),
                    now,
                ));
            }
        }
    }

    reminders
}

fn make_reminder(
    kind: ReminderKind,
    day: Weekday,
    time: NaiveTime,
    message: String,
    activity: Option<Activity>,
    now: NaiveDateTime,
) -> ScheduledReminder {
    ScheduledReminder {
        id: Uuid::new_v4(),
        kind,
        day,
        time,
        message,
        activity,
        next_fire: next_occurrence(now, day, time),
    }
}

/// Five minutes before the start; crossing midnight moves to the previous
/// weekday.
fn lead_slot(day: Weekday, start: NaiveTime) -> (Weekday, NaiveTime) {
    let (time, wrap) = start.overflowing_sub_signed(Duration::minutes(ACTIVITY_LEAD_MINUTES));
    if wrap != 0 { (day.pred(), time) } else { (day, time) }
}

fn morning_message(activity_count: usize) -> String {
    format!(
        "Good morning! Ready to crush your goals today? You have {} activities planned. Let's make today count! 💪",
        activity_count
    )
}

fn evening_message() -> String {
    "Great work today! Take a moment to reflect on your progress. What went well? What can you improve tomorrow? 📝"
        .to_string()
}

fn activity_message(activity: &Activity) -> String {
    format!(
        "⏰ Time for: {}\n\n{}\n\n💡 Tip: {}",
        activity.activity,
        activity.description.as_deref().unwrap_or(""),
        activity
            .tips
            .as_deref()
            .unwrap_or("Stay focused and give it your best!")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{DaySchedule, Week};
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(hour, min, 0)
            .expect("valid time")
    }

    fn time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).expect("valid time")
    }

    #[test]
    fn test_next_occurrence_same_day_time_passed_goes_to_next_week() {
        // Wednesday 2025-06-18, 10:00; target Wednesday 09:00 has passed
        let now = at(2025, 6, 18, 10, 0);
        let fire = next_occurrence(now, Weekday::Wed, time(9, 0));

        assert_eq!(fire, at(2025, 6, 25, 9, 0), "Should be the following Wednesday");
    }

    #[test]
    fn test_next_occurrence_later_in_week() {
        // Monday 2025-06-16, 08:00; target Wednesday 09:00 is 2 days out
        let now = at(2025, 6, 16, 8, 0);
        let fire = next_occurrence(now, Weekday::Wed, time(9, 0));

        assert_eq!(fire, at(2025, 6, 18, 9, 0));
    }

    #[test]
    fn test_next_occurrence_exact_now_is_not_in_future() {
        let now = at(2025, 6, 18, 9, 0);
        let fire = next_occurrence(now, Weekday::Wed, time(9, 0));

        assert_eq!(fire, at(2025, 6, 25, 9, 0), "Equal instant must advance a week");
    }

    #[test]
    fn test_next_occurrence_always_within_one_week() {
        let now = at(2025, 6, 18, 10, 0);
        for day in crate::schedule::WEEK_DAYS {
            for t in [time(0, 0), time(9, 59), time(23, 59)] {
                let fire = next_occurrence(now, day, t);
                assert!(fire > now);
                assert!(fire <= now + Duration::days(7));
            }
        }
    }

    fn schedule_with_monday(activities: Vec<Activity>) -> WeeklySchedule {
        let mut week = Week::default();
        week.monday = DaySchedule { activities };
        WeeklySchedule {
            schedule: week,
            summary: String::new(),
            motivation_tips: Vec::new(),
        }
    }

    fn activity(time: &str, label: &str) -> Activity {
        Activity {
            time: time.to_string(),
            activity: label.to_string(),
            description: Some("desc".to_string()),
            tips: None,
        }
    }

    #[test]
    fn test_derive_counts_per_day() {
        let schedule = schedule_with_monday(vec![
            activity("08:00-09:00", "Warm-up"),
            activity("09:00-10:00", "Deep work"),
        ]);
        let settings = NotificationSettings::default();
        let now = at(2025, 6, 18, 10, 0);

        let reminders = derive_reminders(&schedule, &settings, now);

        // morning + evening + one per activity, Monday only
        assert_eq!(reminders.len(), 4);
        assert!(reminders.iter().all(|r| r.next_fire > now));
        assert!(
            reminders
                .iter()
                .filter(|r| r.kind == ReminderKind::ActivityReminder)
                .all(|r| r.day == Weekday::Mon)
        );
    }

    #[test]
    fn test_activity_reminder_fires_five_minutes_early() {
        let schedule = schedule_with_monday(vec![activity("08:00-09:00", "Warm-up")]);
        let settings = NotificationSettings::default();
        let reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));

        let reminder = reminders
            .iter()
            .find(|r| r.kind == ReminderKind::ActivityReminder)
            .expect("Should derive an activity reminder");
        assert_eq!(reminder.time, time(7, 55));
        assert!(reminder.message.contains("Warm-up"));
        assert!(reminder.activity.is_some());
    }

    #[test]
    fn test_lead_before_midnight_moves_to_previous_day() {
        let schedule = schedule_with_monday(vec![activity("00:02-01:00", "Night shift")]);
        let settings = NotificationSettings::default();
        let reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));

        let reminder = reminders
            .iter()
            .find(|r| r.kind == ReminderKind::ActivityReminder)
            .expect("Should derive an activity reminder");
        assert_eq!(reminder.day, Weekday::Sun);
        assert_eq!(reminder.time, time(23, 57));
    }

    #[test]
    fn test_flags_gate_each_category() {
        let schedule = schedule_with_monday(vec![activity("08:00-09:00", "Warm-up")]);
        let settings = NotificationSettings {
            daily_motivation: false,
            evening_reflection: false,
            activity_reminders: true,
            ..NotificationSettings::default()
        };

        let reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].kind, ReminderKind::ActivityReminder);
    }

    #[test]
    fn test_empty_day_derives_nothing() {
        let schedule = schedule_with_monday(Vec::new());
        let settings = NotificationSettings::default();

        let reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));
        assert!(reminders.is_empty());
    }

    #[test]
    fn test_unlabeled_or_untimed_activities_are_skipped() {
        let schedule = schedule_with_monday(vec![
            activity("later", "Stretch"),
            activity("08:00-09:00", ""),
        ]);
        let settings = NotificationSettings {
            daily_motivation: false,
            evening_reflection: false,
            ..NotificationSettings::default()
        };

        let reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));
        assert!(reminders.is_empty());
    }

    #[test]
    fn test_morning_message_references_activity_count() {
        let schedule = schedule_with_monday(vec![
            activity("08:00-09:00", "A"),
            activity("09:00-10:00", "B"),
            activity("10:00-11:00", "C"),
        ]);
        let settings = NotificationSettings::default();
        let reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));

        let morning = reminders
            .iter()
            .find(|r| r.kind == ReminderKind::MorningMotivation)
            .expect("Should derive a morning reminder");
        assert!(morning.message.contains("3 activities"));
        assert_eq!(morning.time, time(7, 30));
    }

    #[test]
    fn test_advance_moves_exactly_one_week() {
        let schedule = schedule_with_monday(vec![activity("08:00-09:00", "A")]);
        let settings = NotificationSettings::default();
        let mut reminders = derive_reminders(&schedule, &settings, at(2025, 6, 18, 10, 0));

        let reminder = &mut reminders[0];
        let first = reminder.next_fire;
        reminder.advance();
        assert_eq!(reminder.next_fire, first + Duration::days(7));
    }
}
