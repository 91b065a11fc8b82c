//! Per-user reminder schedule table.
//!
//! Rather than arming one live timer per reminder, the scheduler keeps an
//! explicit table of reminder rows per user and a single periodic tick
//! collects the due rows, dispatches them, and advances each by one week.
//! Cancellation is a table delete, so a replaced schedule can never leave a
//! stale timer behind to fire a duplicate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use weekplan_core::ScheduledReminder;

use crate::dispatch::{Dispatcher, UserContext};

/// Default tick interval for the run loop.
pub const DEFAULT_TICK: Duration = Duration::from_secs(30);

struct UserEntry {
    context: UserContext,
    reminders: Vec<ScheduledReminder>,
}

/// A due row popped from the table, ready to dispatch.
pub struct DueReminder {
    pub context: UserContext,
    pub reminder: ScheduledReminder,
}

/// Shared reminder table. Cheap to clone; all clones see the same table.
#[derive(Clone, Default)]
pub struct ReminderScheduler {
    entries: Arc<Mutex<HashMap<String, UserEntry>>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        ReminderScheduler::default()
    }

    /// Replace a user's reminders wholesale. Any previously armed rows for
    /// the user are dropped first; partial updates are not supported.
    pub fn schedule_user(&self, context: UserContext, reminders: Vec<ScheduledReminder>) {
        let user_id = context.user_id.clone();
        let count = reminders.len();

        let mut entries = self.entries.lock().unwrap();
        entries.insert(user_id.clone(), UserEntry { context, reminders });

        info!(user = %user_id, "armed {count} reminders");
    }

    /// Drop every armed row for the user. Returns how many were dropped.
    pub fn clear_user(&self, user_id: &str) -> usize {
        let mut entries = self.entries.lock().unwrap();
        match entries.remove(user_id) {
            Some(entry) => entry.reminders.len(),
            None => 0,
        }
    }

    /// Attach a (new) device token to a user's delivery context.
    pub fn update_device_token(&self, user_id: &str, token: &str) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(user_id) {
            entry.context.device_token = Some(token.to_string());
        }
    }

    pub fn user_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn reminder_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .values()
            .map(|e| e.reminders.len())
            .sum()
    }

    /// Pop every row due at `now`, advancing each by one week in place.
    pub fn take_due(&self, now: NaiveDateTime) -> Vec<DueReminder> {
        let mut due = Vec::new();

        let mut entries = self.entries.lock().unwrap();
        for entry in entries.values_mut() {
            for reminder in entry.reminders.iter_mut() {
                if reminder.next_fire <= now {
                    due.push(DueReminder {
                        context: entry.context.clone(),
                        reminder: reminder.clone(),
                    });
                    reminder.advance();
                }
            }
        }

        due
    }

    /// Drive the table until the task is aborted: tick, pop due rows,
    /// dispatch each independently.
    pub fn run(self, dispatcher: Arc<Dispatcher>, tick: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;

                let now = Local::now().naive_local();
                let due = self.take_due(now);
                if due.is_empty() {
                    continue;
                }

                debug!("dispatching {} due reminders", due.len());
                for row in due {
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move {
                        dispatcher
                            .dispatch(
                                &row.context,
                                &row.reminder.message,
                                row.reminder.activity.as_ref(),
                            )
                            .await;
                    });
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, NaiveDate, NaiveTime, Weekday};
    use uuid::Uuid;
    use weekplan_core::reminder::ReminderKind;
    use weekplan_core::NotificationSettings;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 18)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time")
    }

    fn reminder(fire: NaiveDateTime) -> ScheduledReminder {
        ScheduledReminder {
            id: Uuid::new_v4(),
            kind: ReminderKind::MorningMotivation,
            day: Weekday::Wed,
            time: NaiveTime::from_hms_opt(7, 30, 0).expect("valid time"),
            message: "Good morning!".to_string(),
            activity: None,
            next_fire: fire,
        }
    }

    fn context() -> UserContext {
        UserContext::new("user-1", NotificationSettings::default())
    }

    #[test]
    fn test_due_rows_are_popped_and_rearmed_a_week_out() {
        let scheduler = ReminderScheduler::new();
        let fire = now() - ChronoDuration::minutes(1);
        scheduler.schedule_user(context(), vec![reminder(fire)]);

        let due = scheduler.take_due(now());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].reminder.next_fire, fire);

        // Re-armed exactly one week later, not dropped
        assert_eq!(scheduler.reminder_count(), 1);
        let next = scheduler.take_due(now() + ChronoDuration::days(7));
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].reminder.next_fire, fire + ChronoDuration::days(7));
    }

    #[test]
    fn test_future_rows_stay_armed() {
        let scheduler = ReminderScheduler::new();
        scheduler.schedule_user(context(), vec![reminder(now() + ChronoDuration::hours(1))]);

        assert!(scheduler.take_due(now()).is_empty());
        assert_eq!(scheduler.reminder_count(), 1);
    }

    #[test]
    fn test_rescheduling_replaces_the_whole_entry() {
        let scheduler = ReminderScheduler::new();
        scheduler.schedule_user(
            context(),
            vec![
                reminder(now() - ChronoDuration::minutes(5)),
                reminder(now() - ChronoDuration::minutes(3)),
            ],
        );

        // A regenerated schedule arms a fresh set; the old rows must not
        // survive to fire duplicates.
        scheduler.schedule_user(context(), vec![reminder(now() + ChronoDuration::hours(2))]);

        assert_eq!(scheduler.user_count(), 1);
        assert_eq!(scheduler.reminder_count(), 1);
        assert!(scheduler.take_due(now()).is_empty());
    }

    #[test]
    fn test_clear_user_drops_all_rows() {
        let scheduler = ReminderScheduler::new();
        scheduler.schedule_user(
            context(),
            vec![reminder(now()), reminder(now()), reminder(now())],
        );

        assert_eq!(scheduler.clear_user("user-1"), 3);
        assert_eq!(scheduler.clear_user("user-1"), 0);
        assert_eq!(scheduler.user_count(), 0);
    }

    #[test]
    fn test_update_device_token_reaches_the_stored_context() {
        let scheduler = ReminderScheduler::new();
        scheduler.schedule_user(context(), vec![reminder(now() + ChronoDuration::hours(1))]);

        scheduler.update_device_token("user-1", "fcm-token-123");

        let due = scheduler.take_due(now() + ChronoDuration::hours(2));
        assert_eq!(due[0].context.device_token.as_deref(), Some("fcm-token-123"));
    }
}
