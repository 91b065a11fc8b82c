//! Core types for the weekplan ecosystem.
//!
//! This crate provides the shared vocabulary used by the generator, the
//! notification scheduler, the server, and the CLI:
//! - `UserProfile` and `WeeklySchedule` types
//! - the deterministic fallback generator
//! - validation/repair of upstream schedule documents
//! - reminder derivation and next-fire arithmetic
//! - notification settings and global configuration

pub mod config;
pub mod error;
pub mod fallback;
pub mod profile;
pub mod reminder;
pub mod schedule;
pub mod settings;
pub mod timefmt;
pub mod validate;

// Re-export the central types at crate root for convenience
pub use error::{WeekplanError, WeekplanResult};
pub use profile::UserProfile;
pub use reminder::{ReminderKind, ScheduledReminder, derive_reminders, next_occurrence};
pub use schedule::{Activity, DaySchedule, WEEK_DAYS, Week, WeeklySchedule, day_name};
pub use settings::NotificationSettings;
pub use validate::{Repair, RepairReport, RawScheduleResponse, validate_schedule};
