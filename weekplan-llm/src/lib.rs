//! LLM-backed weekly schedule generation.
//!
//! Builds a prompt from the user's onboarding answers, calls the
//! chat-completions endpoint, and validates the returned JSON into a
//! [`weekplan_core::WeeklySchedule`]. When no credential is configured or
//! the output is unusable, generation degrades instead of failing: a
//! truncated response selects the deterministic fallback generator, and any
//! other unparseable response yields a placeholder schedule the user can
//! regenerate from.

mod api;
mod generate;
mod prompt;

pub use generate::{GeneratedSchedule, ScheduleSource, generate_weekly_schedule};
pub use prompt::build_prompt;
