//! Schedule generation orchestration.

use std::time::Duration;

use tracing::{info, warn};

use weekplan_core::config::LlmConfig;
use weekplan_core::fallback::generate_fallback_schedule;
use weekplan_core::schedule::{Activity, DaySchedule, Week};
use weekplan_core::validate::{RawScheduleResponse, RepairReport, validate_schedule};
use weekplan_core::{UserProfile, WeekplanError, WeekplanResult, WeeklySchedule};

use crate::api::{ChatRequest, ChatResponse};
use crate::prompt::build_prompt;

/// How the returned schedule was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    /// Validated LLM output
    Llm,
    /// Deterministic generator (no credential, or truncated output)
    Fallback,
    /// Placeholder schedule after an unrecoverable parse failure
    Degraded,
}

/// A generated schedule together with how it was produced and what the
/// validator had to repair.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    pub schedule: WeeklySchedule,
    pub report: RepairReport,
    pub source: ScheduleSource,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Parse failures on content longer than this are treated as truncation.
const TRUNCATION_LENGTH_THRESHOLD: usize = 3000;
/// Literal shorthand the model was told not to emit; its presence means the
/// activity arrays were elided.
const ELLIPSIS_MARKER: &str = "\"activities\": [...]";

/// Generate a validated weekly schedule for the profile.
///
/// With no API key configured this is the fallback generator (a supported
/// mode, not an error). Otherwise a single completion request is made; a
/// non-2xx response or a network failure is a generation error, while
/// unusable output degrades per [`ScheduleSource`].
pub async fn generate_weekly_schedule(
    config: &LlmConfig,
    profile: &UserProfile,
) -> WeekplanResult<GeneratedSchedule> {
    let Some(api_key) = config.api_key.as_deref() else {
        info!("no API key configured, using fallback schedule");
        return Ok(GeneratedSchedule {
            schedule: generate_fallback_schedule(profile),
            report: RepairReport::default(),
            source: ScheduleSource::Fallback,
        });
    };

    let request = ChatRequest::single_user_message(&config.model, build_prompt(profile));

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/chat/completions", config.api_base))
        .bearer_auth(api_key)
        .timeout(REQUEST_TIMEOUT)
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            warn!("completion request failed: {e}");
            WeekplanError::generation_failed()
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WeekplanError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let completion: ChatResponse = response.json().await.map_err(|e| {
        warn!("completion response was not valid JSON: {e}");
        WeekplanError::generation_failed()
    })?;

    let content = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            warn!("completion response contained no choices");
            WeekplanError::generation_failed()
        })?;

    Ok(schedule_from_content(&content, profile))
}

/// Turn raw message content into a schedule, degrading instead of failing.
fn schedule_from_content(content: &str, profile: &UserProfile) -> GeneratedSchedule {
    match serde_json::from_str::<RawScheduleResponse>(content) {
        Ok(raw) => {
            let (schedule, report) = validate_schedule(raw, profile);
            if !report.is_clean() {
                warn!("schedule output repaired: {report}");
            }
            GeneratedSchedule {
                schedule,
                report,
                source: ScheduleSource::Llm,
            }
        }
        Err(e) if looks_truncated(content) => {
            warn!("schedule output appears truncated ({e}), using fallback schedule");
            GeneratedSchedule {
                schedule: generate_fallback_schedule(profile),
                report: RepairReport::default(),
                source: ScheduleSource::Fallback,
            }
        }
        Err(e) => {
            warn!("schedule output was not valid JSON ({e}), returning placeholder");
            GeneratedSchedule {
                schedule: placeholder_schedule(profile),
                report: RepairReport::default(),
                source: ScheduleSource::Degraded,
            }
        }
    }
}

/// Best-effort signal that the model's output was cut off mid-document.
fn looks_truncated(content: &str) -> bool {
    content.len() > TRUNCATION_LENGTH_THRESHOLD || content.contains(ELLIPSIS_MARKER)
}

/// Single-activity schedule shown while the user retries generation.
fn placeholder_schedule(profile: &UserProfile) -> WeeklySchedule {
    let mut week = Week::default();
    week.monday = DaySchedule {
        activities: vec![Activity {
            time: profile.day_window(),
            activity: "Schedule Generation".to_string(),
            description: Some(
                "Your personalized schedule is being generated. Please try again if this persists."
                    .to_string(),
            ),
            tips: Some("The AI is working on creating your detailed schedule".to_string()),
        }],
    };

    WeeklySchedule {
        schedule: week,
        summary: "Schedule generated successfully".to_string(),
        motivation_tips: vec![
            "Stay consistent with your routine".to_string(),
            "Track your progress".to_string(),
            "Celebrate small wins".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn profile() -> UserProfile {
        UserProfile {
            goal: "Write a novel".to_string(),
            work_days: vec!["Monday".to_string(), "Friday".to_string()],
            start_time: "08:00".to_string(),
            end_time: "12:00".to_string(),
            preferences: String::new(),
        }
    }

    #[test]
    fn test_valid_content_is_validated_and_kept() {
        let content = r#"{
            "schedule": {
                "monday": { "activities": [
                    { "time": "8:00 AM-9:00 AM", "activity": "Draft chapter" }
                ]}
            },
            "summary": "Writing week",
            "motivation_tips": ["One page at a time"]
        }"#;

        let generated = schedule_from_content(content, &profile());

        assert_eq!(generated.source, ScheduleSource::Llm);
        assert_eq!(generated.schedule.summary, "Writing week");
        assert_eq!(
            generated.schedule.day(Weekday::Mon).activities[0].time,
            "08:00-09:00",
            "Times from the model are normalized"
        );
        assert_eq!(generated.report.backfilled_days().len(), 6);
    }

    #[test]
    fn test_ellipsis_marker_selects_fallback() {
        let content = r#"{ "schedule": { "monday": { "activities": [...] } } }"#;

        let generated = schedule_from_content(content, &profile());

        assert_eq!(generated.source, ScheduleSource::Fallback);
        // Fallback covers the full 08:00-12:00 window on every day
        assert_eq!(generated.schedule.day(Weekday::Mon).activities.len(), 4);
    }

    #[test]
    fn test_long_unparseable_content_selects_fallback() {
        let mut content = String::from("{ \"schedule\": ");
        content.push_str(&"x".repeat(TRUNCATION_LENGTH_THRESHOLD + 1));

        let generated = schedule_from_content(&content, &profile());
        assert_eq!(generated.source, ScheduleSource::Fallback);
    }

    #[test]
    fn test_short_garbage_degrades_to_placeholder() {
        let generated = schedule_from_content("Sorry, I can't do that.", &profile());

        assert_eq!(generated.source, ScheduleSource::Degraded);
        let monday = &generated.schedule.day(Weekday::Mon).activities;
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].activity, "Schedule Generation");
        assert_eq!(monday[0].time, "08:00-12:00");
        assert!(generated.schedule.day(Weekday::Tue).activities.is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_uses_fallback_without_error() {
        let config = LlmConfig::default();

        let generated = generate_weekly_schedule(&config, &profile())
            .await
            .expect("No-credential mode is not an error");

        assert_eq!(generated.source, ScheduleSource::Fallback);
        assert!(generated.report.is_clean());
    }
}
