//! Deterministic rule-based schedule generation.
//!
//! Used when no LLM credential is configured or when the LLM output is
//! unusable. Produces a complete weekly plan from the profile alone, with
//! no external calls, identical for identical input.

use chrono::Weekday;

use crate::profile::UserProfile;
use crate::schedule::{Activity, DaySchedule, WEEK_DAYS, Week, WeeklySchedule};

/// Generate a complete hourly weekly schedule from the profile.
///
/// Work days get a structured routine over `[start_hour, end_hour)`; rest
/// days get a lighter reflective one. An inverted or unparseable day window
/// yields empty days, which is accepted (rest week), not an error.
pub fn generate_fallback_schedule(profile: &UserProfile) -> WeeklySchedule {
    let (start_hour, end_hour) = match (profile.start_hour(), profile.end_hour()) {
        (Ok(start), Ok(end)) => (start, end),
        // An unparseable window behaves like an empty one
        _ => (0, 0),
    };

    let mut week = Week::default();
    for day in WEEK_DAYS {
        *week.day_mut(day) = generate_day(profile, day, start_hour, end_hour);
    }

    WeeklySchedule {
        schedule: week,
        summary: format!(
            "Your personalized weekly schedule from {} to {}. Focus on your goal: {}",
            profile.start_time, profile.end_time, profile.goal
        ),
        motivation_tips: vec![
            "Stay consistent with your routine".to_string(),
            "Track your progress daily".to_string(),
            "Celebrate small wins along the way".to_string(),
            "Remember why you started".to_string(),
        ],
    }
}

fn generate_day(profile: &UserProfile, day: Weekday, start_hour: u32, end_hour: u32) -> DaySchedule {
    let is_work_day = profile.is_work_day(day);
    let mut activities = Vec::new();

    for hour in start_hour..end_hour {
        let time = format!("{:02}:00-{:02}:00", hour, hour + 1);

        let (activity, description, tips) = if is_work_day {
            work_slot(hour, start_hour, end_hour)
        } else {
            rest_slot(hour, start_hour)
        };

        activities.push(Activity {
            time,
            activity,
            description: Some(description.to_string()),
            tips: Some(tips.to_string()),
        });
    }

    DaySchedule { activities }
}

fn work_slot(hour: u32, start: u32, end: u32) -> (String, &'static str, &'static str) {
    if hour == start {
        (
            "Morning Routine & Goal Review".to_string(),
            "Review today's objectives and prepare mentally for the day ahead",
            "Write down your top 3 priorities for today",
        )
    } else if hour == start + 2 {
        (
            "Morning Break".to_string(),
            "Take a short break to refresh and recharge",
            "Stretch, hydrate, and take a few deep breaths",
        )
    } else if hour == start + 4 {
        (
            "Primary Goal Work Session".to_string(),
            "Deep focus work on your main goal - eliminate distractions",
            "Use the Pomodoro technique: 25 minutes work, 5 minutes break",
        )
    } else if hour == start + 6 {
        (
            "Afternoon Break".to_string(),
            "Take a longer break for lunch and mental refresh",
            "Eat a healthy meal and step away from your workspace",
        )
    } else if hour + 2 == end {
        (
            "Review & Planning".to_string(),
            "Review today's progress and plan for tomorrow",
            "Celebrate wins and identify areas for improvement",
        )
    } else if hour + 1 == end {
        (
            "Wrap-up & Preparation".to_string(),
            "Organize workspace and prepare for the next day",
            "Clear your desk and set up tomorrow's priorities",
        )
    } else {
        (
            format!("Goal Work Session {}", hour - start),
            "Focused work on your primary goal with specific tasks",
            "Stay focused and track your progress",
        )
    }
}

fn rest_slot(hour: u32, start: u32) -> (String, &'static str, &'static str) {
    if hour == start {
        (
            "Morning Reflection".to_string(),
            "Start the day with gratitude and reflection",
            "Write down 3 things you're grateful for",
        )
    } else if hour == start + 2 {
        (
            "Light Goal Work".to_string(),
            "Gentle progress on your goals without pressure",
            "Keep it enjoyable and stress-free",
        )
    } else if hour == start + 4 {
        (
            "Rest & Recharge".to_string(),
            "Take time to relax and recharge your energy",
            "Do something you enjoy that's not goal-related",
        )
    } else {
        (
            "Weekend Activities".to_string(),
            "Enjoy your time off while staying connected to your goals",
            "Balance rest with gentle progress",
        )
    }
}
