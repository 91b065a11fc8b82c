//! Prompt construction for schedule generation.

use weekplan_core::UserProfile;

/// Build the generation prompt from the onboarding answers.
///
/// The structural requirements (every hour filled, exactly three breaks,
/// the full seven-day JSON shape, no shorthand arrays) are spelled out
/// because the validator repairs rather than rejects: the better the
/// instructions, the fewer days get backfilled.
pub fn build_prompt(profile: &UserProfile) -> String {
    format!(
        r#"Create a DETAILED hourly weekly schedule based on the following user information:

Goals: {goal}
Work Days: {work_days}
Daily Start Time: {start}
Daily End Time: {end}
Preferences: {preferences}

IMPORTANT REQUIREMENTS:
1. For non-work days, do not include any activities and just have a rest day.
2. Create a COMPLETE hourly schedule that covers EVERY HOUR from {start} to {end}
3. Each hour must have a specific activity/task assigned - no empty hours
4. Include exactly 3 breaks per day (morning, afternoon, and evening)
5. Make the schedule PACKED with productive activities
6. Be extremely specific about what the user should be doing each hour
7. Consider the user's goals and create activities that directly contribute to achieving them

Format the response as a structured JSON object with this exact structure:
{{
  "schedule": {{
    "monday": {{
      "activities": [
        {{
          "time": "08:00-09:00",
          "activity": "Activity Name",
          "description": "Activity description",
          "tips": "Helpful tip"
        }}
      ]
    }},
    "tuesday": {{ "activities": [...] }},
    "wednesday": {{ "activities": [...] }},
    "thursday": {{ "activities": [...] }},
    "friday": {{ "activities": [...] }},
    "saturday": {{ "activities": [...] }},
    "sunday": {{ "activities": [...] }}
  }},
  "summary": "Brief summary of the weekly plan",
  "motivation_tips": ["Tip 1", "Tip 2", "Tip 3"]
}}

CRITICAL:
1. Ensure every hour from {start} to {end} is filled with a specific activity. The schedule must be comprehensive and actionable.
2. DO NOT use "activities": [...] or any shorthand notation. Provide the complete array of activities for each day.
3. Each day must have a full array of activities covering every hour from start to end time."#,
        goal = profile.goal,
        work_days = profile.work_days.join(", "),
        start = profile.start_time,
        end = profile.end_time,
        preferences = profile.preferences,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_profile_fields() {
        let profile = UserProfile {
            goal: "Pass the bar exam".to_string(),
            work_days: vec!["Monday".to_string(), "Tuesday".to_string()],
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            preferences: "No early mornings".to_string(),
        };

        let prompt = build_prompt(&profile);

        assert!(prompt.contains("Pass the bar exam"));
        assert!(prompt.contains("Monday, Tuesday"));
        assert!(prompt.contains("EVERY HOUR from 09:00 to 17:00"));
        assert!(prompt.contains("No early mornings"));
    }

    #[test]
    fn test_prompt_spells_out_structural_requirements() {
        let profile = UserProfile {
            goal: "g".to_string(),
            work_days: Vec::new(),
            start_time: "08:00".to_string(),
            end_time: "18:00".to_string(),
            preferences: String::new(),
        };

        let prompt = build_prompt(&profile);

        assert!(prompt.contains("exactly 3 breaks per day"));
        assert!(prompt.contains(r#""sunday": { "activities": [...] }"#));
        assert!(prompt.contains("DO NOT use \"activities\": [...]"));
    }
}
