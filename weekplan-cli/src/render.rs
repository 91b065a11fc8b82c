//! Terminal rendering for weekplan types.
//!
//! Extension trait adding colored terminal rendering to core types using
//! owo_colors.

use owo_colors::OwoColorize;

use weekplan_core::{Activity, WeeklySchedule, day_name};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Activity {
    fn render(&self) -> String {
        let mut line = format!("   {}  {}", self.time.dimmed(), self.activity);
        if let Some(tips) = &self.tips {
            line.push_str(&format!("\n      💡 {}", tips.dimmed()));
        }
        line
    }
}

impl Render for WeeklySchedule {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(self.summary.bold().to_string());
        lines.push(String::new());

        for (day, day_schedule) in self.days() {
            lines.push(format!("📅 {}", day_name(day).cyan().bold()));

            if day_schedule.activities.is_empty() {
                lines.push(format!("   {}", "(rest day)".dimmed()));
            } else {
                for activity in &day_schedule.activities {
                    lines.push(activity.render());
                }
            }
            lines.push(String::new());
        }

        if !self.motivation_tips.is_empty() {
            lines.push("Motivation:".bold().to_string());
            for tip in &self.motivation_tips {
                lines.push(format!("   • {}", tip));
            }
        }

        lines.join("\n")
    }
}
