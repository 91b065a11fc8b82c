//! `weekplan generate` - generate and render a weekly schedule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use weekplan_core::config::WeekplanConfig;
use weekplan_llm::{ScheduleSource, generate_weekly_schedule};

use crate::commands::load_profile;
use crate::render::Render;

pub async fn run(profile: Option<PathBuf>, json: bool, out: Option<PathBuf>) -> Result<()> {
    let profile = load_profile(profile)?;
    let config = WeekplanConfig::load()?;

    let generated = generate_weekly_schedule(&config.llm, &profile).await?;

    match generated.source {
        ScheduleSource::Llm => {}
        ScheduleSource::Fallback => {
            eprintln!(
                "{}",
                "Using the built-in planner (no API key configured or output was unusable)."
                    .yellow()
            );
        }
        ScheduleSource::Degraded => {
            eprintln!(
                "{}",
                "Schedule generation did not complete; showing a placeholder. Try again.".yellow()
            );
        }
    }

    if !generated.report.is_clean() {
        eprintln!("{} {}", "Repaired:".yellow(), generated.report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&generated.schedule)?);
    } else {
        println!("{}", generated.schedule.render());
    }

    if let Some(out) = out {
        let content = serde_json::to_string_pretty(&generated.schedule)?;
        std::fs::write(&out, content)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        println!("Saved schedule to {}", out.display());
    }

    Ok(())
}
