//! `weekplan schedule` - generate a schedule and arm reminders server-side.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use weekplan_core::NotificationSettings;
use weekplan_core::config::WeekplanConfig;
use weekplan_llm::generate_weekly_schedule;

use crate::client::Client;
use crate::commands::load_profile;

pub async fn run(profile: Option<PathBuf>, server: Option<String>, user: String) -> Result<()> {
    let profile = load_profile(profile)?;
    let config = WeekplanConfig::load()?;
    let settings = NotificationSettings::load()?;

    let generated = generate_weekly_schedule(&config.llm, &profile).await?;

    let client = Client::new(server);
    let response = client
        .schedule(&user, &profile, &generated.schedule, &settings)
        .await?;

    println!(
        "{} {} reminders armed for {}",
        "✓".green(),
        response.reminders_armed,
        user
    );

    if !settings.push_enabled && !settings.sms_enabled && !settings.local_enabled {
        println!(
            "{}",
            "Note: no transport is enabled. Enable one with `weekplan settings`.".yellow()
        );
    }

    Ok(())
}
