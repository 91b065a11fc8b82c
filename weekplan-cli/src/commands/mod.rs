pub mod generate;
pub mod schedule;
pub mod settings;
pub mod test_notify;

use std::path::PathBuf;

use anyhow::{Context, Result};

use weekplan_core::UserProfile;

/// Load the onboarding profile from a TOML file.
pub fn load_profile(path: Option<PathBuf>) -> Result<UserProfile> {
    let path = match path {
        Some(path) => path,
        None => default_profile_path()?,
    };

    if !path.exists() {
        anyhow::bail!(
            "No profile found at {}.\n\n\
            Create one with your onboarding answers, e.g.:\n\n  \
            goal = \"Learn Rust\"\n  \
            work_days = [\"Monday\", \"Tuesday\", \"Wednesday\", \"Thursday\", \"Friday\"]\n  \
            start_time = \"08:00\"\n  \
            end_time = \"18:00\"\n  \
            preferences = \"Deep work in the mornings\"",
            path.display()
        );
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Invalid profile: {}", path.display()))
}

fn default_profile_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("weekplan");

    Ok(config_dir.join("profile.toml"))
}
