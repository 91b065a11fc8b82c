//! `weekplan settings` - show and update notification settings.

use anyhow::Result;
use owo_colors::OwoColorize;

use weekplan_core::NotificationSettings;
use weekplan_notify::validate_phone_number;

pub fn run(
    push: Option<bool>,
    sms: Option<bool>,
    local: Option<bool>,
    phone: Option<String>,
) -> Result<()> {
    let mut settings = NotificationSettings::load()?;
    let mut changed = false;

    if let Some(push) = push {
        settings.push_enabled = push;
        changed = true;
    }
    if let Some(sms) = sms {
        settings.sms_enabled = sms;
        changed = true;
    }
    if let Some(local) = local {
        settings.local_enabled = local;
        changed = true;
    }
    if let Some(phone) = phone {
        settings.phone_number = Some(validate_phone_number(&phone)?);
        changed = true;
    }

    if changed {
        settings.save()?;
        println!("{}", "Settings saved.".green());
    }

    println!("push:               {}", on_off(settings.push_enabled));
    println!("sms:                {}", on_off(settings.sms_enabled));
    println!("local:              {}", on_off(settings.local_enabled));
    println!(
        "phone:              {}",
        settings.phone_number.as_deref().unwrap_or("(not set)")
    );
    println!(
        "activity reminders: {}",
        on_off(settings.activity_reminders)
    );
    println!(
        "daily motivation:   {} at {}",
        on_off(settings.daily_motivation),
        settings.times.morning_motivation.format("%H:%M")
    );
    println!(
        "evening reflection: {} at {}",
        on_off(settings.evening_reflection),
        settings.times.evening_reflection.format("%H:%M")
    );

    Ok(())
}

fn on_off(value: bool) -> String {
    if value {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}
