//! `weekplan test-notify` - verify the notification pipeline end to end.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;

const TEST_MESSAGE: &str = "🧪 Test notification from Weekplan!\n\n\
    This is a test to ensure your notifications are working properly. \
    If you received this, your notification system is set up correctly!";

pub async fn run(server: Option<String>) -> Result<()> {
    let client = Client::new(server);

    let health = client.health().await?;
    println!(
        "server {} ({} registered devices)",
        health.status, health.active_users
    );

    let response = client.broadcast(TEST_MESSAGE, Some("Weekplan Test")).await?;

    println!(
        "{} test notification delivered to {}/{} devices",
        "✓".green(),
        response.success_count,
        response.success_count + response.failure_count
    );

    Ok(())
}
