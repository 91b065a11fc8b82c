mod client;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Generate your weekly schedule and manage reminder notifications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly schedule from your profile
    Generate {
        /// Profile file (defaults to ~/.config/weekplan/profile.toml)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Print the schedule as JSON instead of rendering it
        #[arg(long)]
        json: bool,

        /// Also write the schedule JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a schedule and arm its reminders on the server
    Schedule {
        /// Profile file (defaults to ~/.config/weekplan/profile.toml)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Server base URL
        #[arg(long)]
        server: Option<String>,

        /// User id to register the reminders under
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Show or update notification settings
    Settings {
        /// Enable or disable push notifications
        #[arg(long)]
        push: Option<bool>,

        /// Enable or disable SMS notifications
        #[arg(long)]
        sms: Option<bool>,

        /// Enable or disable local desktop notifications
        #[arg(long)]
        local: Option<bool>,

        /// Phone number for SMS (E.164, e.g. +15551234567)
        #[arg(long)]
        phone: Option<String>,
    },
    /// Send a test notification to every registered device
    TestNotify {
        /// Server base URL
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { profile, json, out } => {
            commands::generate::run(profile, json, out).await
        }
        Commands::Schedule {
            profile,
            server,
            user,
        } => commands::schedule::run(profile, server, user).await,
        Commands::Settings {
            push,
            sms,
            local,
            phone,
        } => commands::settings::run(push, sms, local, phone),
        Commands::TestNotify { server } => commands::test_notify::run(server).await,
    }
}
