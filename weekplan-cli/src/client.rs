//! HTTP client for communicating with weekplan-server

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use weekplan_core::{NotificationSettings, UserProfile, WeeklySchedule};

const SERVER_URL: &str = "http://127.0.0.1:3001";

/// HTTP client for weekplan-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Request/response types matching the server API

#[derive(Serialize)]
struct ScheduleRequest<'a> {
    user_id: &'a str,
    profile: &'a UserProfile,
    schedule: &'a WeeklySchedule,
    settings: &'a NotificationSettings,
}

#[derive(Deserialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub reminders_armed: usize,
}

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    message: &'a str,
    title: Option<&'a str>,
}

#[derive(Deserialize)]
pub struct BroadcastResponse {
    pub success: bool,
    pub success_count: u32,
    pub failure_count: u32,
}

#[derive(Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_users: usize,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl Client {
    pub fn new(base_url: Option<String>) -> Self {
        Client {
            http: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| SERVER_URL.to_string()),
        }
    }

    /// GET /api/health
    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .context("Failed to connect to server")?;

        Ok(resp.json().await?)
    }

    /// POST /api/notifications/schedule
    pub async fn schedule(
        &self,
        user_id: &str,
        profile: &UserProfile,
        schedule: &WeeklySchedule,
        settings: &NotificationSettings,
    ) -> Result<ScheduleResponse> {
        let resp = self
            .http
            .post(format!("{}/api/notifications/schedule", self.base_url))
            .json(&ScheduleRequest {
                user_id,
                profile,
                schedule,
                settings,
            })
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(resp.json().await?)
    }

    /// POST /api/notifications/broadcast
    pub async fn broadcast(&self, message: &str, title: Option<&str>) -> Result<BroadcastResponse> {
        let resp = self
            .http
            .post(format!("{}/api/notifications/broadcast", self.base_url))
            .json(&BroadcastRequest { message, title })
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.error);
        }

        Ok(resp.json().await?)
    }
}
