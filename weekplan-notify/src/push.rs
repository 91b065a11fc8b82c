//! Push notifications over the FCM HTTP API.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use weekplan_core::config::FcmConfig;
use weekplan_core::{Activity, WeekplanError, WeekplanResult};

const FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Title shown on every reminder notification.
pub const NOTIFICATION_TITLE: &str = "Weekplan Reminder";

/// FCM client for single-device sends and broadcasts.
pub struct FcmClient {
    http: reqwest::Client,
    server_key: String,
    endpoint: String,
}

/// Per-token delivery counts reported by a broadcast.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BroadcastOutcome {
    #[serde(rename = "success")]
    pub success_count: u32,
    #[serde(rename = "failure")]
    pub failure_count: u32,
}

impl FcmClient {
    pub fn new(config: &FcmConfig) -> Self {
        FcmClient {
            http: reqwest::Client::new(),
            server_key: config.server_key.clone(),
            endpoint: FCM_ENDPOINT.to_string(),
        }
    }

    /// Send a reminder to a single device token.
    pub async fn send_push(
        &self,
        token: &str,
        message: &str,
        activity: Option<&Activity>,
        user_id: &str,
    ) -> WeekplanResult<()> {
        let activity_json = match activity {
            Some(activity) => serde_json::to_string(activity)
                .map_err(|e| WeekplanError::Serialization(e.to_string()))?,
            None => String::new(),
        };

        let payload = json!({
            "to": token,
            "notification": {
                "title": NOTIFICATION_TITLE,
                "body": message,
            },
            "data": {
                "activity": activity_json,
                "userId": user_id,
                "timestamp": Utc::now().to_rfc3339(),
            },
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| WeekplanError::Transport(format!("push send failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeekplanError::Transport(format!(
                "push send rejected ({status}): {body}"
            )));
        }

        Ok(())
    }

    /// Send one message to every registered device.
    pub async fn send_broadcast(
        &self,
        tokens: &[String],
        message: &str,
        title: &str,
    ) -> WeekplanResult<BroadcastOutcome> {
        if tokens.is_empty() {
            return Ok(BroadcastOutcome::default());
        }

        let payload = json!({
            "registration_ids": tokens,
            "notification": {
                "title": title,
                "body": message,
            },
            "data": {
                "type": "broadcast",
                "timestamp": Utc::now().to_rfc3339(),
            },
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| WeekplanError::Transport(format!("broadcast send failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeekplanError::Transport(format!(
                "broadcast rejected ({status}): {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WeekplanError::Transport(format!("broadcast response unreadable: {e}")))
    }
}
