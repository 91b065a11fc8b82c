//! SMS delivery through the Twilio Messages API.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use weekplan_core::config::TwilioConfig;
use weekplan_core::{WeekplanError, WeekplanResult};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// E.164: optional '+', leading non-zero digit, at most 15 digits total.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("static pattern compiles"));

/// Validate a phone number, returning it with whitespace stripped.
pub fn validate_phone_number(raw: &str) -> WeekplanResult<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if PHONE_PATTERN.is_match(&cleaned) {
        Ok(cleaned)
    } else {
        Err(WeekplanError::InvalidPhoneNumber(raw.to_string()))
    }
}

/// Twilio client for reminder SMS.
pub struct SmsClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    sid: String,
}

impl SmsClient {
    pub fn new(config: &TwilioConfig) -> Self {
        SmsClient {
            http: reqwest::Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            api_base: TWILIO_API_BASE.to_string(),
        }
    }

    /// Send one SMS; returns the provider's message sid.
    pub async fn send_sms(&self, to: &str, message: &str) -> WeekplanResult<String> {
        let to = validate_phone_number(to)?;

        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        );
        let params = [
            ("To", to.as_str()),
            ("From", self.from_number.as_str()),
            ("Body", message),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| WeekplanError::Transport(format!("SMS send failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeekplanError::Transport(format!(
                "SMS send rejected ({status}): {body}"
            )));
        }

        let created: MessageResponse = response
            .json()
            .await
            .map_err(|e| WeekplanError::Transport(format!("SMS response unreadable: {e}")))?;

        Ok(created.sid)
    }
}
