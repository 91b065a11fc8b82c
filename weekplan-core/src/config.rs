//! Global weekplan configuration.
//!
//! Read from `~/.config/weekplan/config.toml`, with environment variables
//! taking precedence so deployments can configure credentials without a
//! file. A missing credential is never fatal: the LLM path falls back to
//! the deterministic generator and an unconfigured transport is simply not
//! constructed.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{WeekplanError, WeekplanResult};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Completion-endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API credential. `None` selects the fallback generator.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// SMS transport credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

/// Push transport credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct FcmConfig {
    pub server_key: String,
}

/// Global configuration at `~/.config/weekplan/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekplanConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    pub twilio: Option<TwilioConfig>,
    pub fcm: Option<FcmConfig>,
}

impl WeekplanConfig {
    pub fn config_path() -> WeekplanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WeekplanError::Config("Could not determine config directory".into()))?
            .join("weekplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> WeekplanResult<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| WeekplanError::Serialization(e.to_string()))?
        } else {
            WeekplanConfig::default()
        };

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(key) = env_var("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = env_var("WEEKPLAN_MODEL") {
            self.llm.model = model;
        }
        if let Some(base) = env_var("WEEKPLAN_API_BASE") {
            self.llm.api_base = base;
        }

        if let (Some(account_sid), Some(auth_token), Some(from_number)) = (
            env_var("TWILIO_ACCOUNT_SID"),
            env_var("TWILIO_AUTH_TOKEN"),
            env_var("TWILIO_PHONE_NUMBER"),
        ) {
            self.twilio = Some(TwilioConfig {
                account_sid,
                auth_token,
                from_number,
            });
        }

        if let Some(server_key) = env_var("FCM_SERVER_KEY") {
            self.fcm = Some(FcmConfig { server_key });
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
