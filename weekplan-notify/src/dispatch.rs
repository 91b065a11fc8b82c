//! Multi-transport notification dispatch.

use tracing::{debug, warn};

use weekplan_core::config::WeekplanConfig;
use weekplan_core::{Activity, NotificationSettings, WeekplanError, WeekplanResult};

use crate::local::send_local;
use crate::push::FcmClient;
use crate::sms::SmsClient;

/// Per-user delivery context, owned by the caller and passed explicitly so
/// no notification state lives in process-wide globals.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
    /// Push device token, if the user registered one
    pub device_token: Option<String>,
    pub settings: NotificationSettings,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>, settings: NotificationSettings) -> Self {
        UserContext {
            user_id: user_id.into(),
            device_token: None,
            settings,
        }
    }
}

/// Fans a message out to every enabled, available transport.
///
/// Transports are attempted concurrently; a failing transport is logged and
/// never aborts its siblings. Callers only learn that dispatch was
/// attempted.
pub struct Dispatcher {
    push: Option<FcmClient>,
    sms: Option<SmsClient>,
}

impl Dispatcher {
    /// Build from configuration; unconfigured transports are absent.
    pub fn from_config(config: &WeekplanConfig) -> Self {
        Dispatcher {
            push: config.fcm.as_ref().map(FcmClient::new),
            sms: config.twilio.as_ref().map(SmsClient::new),
        }
    }

    pub fn push_client(&self) -> Option<&FcmClient> {
        self.push.as_ref()
    }

    pub fn sms_client(&self) -> Option<&SmsClient> {
        self.sms.as_ref()
    }

    pub async fn dispatch(&self, user: &UserContext, message: &str, activity: Option<&Activity>) {
        let (push, sms, local) = tokio::join!(
            self.try_push(user, message, activity),
            self.try_sms(user, message),
            self.try_local(user, message),
        );

        for (transport, result) in [("push", push), ("sms", sms), ("local", local)] {
            match result {
                Ok(true) => debug!(user = %user.user_id, "{transport} notification sent"),
                Ok(false) => {}
                Err(e) => warn!(user = %user.user_id, "{transport} transport failed: {e}"),
            }
        }
    }

    /// Ok(true) = sent, Ok(false) = transport not applicable for this user.
    async fn try_push(
        &self,
        user: &UserContext,
        message: &str,
        activity: Option<&Activity>,
    ) -> WeekplanResult<bool> {
        let Some(token) = push_target(user) else {
            return Ok(false);
        };
        let Some(client) = &self.push else {
            return Err(WeekplanError::Config("push transport not configured".into()));
        };

        client.send_push(token, message, activity, &user.user_id).await?;
        Ok(true)
    }

    async fn try_sms(&self, user: &UserContext, message: &str) -> WeekplanResult<bool> {
        let Some(to) = sms_target(user) else {
            return Ok(false);
        };
        let Some(client) = &self.sms else {
            return Err(WeekplanError::Config("SMS transport not configured".into()));
        };

        client.send_sms(to, message).await?;
        Ok(true)
    }

    async fn try_local(&self, user: &UserContext, message: &str) -> WeekplanResult<bool> {
        if !user.settings.local_enabled {
            return Ok(false);
        }

        let message = message.to_string();
        tokio::task::spawn_blocking(move || send_local(&message))
            .await
            .map_err(|e| WeekplanError::Transport(format!("local notification task failed: {e}")))??;
        Ok(true)
    }
}

/// SMS is attempted only when enabled and a phone number is configured.
fn sms_target(user: &UserContext) -> Option<&str> {
    if user.settings.sms_enabled {
        user.settings.phone_number.as_deref()
    } else {
        None
    }
}

/// Push is attempted only when enabled and a device token is registered.
fn push_target(user: &UserContext) -> Option<&str> {
    if user.settings.push_enabled {
        user.device_token.as_deref()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(settings: NotificationSettings, token: Option<&str>) -> UserContext {
        UserContext {
            user_id: "user-1".to_string(),
            device_token: token.map(str::to_string),
            settings,
        }
    }

    #[test]
    fn test_sms_skipped_without_phone_number() {
        let settings = NotificationSettings {
            sms_enabled: true,
            push_enabled: true,
            ..NotificationSettings::default()
        };
        let user = user(settings, Some("device-token"));

        assert_eq!(sms_target(&user), None, "No phone number configured");
        assert_eq!(push_target(&user), Some("device-token"), "Push is still attempted");
    }

    #[test]
    fn test_disabled_transports_have_no_target() {
        let settings = NotificationSettings {
            sms_enabled: false,
            push_enabled: false,
            phone_number: Some("+15551234567".to_string()),
            ..NotificationSettings::default()
        };
        let user = user(settings, Some("device-token"));

        assert_eq!(sms_target(&user), None);
        assert_eq!(push_target(&user), None);
    }

    #[test]
    fn test_enabled_sms_with_number_has_target() {
        let settings = NotificationSettings {
            sms_enabled: true,
            phone_number: Some("+15551234567".to_string()),
            ..NotificationSettings::default()
        };
        let user = user(settings, None);

        assert_eq!(sms_target(&user), Some("+15551234567"));
        assert_eq!(push_target(&user), None, "No token registered");
    }

    #[tokio::test]
    async fn test_dispatch_with_no_transports_is_a_quiet_noop() {
        let dispatcher = Dispatcher::from_config(&WeekplanConfig::default());
        let user = user(NotificationSettings::default(), None);

        // Nothing enabled, nothing configured: must not panic or hang
        dispatcher.dispatch(&user, "hello", None).await;
    }
}
