//! Local desktop notifications.

use notify_rust::{Notification, Timeout};

use weekplan_core::{WeekplanError, WeekplanResult};

use crate::push::NOTIFICATION_TITLE;

/// Auto-close after ten seconds.
const TIMEOUT_MS: u32 = 10_000;

/// Show a desktop notification on the machine running the service.
pub fn send_local(message: &str) -> WeekplanResult<()> {
    Notification::new()
        .summary(NOTIFICATION_TITLE)
        .body(message)
        .timeout(Timeout::Milliseconds(TIMEOUT_MS))
        .show()
        .map(|_| ())
        .map_err(|e| WeekplanError::Transport(format!("local notification failed: {e}")))
}
