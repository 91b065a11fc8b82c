use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use weekplan_core::config::WeekplanConfig;
use weekplan_notify::{Dispatcher, ReminderScheduler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WeekplanConfig>,
    pub dispatcher: Arc<Dispatcher>,
    pub scheduler: ReminderScheduler,
    /// Registered push device tokens by user id. Mirrored into the
    /// scheduler's per-user contexts on registration.
    pub tokens: Arc<Mutex<HashMap<String, String>>>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = WeekplanConfig::load()?;
        let dispatcher = Arc::new(Dispatcher::from_config(&config));

        Ok(AppState {
            config: Arc::new(config),
            dispatcher,
            scheduler: ReminderScheduler::new(),
            tokens: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn registered_tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().values().cloned().collect()
    }

    pub fn token_for(&self, user_id: &str) -> Option<String> {
        self.tokens.lock().unwrap().get(user_id).cloned()
    }
}
